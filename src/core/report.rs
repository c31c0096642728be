// ChatTally - core/report.rs
//
// Rendering of aggregates into the per-source output formats:
//   - grouped user listing (text, one <li> per count group, then totals)
//   - emote listing (text, "token: count")
//   - top-users bar chart (self-contained HTML page with inline SVG)
//   - aggregate summary (pretty JSON)
//
// Core layer: writes to any Write trait object. The app layer owns the files.

use crate::core::model::{CountGroup, EmoteTally, SourceSummary, UserTally};
use crate::util::constants;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};

// =============================================================================
// Text listings
// =============================================================================

/// One listing line for a count group, without the trailing newline.
///
/// ```text
/// <li>alice: 5 messages</li>
/// <li>alice and bob: 5 messages each</li>
/// <li>alice, bob and carol: 5 messages each</li>
/// ```
pub fn format_group_line(group: &CountGroup) -> String {
    let count = group.count;
    match group.users.as_slice() {
        [] => String::new(),
        [only] => format!("<li>{only}: {count} messages</li>"),
        [first, second] => format!("<li>{first} and {second}: {count} messages each</li>"),
        [rest @ .., last] => format!(
            "<li>{} and {last}: {count} messages each</li>",
            rest.join(", ")
        ),
    }
}

/// Write the grouped user listing followed by the two summary lines.
pub fn write_user_listing<W: Write>(
    mut writer: W,
    groups: &[CountGroup],
    total_messages: usize,
    total_participants: usize,
) -> io::Result<()> {
    for group in groups.iter().filter(|g| !g.users.is_empty()) {
        writeln!(writer, "{}", format_group_line(group))?;
    }
    writeln!(writer)?;
    writeln!(writer, "Total Messages Sent: {total_messages}")?;
    writeln!(writer, "Total Participants: {total_participants}")?;
    writer.flush()
}

/// Write one `token: count` line per emote, in the order given.
pub fn write_emote_listing<W: Write>(mut writer: W, emotes: &[EmoteTally]) -> io::Result<()> {
    for emote in emotes {
        writeln!(writer, "{}: {}", emote.token, emote.count)?;
    }
    writer.flush()
}

// =============================================================================
// JSON summary
// =============================================================================

/// Write `summary` as pretty-printed JSON with a trailing newline.
pub fn write_summary_json<W: Write>(
    mut writer: W,
    summary: &SourceSummary,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    writer.flush().map_err(serde_json::Error::io)
}

// =============================================================================
// Chart
// =============================================================================

const CHART_WIDTH: f64 = 1200.0;
const CHART_HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 140.0;
const BAR_WIDTH_RATIO: f64 = 0.8;
const Y_TICKS: usize = 5;

const BAR_COLOR: &str = "#fd79a8";
const BAR_HOVER_COLOR: &str = "#ff99cc";
const TEXT_COLOR: &str = "#dfe6e9";

/// Bar data carried alongside the SVG so tooltips and tooling can read the
/// exact values.
#[derive(Debug, Serialize)]
struct ChartData<'a> {
    users: Vec<&'a str>,
    counts: Vec<usize>,
    counts_formatted: Vec<String>,
}

/// Chart geometry derived from the bar values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    /// Tallest bar value.
    pub max_count: usize,

    /// Y-axis upper bound: `max_count` plus headroom.
    pub y_max: f64,
}

impl ChartScale {
    /// `None` when there is nothing to draw.
    pub fn for_users(users: &[UserTally]) -> Option<Self> {
        let max_count = users.iter().map(|u| u.count).max()?;
        Some(Self {
            max_count,
            y_max: max_count as f64 * constants::CHART_Y_HEADROOM,
        })
    }
}

/// Title line shown above the chart.
pub fn chart_title(users: &[UserTally]) -> String {
    let total: usize = users.iter().map(|u| u.count).sum();
    format!(
        "Top Users by Message Count (Total Messages: {})",
        format_thousands(total)
    )
}

/// Write the top-users bar chart as a standalone HTML page.
///
/// Returns `Ok(false)` without writing anything when `users` is empty.
pub fn write_chart_html<W: Write>(mut writer: W, users: &[UserTally]) -> io::Result<bool> {
    let Some(scale) = ChartScale::for_users(users) else {
        return Ok(false);
    };

    let data = ChartData {
        users: users.iter().map(|u| u.display_name.as_str()).collect(),
        counts: users.iter().map(|u| u.count).collect(),
        counts_formatted: users.iter().map(|u| format_thousands(u.count)).collect(),
    };
    // "</" would close the script element early.
    let data_json = serde_json::to_string(&data)
        .map_err(io::Error::from)?
        .replace("</", "<\\/");

    let title = escape_html(&chart_title(users));
    let svg = render_svg(users, &data.counts_formatted, scale, &title);

    write!(
        writer,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Chat Statistics</title>\n\
         <style>\n\
         body {{ margin: 0; background: transparent; font-family: sans-serif; }}\n\
         .chart {{ overflow-x: auto; }}\n\
         .bar {{ fill: {BAR_COLOR}; stroke: none; }}\n\
         .bar:hover {{ fill: {BAR_HOVER_COLOR}; stroke: {BAR_COLOR}; }}\n\
         text {{ fill: {TEXT_COLOR}; }}\n\
         .title {{ font-size: 16pt; }}\n\
         .label {{ font-size: 10pt; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"chart\">\n\
         {svg}\
         </div>\n\
         <script type=\"application/json\" id=\"chart-data\">{data_json}</script>\n\
         </body>\n\
         </html>\n"
    )?;
    writer.flush()?;
    Ok(true)
}

fn render_svg(users: &[UserTally], formatted: &[String], scale: ChartScale, title: &str) -> String {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_height;
    let band = plot_width / users.len() as f64;
    let bar_width = band * BAR_WIDTH_RATIO;

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" \
         viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\">"
    );
    let _ = writeln!(
        svg,
        "<text class=\"title\" x=\"{MARGIN_LEFT}\" y=\"{:.2}\">{title}</text>",
        MARGIN_TOP / 2.0
    );

    // Y-axis tick labels.
    for tick in 0..=Y_TICKS {
        let value = scale.y_max * tick as f64 / Y_TICKS as f64;
        let y = baseline - plot_height * tick as f64 / Y_TICKS as f64;
        let _ = writeln!(
            svg,
            "<text class=\"label\" x=\"{:.2}\" y=\"{y:.2}\" text-anchor=\"end\">{}</text>",
            MARGIN_LEFT - 8.0,
            format_thousands(value.round() as usize)
        );
    }

    for (idx, (user, count_text)) in users.iter().zip(formatted).enumerate() {
        let name = escape_html(&user.display_name);
        let height = plot_height * user.count as f64 / scale.y_max;
        let x = MARGIN_LEFT + band * idx as f64 + (band - bar_width) / 2.0;
        let y = baseline - height;
        let _ = writeln!(
            svg,
            "<rect class=\"bar\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_width:.2}\" height=\"{height:.2}\">\
             <title>User: {name}\nMessages: {count_text}</title></rect>"
        );

        // X-axis label, rotated so long names stay legible.
        let label_x = MARGIN_LEFT + band * (idx as f64 + 0.5);
        let label_y = baseline + 12.0;
        let _ = writeln!(
            svg,
            "<text class=\"label\" x=\"{label_x:.2}\" y=\"{label_y:.2}\" text-anchor=\"end\" \
             transform=\"rotate(-40 {label_x:.2} {label_y:.2})\">{name}</text>"
        );
    }

    svg.push_str("</svg>\n");
    svg
}

// =============================================================================
// Helpers
// =============================================================================

/// Format `n` with comma thousands separators (`12345` -> `12,345`).
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Escape text for HTML/SVG element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn group(count: usize, users: &[&str]) -> CountGroup {
        CountGroup {
            count,
            users: users.iter().map(|u| u.to_string()).collect(),
        }
    }

    fn tally(name: &str, count: usize) -> UserTally {
        UserTally {
            key: name.to_lowercase(),
            display_name: name.to_string(),
            count,
        }
    }

    #[test]
    fn test_group_line_phrasing() {
        assert_eq!(
            format_group_line(&group(5, &["alice"])),
            "<li>alice: 5 messages</li>"
        );
        assert_eq!(
            format_group_line(&group(5, &["alice", "bob"])),
            "<li>alice and bob: 5 messages each</li>"
        );
        assert_eq!(
            format_group_line(&group(2, &["a", "b", "c", "d"])),
            "<li>a, b, c and d: 2 messages each</li>"
        );
    }

    #[test]
    fn test_user_listing_layout() {
        let groups = vec![group(5, &["alice", "bob"]), group(3, &["carol"])];
        let mut buf = Vec::new();
        write_user_listing(&mut buf, &groups, 13, 3).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(
            output,
            "<li>alice and bob: 5 messages each</li>\n\
             <li>carol: 3 messages</li>\n\
             \n\
             Total Messages Sent: 13\n\
             Total Participants: 3\n"
        );
    }

    #[test]
    fn test_emote_listing_layout() {
        let emotes = vec![
            EmoteTally {
                token: "oblivi118Tea".to_string(),
                count: 4,
            },
            EmoteTally {
                token: "oblivi118Zzz".to_string(),
                count: 0,
            },
        ];
        let mut buf = Vec::new();
        write_emote_listing(&mut buf, &emotes).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "oblivi118Tea: 4\noblivi118Zzz: 0\n"
        );
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(12_345), "12,345");
    }

    #[test]
    fn test_chart_scale_headroom() {
        let users = vec![tally("a", 100), tally("b", 40)];
        let scale = ChartScale::for_users(&users).unwrap();
        assert_eq!(scale.max_count, 100);
        assert!((scale.y_max - 110.0).abs() < 1e-9);
        assert!(ChartScale::for_users(&[]).is_none());
    }

    #[test]
    fn test_chart_title_sums_charted_users() {
        let users = vec![tally("a", 1_500), tally("b", 700)];
        assert_eq!(
            chart_title(&users),
            "Top Users by Message Count (Total Messages: 2,200)"
        );
    }

    #[test]
    fn test_chart_html_contains_bars_and_tooltips() {
        let users = vec![tally("Alice", 1_200), tally("<bob>", 3)];
        let mut buf = Vec::new();
        assert!(write_chart_html(&mut buf, &users).unwrap());

        let html = String::from_utf8(buf).unwrap();
        assert_eq!(html.matches("<rect class=\"bar\"").count(), 2);
        assert!(html.contains("User: Alice\nMessages: 1,200"));
        assert!(html.contains("&lt;bob&gt;"));
        assert!(html.contains("\"counts_formatted\":[\"1,200\",\"3\"]"));
        assert!(html.contains("Total Messages: 1,203"));
    }

    #[test]
    fn test_chart_html_skipped_when_empty() {
        let mut buf = Vec::new();
        assert!(!write_chart_html(&mut buf, &[]).unwrap());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_chart_data_cannot_close_script() {
        let users = vec![tally("</script>", 1)];
        let mut buf = Vec::new();
        write_chart_html(&mut buf, &users).unwrap();
        let html = String::from_utf8(buf).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
    }
}
