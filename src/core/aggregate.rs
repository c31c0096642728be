// ChatTally - core/aggregate.rs
//
// Per-user message counts and per-emote occurrence counts.
// Pure functions over an in-memory ChatLog.

use crate::core::model::{ChatRecord, EmoteCounts, EmoteTally, UserCounts};

/// Tally messages per user, case-insensitively.
///
/// The sum of the returned counts always equals `log.len()`.
pub fn count_messages_per_user(log: &[ChatRecord]) -> UserCounts {
    let mut counts = UserCounts::new();
    for record in log {
        counts.record(&record.username);
    }
    counts
}

/// Count every emote token across all messages.
///
/// Each message contributes its number of non-overlapping, case-sensitive
/// occurrences of the token. Tokens that never appear, and the empty token,
/// are reported with 0.
/// The result is ordered by count, highest first; equal counts keep the
/// order of `emotes`.
pub fn count_emote_usage<S: AsRef<str>>(log: &[ChatRecord], emotes: &[S]) -> EmoteCounts {
    let mut counts: EmoteCounts = emotes
        .iter()
        .map(|token| {
            let token = token.as_ref();
            let count = if token.is_empty() {
                0
            } else {
                log.iter()
                    .map(|record| record.message.matches(token).count())
                    .sum()
            };
            EmoteTally {
                token: token.to_string(),
                count,
            }
        })
        .collect();

    // Stable: ties keep configured order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(username: &str, message: &str) -> ChatRecord {
        ChatRecord {
            timestamp: None,
            username: username.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_count_messages_per_user_normalises_case() {
        let log = vec![
            rec("Alice", "hi"),
            rec("bob", "yo"),
            rec("ALICE", "again"),
            rec("alice", "and again"),
        ];
        let counts = count_messages_per_user(&log);

        assert_eq!(counts.get("alice"), 3);
        assert_eq!(counts.get("bob"), 1);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total_messages(), log.len());
    }

    #[test]
    fn test_count_messages_is_order_independent() {
        let log = vec![rec("a", "1"), rec("b", "2"), rec("A", "3"), rec("c", "4")];
        let mut reversed = log.clone();
        reversed.reverse();

        let forward = count_messages_per_user(&log);
        let backward = count_messages_per_user(&reversed);
        for name in ["a", "b", "c"] {
            assert_eq!(forward.get(name), backward.get(name), "{name}");
        }
    }

    #[test]
    fn test_count_messages_empty_log() {
        let counts = count_messages_per_user(&[]);
        assert!(counts.is_empty());
        assert_eq!(counts.total_messages(), 0);
    }

    #[test]
    fn test_emote_counts_multiple_occurrences_and_absent() {
        let log = vec![rec("u", "abc abc")];
        let counts = count_emote_usage(&log, &["abc", "xyz"]);

        assert_eq!(
            counts,
            vec![
                EmoteTally {
                    token: "abc".to_string(),
                    count: 2
                },
                EmoteTally {
                    token: "xyz".to_string(),
                    count: 0
                },
            ]
        );
    }

    #[test]
    fn test_emote_counts_empty_token_is_zero() {
        let log = vec![rec("a", "abc"), rec("b", "")];
        let counts = count_emote_usage(&log, &["", "abc"]);
        assert_eq!(
            counts,
            vec![
                EmoteTally {
                    token: "abc".into(),
                    count: 1
                },
                EmoteTally {
                    token: "".into(),
                    count: 0
                },
            ]
        );
    }

    #[test]
    fn test_emote_counts_summed_across_messages() {
        let log = vec![
            rec("u1", "oblivi118Tea oblivi118Tea"),
            rec("u2", "nothing here"),
            rec("u3", "oblivi118Tea"),
        ];
        let counts = count_emote_usage(&log, &["oblivi118Tea"]);
        assert_eq!(counts[0].count, 3);
    }

    #[test]
    fn test_emote_counts_case_sensitive_non_overlapping() {
        let log = vec![rec("u", "aaaa LOL lol")];
        let counts = count_emote_usage(&log, &["aa", "lol"]);
        let get = |t: &str| counts.iter().find(|e| e.token == t).unwrap().count;

        assert_eq!(get("aa"), 2);
        assert_eq!(get("lol"), 1);
    }

    #[test]
    fn test_emote_counts_sorted_descending_ties_keep_order() {
        let log = vec![rec("u", "b c c a")];
        let counts = count_emote_usage(&log, &["a", "b", "c", "d"]);
        let tokens: Vec<_> = counts.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, ["c", "a", "b", "d"]);
    }
}
