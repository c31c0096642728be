// ChatTally - core/rank.rs
//
// Top-N selection and equal-count grouping over UserCounts.

use crate::core::model::{CountGroup, UserCounts, UserTally};
use std::collections::BTreeMap;

/// The `n` users with the most messages, highest first.
///
/// Ties keep first-seen order (stable sort). Returns fewer than `n` entries
/// when there are fewer users.
pub fn top_n(counts: &UserCounts, n: usize) -> Vec<UserTally> {
    let mut ranked: Vec<UserTally> = counts.iter().cloned().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Partition all users into groups sharing an identical count.
///
/// Groups are ordered by count, highest first. Within a group, users appear
/// in first-seen order.
pub fn group_by_count(counts: &UserCounts) -> Vec<CountGroup> {
    let mut by_count: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for tally in counts.iter() {
        by_count
            .entry(tally.count)
            .or_default()
            .push(tally.display_name.clone());
    }

    by_count
        .into_iter()
        .rev()
        .map(|(count, users)| CountGroup { count, users })
        .collect()
}
