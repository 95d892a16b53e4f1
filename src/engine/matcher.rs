use std::cmp::Reverse;

use super::{MatchResult, MAX_MATCHES};
use crate::prefs::PreferenceSnapshot;
use crate::rules;
use crate::wardrobe::ClothingItem;

/// Deterministic rule-based matcher used when the reasoning service is
/// unavailable or declined. Expects a pool already stripped of the target,
/// in-wash items, and disliked items.
pub fn basic_matches(
    target: &ClothingItem,
    pool: &[ClothingItem],
    prefs: &PreferenceSnapshot,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = pool
        .iter()
        .filter(|item| rules::is_compatible(target, item))
        .map(|item| MatchResult {
            match_score: rules::score_shallow(target, item).min(100) as u8,
            reasoning: format!(
                "Matches well with {} based on color and style compatibility.",
                target.name
            ),
            advice: format!(
                "This {} complements your {} nicely.",
                item.category, target.category
            ),
            item: item.clone(),
        })
        .collect();

    // Stable sort: equal scores keep pool order, with liked items ahead of
    // equally-scored non-liked ones.
    results.sort_by_key(|result| {
        (
            Reverse(result.match_score),
            !prefs.is_liked(&result.item.id),
        )
    });
    results.truncate(MAX_MATCHES);
    results
}
