//! Reply parsers for the pipe-delimited text protocol. Parsing is pure and
//! per-line: anything malformed is dropped silently, a reply with no usable
//! lines just yields no results.

use crate::engine::{MatchResult, OutfitSuggestion, MAX_MATCHES, MAX_OUTFITS};
use crate::wardrobe::ClothingItem;

/// Parses `<1-based index>|<score>|<reasoning>|<advice>` lines against the
/// candidate pool that was sent in the prompt. Lines without a pipe are
/// ignored; a non-numeric index or score, or an index outside the pool, drops
/// the line. Scores clamp to [0, 100]. Results come back sorted descending by
/// score, truncated to six.
pub fn parse_match_reply(reply: &str, pool: &[ClothingItem]) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    for line in reply.lines().filter(|line| line.contains('|')) {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 4 {
            continue;
        }
        let Ok(index) = parts[0].trim().parse::<usize>() else {
            continue;
        };
        let Ok(score) = parts[1].trim().parse::<i64>() else {
            continue;
        };
        if index < 1 || index > pool.len() {
            continue;
        }

        matches.push(MatchResult {
            item: pool[index - 1].clone(),
            match_score: score.clamp(0, 100) as u8,
            reasoning: parts[2].trim().to_string(),
            advice: parts[3].trim().to_string(),
        });
    }

    // Stable sort; equal scores keep reply order.
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(MAX_MATCHES);
    matches
}

/// Parses outfit lines carrying `CLOTHING:`, `ACCESSORIES:` and `TIPS:`
/// segments. Out-of-range indices are filtered; an outfit resolving zero main
/// garments is dropped entirely (accessories may be empty). Truncated to
/// three.
pub fn parse_outfit_reply(
    reply: &str,
    mains: &[ClothingItem],
    accessories: &[ClothingItem],
) -> Vec<OutfitSuggestion> {
    let mut outfits = Vec::new();

    for line in reply.lines().filter(|line| line.contains('|')) {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 3 {
            continue;
        }
        let Some(clothing) = segment(&parts, "CLOTHING:") else {
            continue;
        };
        let Some(accessory_list) = segment(&parts, "ACCESSORIES:") else {
            continue;
        };
        let Some(tips) = segment(&parts, "TIPS:") else {
            continue;
        };

        let outfit = resolve_indices(clothing, mains, false);
        if outfit.is_empty() {
            continue;
        }
        let picked_accessories = resolve_indices(accessory_list, accessories, true);

        outfits.push(OutfitSuggestion {
            outfit,
            accessories: picked_accessories,
            styling_tip: tips.trim().to_string(),
        });
    }

    outfits.truncate(MAX_OUTFITS);
    outfits
}

fn segment<'a>(parts: &[&'a str], prefix: &str) -> Option<&'a str> {
    parts.iter().find_map(|part| part.trim().strip_prefix(prefix))
}

fn resolve_indices(csv: &str, pool: &[ClothingItem], accessory_prefix: bool) -> Vec<ClothingItem> {
    csv.split(',')
        .filter_map(|token| {
            let token = token.trim();
            let token = if accessory_prefix {
                token.strip_prefix('A').unwrap_or(token)
            } else {
                token
            };
            token.parse::<usize>().ok()
        })
        .filter(|&index| index >= 1 && index <= pool.len())
        .map(|index| pool[index - 1].clone())
        .collect()
}
