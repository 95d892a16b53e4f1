//! Prompt construction for the reasoning service. The numbered listings here
//! define the index space the reply parsers resolve against, so the pool
//! ordering handed in must be the same one kept for parsing.

use crate::prefs::PreferenceSnapshot;
use crate::wardrobe::ClothingItem;

const STYLIST_PREAMBLE: &str = "You are a professional fashion stylist and personal shopper with \
expertise in color theory, style coordination, and accessory pairing.";

/// The UI's "any" filter option means "no constraint".
pub fn normalize_constraint(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            None
        } else {
            Some(trimmed)
        }
    })
}

fn describe(item: &ClothingItem) -> String {
    format!(
        "{} ({}, {}, {}, {})",
        item.name,
        item.category,
        item.color
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "color not specified".to_string()),
        item.season
            .map(|s| s.to_string())
            .unwrap_or_else(|| "any season".to_string()),
        item.occasion
            .clone()
            .unwrap_or_else(|| "any occasion".to_string()),
    )
}

pub fn build_match_prompt(
    target: &ClothingItem,
    pool: &[ClothingItem],
    occasion: Option<&str>,
    weather: Option<&str>,
    prefs: &PreferenceSnapshot,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(STYLIST_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("I have this item: {}.\n", describe(target)));

    if let Some(occasion) = occasion {
        prompt.push_str(&format!("The occasion is: {}\n", occasion));
    }
    if let Some(weather) = weather {
        prompt.push_str(&format!("The weather is: {}\n", weather));
    }

    prompt.push_str("\nHere are my available clothing items and accessories:\n");
    for (i, item) in pool.iter().enumerate() {
        let liked = if prefs.is_liked(&item.id) {
            " [LIKED BY USER]"
        } else {
            ""
        };
        prompt.push_str(&format!("{}. {}{}\n", i + 1, describe(item), liked));
    }

    if prefs.has_liked() {
        prompt.push_str(
            "\nNote: Items marked with [LIKED BY USER] are preferred by the user and should be \
             prioritized when suitable.\n",
        );
    }

    prompt.push_str(&format!(
        "\nRecommend the best 6 items that would go well with my {}, considering color \
         coordination and complementary colors, style compatibility, occasion appropriateness, \
         seasonal suitability, accessory pairing, and the user's preferences.\n\n\
         For each recommendation provide the item number from the list above, a match score \
         (1-100), brief reasoning, and style advice for wearing them together.\n\n\
         Format your response as one line per match:\n\
         ITEM_NUMBER|SCORE|REASONING|ADVICE\n\n\
         Example:\n\
         1|95|The black leather jacket complements the blue jeans perfectly|Pair with white \
         sneakers for a relaxed vibe\n",
        target.category
    ));
    prompt
}

pub fn build_outfit_prompt(
    base: &ClothingItem,
    mains: &[ClothingItem],
    accessories: &[ClothingItem],
    occasion: Option<&str>,
    weather: Option<&str>,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(STYLIST_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Create 3 complete outfit suggestions built around this base item: {}.\n",
        describe(base)
    ));

    if let Some(occasion) = occasion {
        prompt.push_str(&format!("Occasion: {}\n", occasion));
    }
    if let Some(weather) = weather {
        prompt.push_str(&format!("Weather: {}\n", weather));
    }

    prompt.push_str("\nAvailable clothing:\n");
    for (i, item) in mains.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, describe(item)));
    }

    prompt.push_str("\nAvailable accessories:\n");
    for (i, item) in accessories.iter().enumerate() {
        prompt.push_str(&format!("A{}. {}\n", i + 1, describe(item)));
    }

    prompt.push_str(
        "\nFor each outfit suggest main clothing items that work together as a complete outfit \
         (use numbers from the list), accessories that complement the ENTIRE outfit rather than \
         individual pieces (use A numbers from the list), and styling tips explaining how the \
         accessories work with the complete outfit. Consider color harmony across all pieces.\n\n\
         Format: OUTFIT_1|CLOTHING:1,2,3|ACCESSORIES:A1,A2|TIPS:styling advice here\n",
    );
    prompt
}
