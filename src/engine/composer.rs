use super::{OutfitSuggestion, MAX_OUTFITS, MAX_OUTFIT_ACCESSORIES};
use crate::rules;
use crate::wardrobe::ClothingItem;

/// Partitions a candidate pool into (main garments, accessories) by the fixed
/// category membership test.
pub fn split_pools(pool: Vec<ClothingItem>) -> (Vec<ClothingItem>, Vec<ClothingItem>) {
    pool.into_iter()
        .partition(|item| !item.category.is_accessory())
}

/// Rule-based outfit composition for degraded mode: pair the base item with
/// each compatible main garment in pool order, then dress the pair with up to
/// two harmonizing accessories. Tips are synthesized deterministically.
pub fn fallback_outfits(
    base: &ClothingItem,
    mains: &[ClothingItem],
    accessories: &[ClothingItem],
    occasion: Option<&str>,
) -> Vec<OutfitSuggestion> {
    let compatible = mains.iter().filter(|item| {
        rules::category_differs(&base.category, &item.category)
            && (rules::colors_pair(base.color.as_ref(), item.color.as_ref())
                || rules::occasion_compatible(occasion, item.occasion.as_deref()))
    });

    let mut suggestions = Vec::new();
    for partner in compatible.take(MAX_OUTFITS) {
        let picked: Vec<ClothingItem> = accessories
            .iter()
            .filter(|acc| {
                accessory_harmonizes(acc, base, partner)
                    && rules::occasion_compatible(occasion, acc.occasion.as_deref())
            })
            .take(MAX_OUTFIT_ACCESSORIES)
            .cloned()
            .collect();

        let tip = format!(
            "Complete outfit coordination: {} ({}) paired with {} ({}). Accessories chosen to \
             complement both pieces for a cohesive look.{}",
            base.name,
            color_label(base),
            partner.name,
            color_label(partner),
            occasion
                .map(|o| format!(" Perfect for {} occasions.", o))
                .unwrap_or_default(),
        );

        suggestions.push(OutfitSuggestion {
            outfit: vec![base.clone(), partner.clone()],
            accessories: picked,
            styling_tip: tip,
        });
    }
    suggestions
}

/// An accessory works when its color pairs with either garment, or it is one
/// of the neutral colors that go with any outfit.
fn accessory_harmonizes(acc: &ClothingItem, base: &ClothingItem, partner: &ClothingItem) -> bool {
    rules::colors_pair(acc.color.as_ref(), base.color.as_ref())
        || rules::colors_pair(acc.color.as_ref(), partner.color.as_ref())
        || acc.color.as_ref().is_some_and(rules::is_neutral)
}

fn color_label(item: &ClothingItem) -> String {
    item.color
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unspecified".to_string())
}
