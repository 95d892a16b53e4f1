//! Pure compatibility heuristics shared by the fallback matcher and the
//! outfit composer. No external calls; unit-testable in isolation.

use crate::color::Color;
use crate::wardrobe::{Category, ClothingItem, Season};

/// Symmetric complementary pairs. `Other` colors never count.
const COMPLEMENTARY_PAIRS: [(Color, Color); 6] = [
    (Color::Black, Color::White),
    (Color::Navy, Color::Beige),
    (Color::Blue, Color::Orange),
    (Color::Red, Color::Green),
    (Color::Purple, Color::Yellow),
    (Color::Pink, Color::Grey),
];

/// Colors that pair with any outfit when picking accessories.
pub const NEUTRALS: [Color; 6] = [
    Color::Black,
    Color::White,
    Color::Grey,
    Color::Brown,
    Color::Beige,
    Color::Navy,
];

pub fn is_complementary(a: &Color, b: &Color) -> bool {
    COMPLEMENTARY_PAIRS
        .iter()
        .any(|(x, y)| (a == x && b == y) || (a == y && b == x))
}

pub fn is_neutral(color: &Color) -> bool {
    NEUTRALS.contains(color)
}

pub fn category_differs(a: &Category, b: &Category) -> bool {
    a != b
}

/// Equal or complementary. Two unspecified colors compare equal, keeping the
/// lenient equality the persistence boundary has always had.
pub fn colors_pair(a: Option<&Color>, b: Option<&Color>) -> bool {
    a == b || matches!((a, b), (Some(x), Some(y)) if is_complementary(x, y))
}

/// An unset occasion on either side is not a conflict.
pub fn occasion_compatible(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

pub fn season_matches(a: Option<Season>, b: Option<Season>) -> bool {
    a == b || a == Some(Season::All) || b == Some(Season::All)
}

/// Candidate filter for the fallback matcher: a different category, plus
/// either a color pairing or no occasion conflict.
pub fn is_compatible(target: &ClothingItem, candidate: &ClothingItem) -> bool {
    category_differs(&target.category, &candidate.category)
        && (colors_pair(target.color.as_ref(), candidate.color.as_ref())
            || occasion_compatible(target.occasion.as_deref(), candidate.occasion.as_deref()))
}

/// Rule score for a candidate against the target. Unbounded above 100; the
/// caller clamps.
///
/// +30 exact color, else +25 complementary; +20 exact occasion; +15 season
/// match or either all-season; +10 differing category.
pub fn score_shallow(target: &ClothingItem, candidate: &ClothingItem) -> u32 {
    let mut score = 0;

    if target.color == candidate.color {
        score += 30;
    } else if matches!(
        (target.color.as_ref(), candidate.color.as_ref()),
        (Some(a), Some(b)) if is_complementary(a, b)
    ) {
        score += 25;
    }

    if target.occasion == candidate.occasion {
        score += 20;
    }

    if season_matches(target.season, candidate.season) {
        score += 15;
    }

    if category_differs(&target.category, &candidate.category) {
        score += 10;
    }

    score
}
