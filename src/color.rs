use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed palette of named colors plus a free-text escape hatch.
/// Unknown labels are kept as `Other` so user-entered colors still take part
/// in exact-match comparisons, they just never count as complementary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Pink,
    Brown,
    Grey,
    Navy,
    Beige,
    Other(String),
}

/// Reference table for nearest-neighbor classification.
/// Declaration order matters: on an exact distance tie the earlier entry wins.
pub const PALETTE: [(Color, (u8, u8, u8)); 13] = [
    (Color::Black, (0, 0, 0)),
    (Color::White, (255, 255, 255)),
    (Color::Red, (255, 0, 0)),
    (Color::Green, (0, 255, 0)),
    (Color::Blue, (0, 0, 255)),
    (Color::Yellow, (255, 255, 0)),
    (Color::Purple, (128, 0, 128)),
    (Color::Orange, (255, 165, 0)),
    (Color::Pink, (255, 192, 203)),
    (Color::Brown, (165, 42, 42)),
    (Color::Grey, (128, 128, 128)),
    (Color::Navy, (0, 0, 128)),
    (Color::Beige, (245, 245, 220)),
];

/// Maps a sampled pixel to the nearest palette color in RGB space.
/// Squared Euclidean distance; deterministic and pure.
pub fn classify_rgb(r: u8, g: u8, b: u8) -> Color {
    let mut best = PALETTE[0].0.clone();
    let mut best_dist = u32::MAX;
    for (name, (pr, pg, pb)) in PALETTE.iter() {
        let dr = r as i32 - *pr as i32;
        let dg = g as i32 - *pg as i32;
        let db = b as i32 - *pb as i32;
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best = name.clone();
        }
    }
    best
}

impl Color {
    /// Normalizes a free-text label into the palette, falling back to `Other`.
    pub fn parse(label: &str) -> Color {
        let norm = label.trim().to_lowercase();
        match norm.as_str() {
            "black" => Color::Black,
            "white" => Color::White,
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "yellow" => Color::Yellow,
            "purple" => Color::Purple,
            "orange" => Color::Orange,
            "pink" => Color::Pink,
            "brown" => Color::Brown,
            "grey" | "gray" => Color::Grey,
            "navy" => Color::Navy,
            "beige" => Color::Beige,
            _ => Color::Other(norm),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Grey => "grey",
            Color::Navy => "navy",
            Color::Beige => "beige",
            Color::Other(label) => label,
        }
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
