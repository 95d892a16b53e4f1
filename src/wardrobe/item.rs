use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::color::Color;

/// Wear count at which a fresh item goes to the wash automatically.
pub const DEFAULT_MAX_USES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque user scope handed over by the auth collaborator. Never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed category set. `Other` absorbs labels from outside the set so the
/// boundary never rejects an upload outright.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Bags,
    Jewelry,
    Watches,
    Belts,
    Scarves,
    Hats,
    Sunglasses,
    Ties,
    HairAccessories,
    Gloves,
    Socks,
    Underwear,
    Other(String),
}

impl Category {
    pub fn parse(label: &str) -> Category {
        let norm = label.trim().to_lowercase();
        match norm.as_str() {
            "tops" => Category::Tops,
            "bottoms" => Category::Bottoms,
            "dresses" => Category::Dresses,
            "outerwear" => Category::Outerwear,
            "shoes" => Category::Shoes,
            "bags" => Category::Bags,
            "jewelry" => Category::Jewelry,
            "watches" => Category::Watches,
            "belts" => Category::Belts,
            "scarves" => Category::Scarves,
            "hats" => Category::Hats,
            "sunglasses" => Category::Sunglasses,
            "ties" => Category::Ties,
            "hair accessories" => Category::HairAccessories,
            "gloves" => Category::Gloves,
            "socks" => Category::Socks,
            "underwear" => Category::Underwear,
            _ => Category::Other(norm),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Bags => "bags",
            Category::Jewelry => "jewelry",
            Category::Watches => "watches",
            Category::Belts => "belts",
            Category::Scarves => "scarves",
            Category::Hats => "hats",
            Category::Sunglasses => "sunglasses",
            Category::Ties => "ties",
            Category::HairAccessories => "hair accessories",
            Category::Gloves => "gloves",
            Category::Socks => "socks",
            Category::Underwear => "underwear",
            Category::Other(label) => label,
        }
    }

    /// Fixed membership test partitioning the outfit pools: these categories
    /// land in the accessory pool, everything else is a main garment.
    pub fn is_accessory(&self) -> bool {
        matches!(
            self,
            Category::Bags
                | Category::Jewelry
                | Category::Watches
                | Category::Belts
                | Category::Scarves
                | Category::Hats
                | Category::Sunglasses
        )
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    #[serde(rename = "all season")]
    All,
}

impl Season {
    /// Lenient boundary parse; unrecognized labels become "no season".
    pub fn parse(label: &str) -> Option<Season> {
        match label.trim().to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" | "fall" => Some(Season::Autumn),
            "winter" => Some(Season::Winter),
            "all season" | "all-season" | "all" => Some(Season::All),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::All => "all season",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One garment or accessory in the wardrobe. Created on upload, mutated by
/// lifecycle events, deleted on explicit removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    pub owner: UserId,
    pub name: String,
    pub category: Category,
    pub color: Option<Color>,
    pub season: Option<Season>,
    pub occasion: Option<String>,
    /// Opaque reference supplied by the upload/storage collaborator.
    pub image_ref: Option<String>,
    pub current_uses: u32,
    pub max_uses: u32,
    pub in_wash: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClothingItem {
    pub fn new(owner: UserId, name: impl Into<String>, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            owner,
            name: name.into(),
            category,
            color: None,
            season: None,
            occasion: None,
            image_ref: None,
            current_uses: 0,
            max_uses: DEFAULT_MAX_USES,
            in_wash: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn uses_remaining(&self) -> u32 {
        self.max_uses.saturating_sub(self.current_uses)
    }
}

/// A suggestion the user chose to keep. Unlike match results and outfit
/// suggestions, which are recomputed per query, this is a persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutfit {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub description: String,
    pub occasion: Option<String>,
    pub items: Vec<ItemId>,
    pub created_at: DateTime<Utc>,
}

impl SavedOutfit {
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
        occasion: Option<String>,
        items: Vec<ItemId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            description: description.into(),
            occasion,
            items,
            created_at: Utc::now(),
        }
    }
}
