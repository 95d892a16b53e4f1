pub mod item;
pub mod store;

pub use item::{Category, ClothingItem, ItemId, SavedOutfit, Season, UserId, DEFAULT_MAX_USES};
pub use store::{FileWardrobe, InMemoryWardrobe, StoreError, WardrobeStore};
