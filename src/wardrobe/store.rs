use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

use super::item::{ClothingItem, ItemId, SavedOutfit, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence seam for the wardrobe collection and saved outfits.
///
/// `update_item` is the single mutation primitive for lifecycle changes: the
/// closure runs under the store's own lock, so a read-modify-write (e.g. a
/// use-count increment plus the wash flip) lands as one atomic update and
/// racing use events cannot lose counts.
pub trait WardrobeStore: Send + Sync {
    fn insert(&self, item: ClothingItem) -> Result<(), StoreError>;
    fn get(&self, id: &ItemId) -> Result<ClothingItem, StoreError>;
    fn remove(&self, id: &ItemId) -> Result<(), StoreError>;
    /// The owner's wardrobe, newest first.
    fn items_for(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError>;
    /// Items currently in the wash, most recently updated first.
    fn wash_bin(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError>;
    fn update_item(
        &self,
        id: &ItemId,
        apply: &mut dyn FnMut(&mut ClothingItem),
    ) -> Result<ClothingItem, StoreError>;
    fn save_outfit(&self, outfit: SavedOutfit) -> Result<(), StoreError>;
    fn outfits_for(&self, owner: &UserId) -> Result<Vec<SavedOutfit>, StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WardrobeState {
    items: Vec<ClothingItem>,
    outfits: Vec<SavedOutfit>,
}

impl WardrobeState {
    fn position(&self, id: &ItemId) -> Result<usize, StoreError> {
        self.items
            .iter()
            .position(|item| item.id == *id)
            .ok_or(StoreError::NotFound)
    }

    fn items_for(&self, owner: &UserId) -> Vec<ClothingItem> {
        let mut items: Vec<ClothingItem> = self
            .items
            .iter()
            .filter(|item| item.owner == *owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    fn wash_bin(&self, owner: &UserId) -> Vec<ClothingItem> {
        let mut items: Vec<ClothingItem> = self
            .items
            .iter()
            .filter(|item| item.owner == *owner && item.in_wash)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }

    fn outfits_for(&self, owner: &UserId) -> Vec<SavedOutfit> {
        let mut outfits: Vec<SavedOutfit> = self
            .outfits
            .iter()
            .filter(|outfit| outfit.owner == *owner)
            .cloned()
            .collect();
        outfits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        outfits
    }
}

/// Session-scoped store backed by a plain in-memory vector.
#[derive(Debug, Default)]
pub struct InMemoryWardrobe {
    state: Mutex<WardrobeState>,
}

impl InMemoryWardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WardrobeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WardrobeStore for InMemoryWardrobe {
    fn insert(&self, item: ClothingItem) -> Result<(), StoreError> {
        self.lock().items.push(item);
        Ok(())
    }

    fn get(&self, id: &ItemId) -> Result<ClothingItem, StoreError> {
        let state = self.lock();
        let pos = state.position(id)?;
        Ok(state.items[pos].clone())
    }

    fn remove(&self, id: &ItemId) -> Result<(), StoreError> {
        let mut state = self.lock();
        let pos = state.position(id)?;
        state.items.remove(pos);
        Ok(())
    }

    fn items_for(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.lock().items_for(owner))
    }

    fn wash_bin(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.lock().wash_bin(owner))
    }

    fn update_item(
        &self,
        id: &ItemId,
        apply: &mut dyn FnMut(&mut ClothingItem),
    ) -> Result<ClothingItem, StoreError> {
        let mut state = self.lock();
        let pos = state.position(id)?;
        let item = &mut state.items[pos];
        apply(item);
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    fn save_outfit(&self, outfit: SavedOutfit) -> Result<(), StoreError> {
        self.lock().outfits.push(outfit);
        Ok(())
    }

    fn outfits_for(&self, owner: &UserId) -> Result<Vec<SavedOutfit>, StoreError> {
        Ok(self.lock().outfits_for(owner))
    }
}

/// File-backed store persisting the whole wardrobe as JSON. Loads on open,
/// writes after every mutation. The write happens against a scratch copy and
/// the in-memory state is only swapped on success, so a failed write never
/// leaves a half-applied mutation behind.
pub struct FileWardrobe {
    path: PathBuf,
    state: Mutex<WardrobeState>,
}

impl FileWardrobe {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let state = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            WardrobeState::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WardrobeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, state: &WardrobeState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Commit protocol for every mutation: mutate a scratch copy, persist it,
    /// then swap it in.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut WardrobeState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.lock();
        let mut next = state.clone();
        let result = mutate(&mut next)?;
        self.persist(&next)?;
        *state = next;
        Ok(result)
    }
}

impl WardrobeStore for FileWardrobe {
    fn insert(&self, item: ClothingItem) -> Result<(), StoreError> {
        self.commit(|state| {
            state.items.push(item);
            Ok(())
        })
    }

    fn get(&self, id: &ItemId) -> Result<ClothingItem, StoreError> {
        let state = self.lock();
        let pos = state.position(id)?;
        Ok(state.items[pos].clone())
    }

    fn remove(&self, id: &ItemId) -> Result<(), StoreError> {
        self.commit(|state| {
            let pos = state.position(id)?;
            state.items.remove(pos);
            Ok(())
        })
    }

    fn items_for(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.lock().items_for(owner))
    }

    fn wash_bin(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.lock().wash_bin(owner))
    }

    fn update_item(
        &self,
        id: &ItemId,
        apply: &mut dyn FnMut(&mut ClothingItem),
    ) -> Result<ClothingItem, StoreError> {
        self.commit(|state| {
            let pos = state.position(id)?;
            let item = &mut state.items[pos];
            apply(item);
            item.updated_at = Utc::now();
            Ok(item.clone())
        })
    }

    fn save_outfit(&self, outfit: SavedOutfit) -> Result<(), StoreError> {
        self.commit(|state| {
            state.outfits.push(outfit);
            Ok(())
        })
    }

    fn outfits_for(&self, owner: &UserId) -> Result<Vec<SavedOutfit>, StoreError> {
        Ok(self.lock().outfits_for(owner))
    }
}
