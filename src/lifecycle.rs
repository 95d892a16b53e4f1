use std::sync::Arc;
use tracing::info;

use crate::wardrobe::{ClothingItem, ItemId, StoreError, UserId, WardrobeStore};

/// Drives the Available <-> InWash cycle. Every transition goes through
/// `WardrobeStore::update_item`, so the counter bump and the wash flip land
/// as one atomic update and racing use events cannot lose counts.
pub struct LifecycleTracker {
    store: Arc<dyn WardrobeStore>,
}

impl LifecycleTracker {
    pub fn new(store: Arc<dyn WardrobeStore>) -> Self {
        Self { store }
    }

    /// Record one wear. Reaching `max_uses` flips the item into the wash in
    /// the same update. A use against an item already in the wash only bumps
    /// the counter; the state does not change.
    pub fn record_use(&self, id: &ItemId) -> Result<ClothingItem, StoreError> {
        let updated = self.store.update_item(id, &mut |item| {
            item.current_uses = item.current_uses.saturating_add(1);
            if item.current_uses >= item.max_uses {
                item.in_wash = true;
            }
        })?;
        if updated.in_wash && updated.current_uses == updated.max_uses {
            info!(item = %updated.name, "item reached its wear limit, moved to wash");
        }
        Ok(updated)
    }

    /// Record a wear for every member of a worn outfit, each as its own
    /// atomic update.
    pub fn record_outfit_use(&self, ids: &[ItemId]) -> Result<Vec<ClothingItem>, StoreError> {
        ids.iter().map(|id| self.record_use(id)).collect()
    }

    /// Manual send-to-wash, regardless of the counter value.
    pub fn send_to_wash(&self, id: &ItemId) -> Result<ClothingItem, StoreError> {
        self.store.update_item(id, &mut |item| item.in_wash = true)
    }

    /// Back to Available with a fresh counter.
    pub fn mark_clean(&self, id: &ItemId) -> Result<ClothingItem, StoreError> {
        self.store.update_item(id, &mut |item| {
            item.in_wash = false;
            item.current_uses = 0;
        })
    }

    /// Bulk mark-clean for everything in the owner's wash bin.
    pub fn mark_all_clean(&self, owner: &UserId) -> Result<Vec<ClothingItem>, StoreError> {
        let bin = self.store.wash_bin(owner)?;
        bin.iter().map(|item| self.mark_clean(&item.id)).collect()
    }
}
