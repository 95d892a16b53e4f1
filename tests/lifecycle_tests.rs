use std::sync::Arc;

use attire::lifecycle::LifecycleTracker;
use attire::wardrobe::{Category, ClothingItem, InMemoryWardrobe, UserId, WardrobeStore};

fn setup() -> (Arc<dyn WardrobeStore>, LifecycleTracker, UserId) {
    let store: Arc<dyn WardrobeStore> = Arc::new(InMemoryWardrobe::new());
    let tracker = LifecycleTracker::new(store.clone());
    (store, tracker, UserId::new("tester"))
}

#[test]
fn use_below_threshold_only_bumps_the_counter() {
    let (store, tracker, user) = setup();
    let item = ClothingItem::new(user, "Tee", Category::Tops);
    store.insert(item.clone()).unwrap();

    let updated = tracker.record_use(&item.id).unwrap();
    assert_eq!(updated.current_uses, 1);
    assert!(!updated.in_wash);
}

#[test]
fn reaching_max_uses_flips_into_wash_atomically() {
    let (store, tracker, user) = setup();
    let mut item = ClothingItem::new(user, "Tee", Category::Tops);
    item.current_uses = 9;
    item.max_uses = 10;
    store.insert(item.clone()).unwrap();

    let updated = tracker.record_use(&item.id).unwrap();
    assert_eq!(updated.current_uses, 10);
    assert!(updated.in_wash);

    // The store agrees; both fields changed in one update.
    let stored = store.get(&item.id).unwrap();
    assert_eq!(stored.current_uses, 10);
    assert!(stored.in_wash);
}

#[test]
fn use_while_in_wash_keeps_the_state() {
    let (store, tracker, user) = setup();
    let mut item = ClothingItem::new(user, "Tee", Category::Tops);
    item.current_uses = 10;
    item.in_wash = true;
    store.insert(item.clone()).unwrap();

    let updated = tracker.record_use(&item.id).unwrap();
    assert_eq!(updated.current_uses, 11);
    assert!(updated.in_wash);
}

#[test]
fn send_to_wash_ignores_the_counter() {
    let (store, tracker, user) = setup();
    let mut item = ClothingItem::new(user, "Tee", Category::Tops);
    item.current_uses = 2;
    store.insert(item.clone()).unwrap();

    let updated = tracker.send_to_wash(&item.id).unwrap();
    assert!(updated.in_wash);
    assert_eq!(updated.current_uses, 2);
}

#[test]
fn mark_clean_resets_counter_and_state() {
    let (store, tracker, user) = setup();
    let mut item = ClothingItem::new(user, "Tee", Category::Tops);
    item.current_uses = 7;
    item.in_wash = true;
    store.insert(item.clone()).unwrap();

    let updated = tracker.mark_clean(&item.id).unwrap();
    assert_eq!(updated.current_uses, 0);
    assert!(!updated.in_wash);
}

#[test]
fn mark_all_clean_only_touches_the_wash_bin() {
    let (store, tracker, user) = setup();
    let mut washing_a = ClothingItem::new(user.clone(), "A", Category::Tops);
    washing_a.in_wash = true;
    washing_a.current_uses = 10;
    let mut washing_b = ClothingItem::new(user.clone(), "B", Category::Bottoms);
    washing_b.in_wash = true;
    washing_b.current_uses = 3;
    let mut clean = ClothingItem::new(user.clone(), "C", Category::Shoes);
    clean.current_uses = 4;

    for item in [&washing_a, &washing_b, &clean] {
        store.insert((*item).clone()).unwrap();
    }

    let cleaned = tracker.mark_all_clean(&user).unwrap();
    assert_eq!(cleaned.len(), 2);
    assert!(store.wash_bin(&user).unwrap().is_empty());

    // The available item kept its counter.
    assert_eq!(store.get(&clean.id).unwrap().current_uses, 4);
}

#[test]
fn record_outfit_use_touches_every_member() {
    let (store, tracker, user) = setup();
    let tee = ClothingItem::new(user.clone(), "Tee", Category::Tops);
    let jeans = ClothingItem::new(user.clone(), "Jeans", Category::Bottoms);
    store.insert(tee.clone()).unwrap();
    store.insert(jeans.clone()).unwrap();

    let updated = tracker.record_outfit_use(&[tee.id, jeans.id]).unwrap();
    assert_eq!(updated.len(), 2);
    assert!(updated.iter().all(|item| item.current_uses == 1));
}

#[test]
fn racing_use_events_do_not_lose_counts() {
    let (store, tracker, user) = setup();
    let mut item = ClothingItem::new(user, "Tee", Category::Tops);
    item.max_uses = 10;
    store.insert(item.clone()).unwrap();

    let tracker = Arc::new(tracker);
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let tracker = tracker.clone();
            let id = item.id;
            std::thread::spawn(move || tracker.record_use(&id).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stored = store.get(&item.id).unwrap();
    assert_eq!(stored.current_uses, 10);
    assert!(stored.in_wash);
}
