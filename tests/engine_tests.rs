use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

use attire::color::Color;
use attire::engine::{EngineMode, QueryOutcome, StyleRequest, StylistEngine};
use attire::prefs::PreferenceSnapshot;
use attire::reasoning::{ReasoningError, ReasoningService};
use attire::wardrobe::{Category, ClothingItem, InMemoryWardrobe, ItemId, UserId, WardrobeStore};

/// Pops one scripted reply per call; counts invocations.
struct ScriptedService {
    replies: Mutex<VecDeque<Result<String, ReasoningError>>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Ok(reply.to_string())])),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(error: ReasoningError) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Err(error)])),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReasoningService for ScriptedService {
    fn complete(&self, _prompt: &str) -> impl Future<Output = Result<String, ReasoningError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ReasoningError::EmptyReply));
        async move { next }
    }
}

/// Completes after a per-call delay, for staleness tests.
struct SlowService {
    delays: Mutex<VecDeque<u64>>,
    reply: String,
}

impl ReasoningService for SlowService {
    fn complete(&self, _prompt: &str) -> impl Future<Output = Result<String, ReasoningError>> + Send {
        let delay = self.delays.lock().unwrap().pop_front().unwrap_or(0);
        let reply = self.reply.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(reply)
        }
    }
}

/// Wardrobe with a target jacket plus a tee (newest), jeans, and a red dress
/// already in the wash. Candidate pool order is therefore [tee, jeans].
fn seed() -> (
    Arc<dyn WardrobeStore>,
    UserId,
    ClothingItem,
    ClothingItem,
    ClothingItem,
    ClothingItem,
) {
    let store: Arc<dyn WardrobeStore> = Arc::new(InMemoryWardrobe::new());
    let user = UserId::new("tester");
    let now = Utc::now();

    let jacket = ClothingItem::new(user.clone(), "Blue Denim Jacket", Category::Outerwear)
        .with_color(Color::Blue)
        .with_occasion("casual");
    let mut tee = ClothingItem::new(user.clone(), "White T-Shirt", Category::Tops)
        .with_color(Color::White)
        .with_occasion("casual");
    tee.created_at = now;
    let mut jeans = ClothingItem::new(user.clone(), "Black Jeans", Category::Bottoms)
        .with_color(Color::Black)
        .with_occasion("casual");
    jeans.created_at = now - ChronoDuration::minutes(1);
    let mut dress = ClothingItem::new(user.clone(), "Red Dress", Category::Dresses)
        .with_color(Color::Red);
    dress.created_at = now - ChronoDuration::minutes(2);
    dress.in_wash = true;

    for item in [&jacket, &tee, &jeans, &dress] {
        store.insert((*item).clone()).unwrap();
    }
    (store, user, jacket, tee, jeans, dress)
}

fn request(user: &UserId, target: &ClothingItem) -> StyleRequest {
    StyleRequest {
        owner: user.clone(),
        target: target.id,
        occasion: None,
        weather: None,
        prefs: PreferenceSnapshot::new(),
    }
}

#[tokio::test]
async fn remote_reply_resolves_against_the_pool() {
    let (store, user, jacket, tee, jeans, _) = seed();
    let service = ScriptedService::replying("1|95|Crisp contrast|Wear boots\n2|80|Solid base|Roll the cuffs");
    let engine = StylistEngine::new(store, service.clone());

    let outcome = engine.get_matches(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };

    assert_eq!(report.mode, EngineMode::Remote);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].item.id, tee.id);
    assert_eq!(report.results[0].match_score, 95);
    assert_eq!(report.results[1].item.id, jeans.id);
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn rate_limit_degrades_to_basic_matching() {
    let (store, user, jacket, tee, jeans, dress) = seed();
    let service = ScriptedService::failing(ReasoningError::RateLimited);
    let engine = StylistEngine::new(store, service);

    let outcome = engine.get_matches(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };

    assert_eq!(report.mode, EngineMode::Degraded);
    let ids: Vec<ItemId> = report.results.iter().map(|r| r.item.id).collect();
    assert!(ids.contains(&tee.id));
    assert!(ids.contains(&jeans.id));
    // The in-wash dress and the target itself never appear.
    assert!(!ids.contains(&dress.id));
    assert!(!ids.contains(&jacket.id));
}

#[tokio::test]
async fn server_errors_also_degrade() {
    let (store, user, jacket, ..) = seed();
    let service = ScriptedService::failing(ReasoningError::Server { status: 500 });
    let engine = StylistEngine::new(store, service);

    let outcome = engine.get_matches(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert_eq!(report.mode, EngineMode::Degraded);
    assert!(!report.results.is_empty());
}

#[tokio::test]
async fn unparsable_reply_is_no_results_not_degraded() {
    let (store, user, jacket, ..) = seed();
    let service = ScriptedService::replying("I would recommend the white t-shirt.");
    let engine = StylistEngine::new(store, service);

    let outcome = engine.get_matches(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert_eq!(report.mode, EngineMode::Remote);
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn empty_pool_short_circuits_without_a_remote_call() {
    let store: Arc<dyn WardrobeStore> = Arc::new(InMemoryWardrobe::new());
    let user = UserId::new("tester");
    let jacket = ClothingItem::new(user.clone(), "Jacket", Category::Outerwear);
    store.insert(jacket.clone()).unwrap();

    let service = ScriptedService::replying("1|90|r|a");
    let engine = StylistEngine::new(store, service.clone());

    let outcome = engine.get_matches(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert!(report.results.is_empty());
    assert_eq!(report.mode, EngineMode::Remote);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn missing_target_short_circuits_without_a_remote_call() {
    let (store, user, jacket, ..) = seed();
    let service = ScriptedService::replying("1|90|r|a");
    let engine = StylistEngine::new(store, service.clone());

    let mut req = request(&user, &jacket);
    req.target = ItemId::new();
    let outcome = engine.get_matches(&req).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert!(report.results.is_empty());
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn disliked_items_never_reach_the_pool() {
    let (store, user, jacket, _, jeans, _) = seed();
    let service = ScriptedService::failing(ReasoningError::RateLimited);
    let engine = StylistEngine::new(store, service);

    let mut req = request(&user, &jacket);
    req.prefs.toggle_dislike(jeans.id);

    let outcome = engine.get_matches(&req).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert!(report.results.iter().all(|r| r.item.id != jeans.id));
}

#[tokio::test]
async fn liked_items_lead_the_prompt_index_space() {
    let (store, user, jacket, _, jeans, _) = seed();
    // With jeans liked, the pool reorders to [jeans, tee]; index 1 is jeans.
    let service = ScriptedService::replying("1|90|r|a");
    let engine = StylistEngine::new(store, service);

    let mut req = request(&user, &jacket);
    req.prefs.toggle_like(jeans.id);

    let outcome = engine.get_matches(&req).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].item.id, jeans.id);
}

#[tokio::test]
async fn superseded_queries_discard_their_results() {
    let (store, user, jacket, ..) = seed();
    let service = Arc::new(SlowService {
        delays: Mutex::new(VecDeque::from([150, 0])),
        reply: "1|90|r|a".to_string(),
    });
    let engine = Arc::new(StylistEngine::new(store, service));
    let req = request(&user, &jacket);

    let first = {
        let engine = engine.clone();
        let req = req.clone();
        tokio::spawn(async move { engine.get_matches(&req).await.unwrap() })
    };
    // Let the first query reach its remote call before starting the second.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = engine.get_matches(&req).await.unwrap();
    assert!(matches!(second, QueryOutcome::Fresh(_)));
    assert_eq!(first.await.unwrap(), QueryOutcome::Superseded);
}

#[tokio::test]
async fn accepted_suggestions_can_be_saved() {
    let (store, user, jacket, tee, ..) = seed();
    let service = ScriptedService::failing(ReasoningError::RateLimited);
    let engine = StylistEngine::new(store.clone(), service);

    let outcome = engine.suggest_outfits(&request(&user, &jacket)).await.unwrap();
    let QueryOutcome::Fresh(report) = outcome else {
        panic!("expected fresh results");
    };
    assert_eq!(report.mode, EngineMode::Degraded);
    let suggestion = report.suggestions.first().expect("at least one outfit");

    let saved = engine
        .save_suggestion(&user, suggestion, Some("casual"))
        .unwrap();
    assert!(saved.items.contains(&jacket.id));
    assert!(saved.items.contains(&tee.id) || saved.items.len() >= 2);

    let stored = store.outfits_for(&user).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, saved.id);
}
