//! Query orchestration: remote reasoning preferred, rule-based matching as
//! the degraded-mode fallback, with per-query staleness tokens.

pub mod composer;
pub mod matcher;

pub use composer::{fallback_outfits, split_pools};
pub use matcher::basic_matches;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::prefs::PreferenceSnapshot;
use crate::reasoning::{parse, prompt, ReasoningService};
use crate::wardrobe::{ClothingItem, ItemId, SavedOutfit, StoreError, UserId, WardrobeStore};

pub const MAX_MATCHES: usize = 6;
pub const MAX_OUTFITS: usize = 3;
pub const MAX_OUTFIT_ACCESSORIES: usize = 2;

/// One companion suggestion. Ephemeral: recomputed per query, never the
/// canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub item: ClothingItem,
    /// Always within [0, 100].
    pub match_score: u8,
    pub reasoning: String,
    pub advice: String,
}

/// A whole-outfit bundle: main garments (base item first) plus accessories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitSuggestion {
    pub outfit: Vec<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
    pub styling_tip: String,
}

/// Which path produced a report. `Degraded` means the reasoning service was
/// unavailable and the local rule-based engine answered instead; callers must
/// present it differently from an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Remote,
    Degraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub results: Vec<MatchResult>,
    pub mode: EngineMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutfitReport {
    pub suggestions: Vec<OutfitSuggestion>,
    pub mode: EngineMode,
}

/// Separates results that are still wanted from results of a query the user
/// has already superseded; superseded results must be discarded, not applied.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
    Fresh(T),
    Superseded,
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// Fatal for this action; nothing was partially applied.
    #[error("wardrobe store failure: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken(u64);

/// Monotonic token source. A token stays current until the next query begins,
/// so anything resolved after a newer query started can be detected as stale.
#[derive(Debug, Default)]
pub struct QueryTracker {
    counter: AtomicU64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryToken {
        QueryToken(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: QueryToken) -> bool {
        self.counter.load(Ordering::SeqCst) == token.0
    }
}

/// What the UI hands the engine for either query kind.
#[derive(Debug, Clone)]
pub struct StyleRequest {
    pub owner: UserId,
    pub target: ItemId,
    pub occasion: Option<String>,
    pub weather: Option<String>,
    pub prefs: PreferenceSnapshot,
}

/// The recommendation engine for one UI session. Remote and fallback paths
/// are strictly sequential within a query; independent queries may overlap
/// but each works on its own pool snapshot.
pub struct StylistEngine<S: ReasoningService> {
    store: Arc<dyn WardrobeStore>,
    remote: S,
    queries: QueryTracker,
}

impl<S: ReasoningService> StylistEngine<S> {
    pub fn new(store: Arc<dyn WardrobeStore>, remote: S) -> Self {
        Self {
            store,
            remote,
            queries: QueryTracker::new(),
        }
    }

    /// Candidate pool for one query: the owner's wardrobe minus the target
    /// itself, items in the wash, and disliked items. Fetched fresh per call.
    fn candidate_pool(&self, request: &StyleRequest) -> Result<Vec<ClothingItem>, EngineError> {
        let mut pool = self.store.items_for(&request.owner)?;
        pool.retain(|item| {
            item.id != request.target && !item.in_wash && !request.prefs.is_disliked(&item.id)
        });
        Ok(pool)
    }

    fn target_item(&self, request: &StyleRequest) -> Result<Option<ClothingItem>, EngineError> {
        match self.store.get(&request.target) {
            Ok(item) => Ok(Some(item)),
            Err(StoreError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Ranked companion items for the target. Prefers the reasoning service;
    /// any remote failure degrades to the rule-based matcher. A missing
    /// target or an empty candidate pool short-circuits to an empty report
    /// without touching the remote service.
    pub async fn get_matches(
        &self,
        request: &StyleRequest,
    ) -> Result<QueryOutcome<MatchReport>, EngineError> {
        let token = self.queries.begin();

        let Some(target) = self.target_item(request)? else {
            return Ok(QueryOutcome::Fresh(MatchReport {
                results: Vec::new(),
                mode: EngineMode::Remote,
            }));
        };
        let mut pool = self.candidate_pool(request)?;
        if pool.is_empty() {
            return Ok(QueryOutcome::Fresh(MatchReport {
                results: Vec::new(),
                mode: EngineMode::Remote,
            }));
        }

        // Liked items first. The prompt annotates them, and this same pool
        // ordering is what reply indices resolve against.
        pool.sort_by_key(|item| !request.prefs.is_liked(&item.id));

        let occasion = prompt::normalize_constraint(request.occasion.clone());
        let weather = prompt::normalize_constraint(request.weather.clone());
        let text = prompt::build_match_prompt(
            &target,
            &pool,
            occasion.as_deref(),
            weather.as_deref(),
            &request.prefs,
        );

        match self.remote.complete(&text).await {
            Ok(reply) => {
                if !self.queries.is_current(token) {
                    return Ok(QueryOutcome::Superseded);
                }
                let results = parse::parse_match_reply(&reply, &pool);
                info!(count = results.len(), "reasoning service returned matches");
                Ok(QueryOutcome::Fresh(MatchReport {
                    results,
                    mode: EngineMode::Remote,
                }))
            }
            Err(err) => {
                warn!(error = %err, "reasoning service unavailable, using basic matching");
                if !self.queries.is_current(token) {
                    return Ok(QueryOutcome::Superseded);
                }
                let results = matcher::basic_matches(&target, &pool, &request.prefs);
                Ok(QueryOutcome::Fresh(MatchReport {
                    results,
                    mode: EngineMode::Degraded,
                }))
            }
        }
    }

    /// Whole-outfit bundles built around the target item. The target is kept
    /// out of the candidate pools and prepended to each surviving suggestion,
    /// so every outfit contains the base plus at least one companion garment.
    pub async fn suggest_outfits(
        &self,
        request: &StyleRequest,
    ) -> Result<QueryOutcome<OutfitReport>, EngineError> {
        let token = self.queries.begin();

        let Some(target) = self.target_item(request)? else {
            return Ok(QueryOutcome::Fresh(OutfitReport {
                suggestions: Vec::new(),
                mode: EngineMode::Remote,
            }));
        };
        let pool = self.candidate_pool(request)?;
        if pool.is_empty() {
            return Ok(QueryOutcome::Fresh(OutfitReport {
                suggestions: Vec::new(),
                mode: EngineMode::Remote,
            }));
        }
        let (mains, accessories) = composer::split_pools(pool);

        let occasion = prompt::normalize_constraint(request.occasion.clone());
        let weather = prompt::normalize_constraint(request.weather.clone());
        let text = prompt::build_outfit_prompt(
            &target,
            &mains,
            &accessories,
            occasion.as_deref(),
            weather.as_deref(),
        );

        match self.remote.complete(&text).await {
            Ok(reply) => {
                if !self.queries.is_current(token) {
                    return Ok(QueryOutcome::Superseded);
                }
                let mut suggestions = parse::parse_outfit_reply(&reply, &mains, &accessories);
                for suggestion in &mut suggestions {
                    suggestion.outfit.insert(0, target.clone());
                }
                info!(count = suggestions.len(), "reasoning service returned outfits");
                Ok(QueryOutcome::Fresh(OutfitReport {
                    suggestions,
                    mode: EngineMode::Remote,
                }))
            }
            Err(err) => {
                warn!(error = %err, "reasoning service unavailable, composing outfits locally");
                if !self.queries.is_current(token) {
                    return Ok(QueryOutcome::Superseded);
                }
                let suggestions =
                    composer::fallback_outfits(&target, &mains, &accessories, occasion.as_deref());
                Ok(QueryOutcome::Fresh(OutfitReport {
                    suggestions,
                    mode: EngineMode::Degraded,
                }))
            }
        }
    }

    /// Persist an accepted suggestion as a saved outfit.
    pub fn save_suggestion(
        &self,
        owner: &UserId,
        suggestion: &OutfitSuggestion,
        occasion: Option<&str>,
    ) -> Result<SavedOutfit, EngineError> {
        let outfit = SavedOutfit::new(
            owner.clone(),
            format!("Suggested Outfit - {}", Utc::now().format("%Y-%m-%d")),
            suggestion.styling_tip.clone(),
            occasion.map(|o| o.to_string()),
            suggestion
                .outfit
                .iter()
                .chain(suggestion.accessories.iter())
                .map(|item| item.id)
                .collect(),
        );
        self.store.save_outfit(outfit.clone())?;
        Ok(outfit)
    }
}
