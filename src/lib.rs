pub mod color;
pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod prefs;
pub mod reasoning;
pub mod rules;
pub mod wardrobe;

// Re-export the main entry points for convenient access.
pub use engine::{
    EngineMode, MatchReport, MatchResult, OutfitReport, OutfitSuggestion, QueryOutcome,
    StyleRequest, StylistEngine,
};
pub use lifecycle::LifecycleTracker;
