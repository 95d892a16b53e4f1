use std::sync::Arc;

use anyhow::Result;
use attire::color::Color;
use attire::config::ReasoningConfig;
use attire::engine::{EngineMode, QueryOutcome, StyleRequest, StylistEngine};
use attire::lifecycle::LifecycleTracker;
use attire::prefs::PreferenceBoard;
use attire::reasoning::HttpReasoningClient;
use attire::wardrobe::{Category, ClothingItem, InMemoryWardrobe, Season, UserId, WardrobeStore};

/// Demo driver: seeds a small wardrobe, runs a match query and an outfit
/// query (degrading to the local matcher when no reasoning service is
/// reachable), then records a wear and prints the wash bin.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let store: Arc<dyn WardrobeStore> = Arc::new(InMemoryWardrobe::new());
    let user = UserId::new("demo-user");

    let jacket = ClothingItem::new(user.clone(), "Blue Denim Jacket", Category::Outerwear)
        .with_color(Color::Blue)
        .with_season(Season::All)
        .with_occasion("casual");
    let tee = ClothingItem::new(user.clone(), "White T-Shirt", Category::Tops)
        .with_color(Color::White)
        .with_occasion("casual");
    let jeans = ClothingItem::new(user.clone(), "Black Jeans", Category::Bottoms)
        .with_color(Color::Black)
        .with_occasion("casual");
    let dress = ClothingItem::new(user.clone(), "Red Dress", Category::Dresses)
        .with_color(Color::Red)
        .with_occasion("formal");
    let belt = ClothingItem::new(user.clone(), "Leather Belt", Category::Belts)
        .with_color(Color::Brown);
    let watch = ClothingItem::new(user.clone(), "Silver Watch", Category::Watches)
        .with_color(Color::Grey);

    for item in [&jacket, &tee, &jeans, &dress, &belt, &watch] {
        store.insert(item.clone())?;
    }

    let prefs = PreferenceBoard::new();
    prefs.toggle_like(&user, tee.id);

    let engine = StylistEngine::new(
        store.clone(),
        HttpReasoningClient::new(ReasoningConfig::from_env()),
    );
    let request = StyleRequest {
        owner: user.clone(),
        target: jacket.id,
        occasion: Some("casual".to_string()),
        weather: None,
        prefs: prefs.snapshot(&user),
    };

    println!("Matches for {}:", jacket.name);
    match engine.get_matches(&request).await? {
        QueryOutcome::Fresh(report) => {
            if report.mode == EngineMode::Degraded {
                println!("  (service degraded - basic matching used)");
            }
            if report.results.is_empty() {
                println!("  No matches found - try adjusting filters.");
            }
            for result in &report.results {
                println!(
                    "  [{:>3}] {} - {}",
                    result.match_score, result.item.name, result.advice
                );
            }
        }
        QueryOutcome::Superseded => {}
    }

    println!("\nOutfit suggestions:");
    match engine.suggest_outfits(&request).await? {
        QueryOutcome::Fresh(report) => {
            if report.mode == EngineMode::Degraded {
                println!("  (service degraded - rule-based composition used)");
            }
            for suggestion in &report.suggestions {
                let names: Vec<&str> = suggestion
                    .outfit
                    .iter()
                    .map(|item| item.name.as_str())
                    .collect();
                let accessories: Vec<&str> = suggestion
                    .accessories
                    .iter()
                    .map(|item| item.name.as_str())
                    .collect();
                println!("  {} + {:?}", names.join(" / "), accessories);
                println!("    {}", suggestion.styling_tip);
            }
        }
        QueryOutcome::Superseded => {}
    }

    let tracker = LifecycleTracker::new(store.clone());
    let worn = tracker.record_use(&jacket.id)?;
    println!(
        "\nWore {} ({}/{} uses)",
        worn.name, worn.current_uses, worn.max_uses
    );
    for item in store.wash_bin(&user)? {
        println!("In wash: {}", item.name);
    }

    Ok(())
}
