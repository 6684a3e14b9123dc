//! Test de fumée contre un vrai serveur Audiobookshelf
//!
//! Lit `TEST_SERVER_URL`, `TEST_USERNAME` et `TEST_PASSWORD`, puis enchaîne
//! initialisation, page d'accueil et recherche.
//!
//! ```text
//! TEST_SERVER_URL=books.example.org TEST_USERNAME=alice TEST_PASSWORD=secret \
//!     RUST_LOG=pmoaudiobookshelf=debug cargo run --example smoke_test
//! ```

use pmoaudiobookshelf::AudiobookshelfSource;
use pmosource::{ContentType, Filters, MediaPlugin, PluginConfig, SortOrder};
use tracing_subscriber::EnvFilter;

const REQUIRED_VARS: [&str; 3] = ["TEST_SERVER_URL", "TEST_USERNAME", "TEST_PASSWORD"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialiser le logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| std::env::var(name).map(|v| v.is_empty()).unwrap_or(true))
        .collect();
    if !missing.is_empty() {
        for name in &missing {
            eprintln!("Missing environment variable: {}", name);
        }
        std::process::exit(1);
    }

    let config = PluginConfig::new(
        std::env::var("TEST_SERVER_URL")?,
        std::env::var("TEST_USERNAME")?,
        std::env::var("TEST_PASSWORD")?,
    );

    println!("=== PMOAudiobookshelf - Test de fumée ===\n");

    let source = AudiobookshelfSource::new()?;
    source.initialize(&config).await?;
    if let Some(session) = source.session() {
        println!("✓ Connecté à {}", session.base_url());
    }

    println!("\n--- Accueil ---");
    let home = source.get_home().await?;
    for section in &home.sections {
        println!("  {} ({} items)", section.name, section.items.len());
        for item in section.items.iter().take(3) {
            println!("    - {} / {} ({}s)", item.name, item.author, item.duration_seconds);
        }
    }

    println!("\n--- Recherche 'test' ---");
    let results = source
        .search("test", &ContentType::Audio, &SortOrder::Relevance, &Filters::new())
        .await?;
    println!("✓ {} résultat(s)", results.items.len());
    for item in results.items.iter().take(5) {
        println!("  - {} -> {}", item.name, item.play_url);
    }

    Ok(())
}
