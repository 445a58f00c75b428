// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

use hall_finder::{Catalog, Session, SessionConfig};

// Usage: hall-finder [catalog.json] [config.json]
fn main() -> Result<()> {
    // Logs go to stderr so they never draw over the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let catalog = match args.get(1) {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::seed()?,
    };
    let config = match args.get(2) {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };

    tracing::info!(
        version = hall_finder::VERSION,
        venues = catalog.len(),
        "starting hall finder"
    );

    run_ui_mode(Session::new(catalog, config))
}

#[cfg(feature = "tui")]
fn run_ui_mode(session: Session) -> Result<()> {
    let mut app = ui::App::new(session);
    ui::run_ui(&mut app)?;

    println!("\n👋 Goodbye!");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(session: Session) -> Result<()> {
    println!("🏛️  Hall Finder v{}", hall_finder::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("TUI disabled. Rebuild with --features tui for the interactive UI.\n");

    println!("✨ Featured halls:");
    for venue in session.featured() {
        println!(
            "   {:<32} {:<10} Rs {:>9}  {:.1} ★",
            venue.name, venue.city, venue.price_per_event, venue.rating
        );
    }
    println!("\n📍 {} venues in catalog", session.catalog().len());

    Ok(())
}
