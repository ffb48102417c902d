use std::sync::Arc;

use chrono::Utc;
use droplet_core::{AppConfig, ConsoleNotifier, TickDriver};

/// Run a single tick pass and report what happened.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = Arc::new(super::open_store(&config)?);
    let driver = TickDriver::new(
        store,
        Arc::new(ConsoleNotifier),
        config.zone_resolver(),
        config.tick_interval(),
    );

    let summary = driver.run_tick(Utc::now());
    println!(
        "Tick complete: {} evaluated, {} rollovers, {} reminders, {} store failures, {} delivery failures.",
        summary.evaluated,
        summary.rollovers,
        summary.reminders,
        summary.store_failures,
        summary.delivery_failures
    );
    Ok(())
}
