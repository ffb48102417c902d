use std::sync::Arc;
use std::time::Duration;

use droplet_core::{AppConfig, ConsoleNotifier, TickDriver};
use tokio::sync::watch;

/// Start the reminder daemon; runs until ctrl-c.
pub fn run(interval_secs: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = Arc::new(super::open_store(&config)?);
    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.tick_interval());
    let driver = TickDriver::new(store, Arc::new(ConsoleNotifier), config.zone_resolver(), interval);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
                let _ = tx.send(true);
            }
        });
        driver.run(rx).await;
    });
    Ok(())
}
