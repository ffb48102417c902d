use chrono::Utc;
use droplet_core::{dispatch_events, record_intake, AppConfig, ConsoleNotifier, ProfileStore};

/// Record a manual drink for a user.
pub fn run(user: &str, amount: f64) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = super::open_store(&config)?;
    let zones = config.zone_resolver();

    let mut profile = store.get(user)?.unwrap_or_default();
    let events = record_intake(&mut profile, user, amount, Utc::now(), &zones)?;
    // Persist before any echo goes out, same as the tick path.
    store.upsert(user, &profile)?;
    dispatch_events(&ConsoleNotifier, &profile, &events);

    let unit = profile.unit.label();
    println!("Logged {amount} {unit} for {user} (today: {} {unit}).", profile.accumulator);
    Ok(())
}
