use chrono::NaiveDate;
use droplet_core::{AppConfig, ProfileStore};

/// Print archived daily totals, newest first.
pub fn run(user: &str, days: Option<usize>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = super::open_store(&config)?;

    let profile = match store.get(user)? {
        Some(profile) => profile,
        None => {
            println!("No profile for {user}.");
            return Ok(());
        }
    };

    let mut entries: Vec<(NaiveDate, f64)> =
        profile.daily_archive.iter().map(|(date, total)| (*date, *total)).collect();
    entries.reverse();
    if let Some(days) = days {
        entries.truncate(days);
    }

    if json {
        let payload: Vec<serde_json::Value> = entries
            .iter()
            .map(|(date, total)| serde_json::json!({ "date": date, "total": total }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if entries.is_empty() {
        println!("No archived days for {user}.");
    } else {
        let unit = profile.unit.label();
        for (date, total) in entries {
            println!("{date}  {total} {unit}");
        }
    }
    Ok(())
}
