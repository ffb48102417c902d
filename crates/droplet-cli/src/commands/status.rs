use chrono::{Duration, Utc};
use droplet_core::{AppConfig, ProfileStore};

/// Print today's running total and the next reminder ETA.
pub fn run(user: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = super::open_store(&config)?;
    let zones = config.zone_resolver();

    let profile = match store.get(user)? {
        Some(profile) => profile,
        None => {
            println!("No profile for {user}.");
            return Ok(());
        }
    };

    let now = Utc::now();
    let today = zones.local_date(&profile.timezone_id, now);
    let total = profile.total_for(today);
    let next_due_minutes: Option<i64> = if profile.is_configured() {
        match (profile.cadence_minutes, profile.last_reminder_at) {
            (Some(cadence), Some(last)) => {
                let due_at = last + Duration::minutes(i64::from(cadence));
                Some((due_at - now).num_minutes().max(0))
            }
            _ => Some(0),
        }
    } else {
        None
    };

    if json {
        let payload = serde_json::json!({
            "user": user,
            "date": today,
            "total": total,
            "unit": profile.unit,
            "goal": profile.daily_goal,
            "configured": profile.is_configured(),
            "next_reminder_minutes": next_due_minutes,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let unit = profile.unit.label();
        println!("{user} on {today}: {total} {unit}");
        if let Some(goal) = profile.daily_goal {
            println!("Goal: {goal} {unit}");
        }
        match next_due_minutes {
            Some(0) => println!("Next reminder: due now"),
            Some(minutes) => println!("Next reminder: in {minutes} min"),
            None => println!("Reminders: not configured"),
        }
    }
    Ok(())
}
