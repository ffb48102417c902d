//! Manual intake recording.
//!
//! Lets a host record a drink outside the reminder cycle. A pending day
//! rollover is applied first through the same archival mutator the tick
//! path uses, so the entry always lands on the profile's current local
//! date and yesterday's total is archived even when the first activity of
//! the new day is a manual log.

use chrono::{DateTime, Utc};

use crate::clock::ZoneResolver;
use crate::error::ValidationError;
use crate::events::Event;
use crate::profile::{validate_amount, HydrationProfile, IntakeEntry, IntakeKind};

use super::rollover::apply_rollover;

/// Record a manual intake of `amount` (in the profile's unit).
///
/// Dormant profiles may log manually; the initialization rollover applies
/// but no reminder state is touched. Returns the emitted events (a summary
/// for an archived day, if any, plus the intake echo).
pub fn record_intake(
    profile: &mut HydrationProfile,
    user_id: &str,
    amount: f64,
    now: DateTime<Utc>,
    zones: &ZoneResolver,
) -> Result<Vec<Event>, ValidationError> {
    let amount = validate_amount(amount)?;
    let local_date = zones.local_date(&profile.timezone_id, now);

    let mut events = Vec::new();
    if profile.last_reset_date != Some(local_date) {
        events.extend(apply_rollover(profile, user_id, local_date, now));
    }
    let date = profile.last_reset_date.unwrap_or(local_date);

    profile.event_log.entry(date).or_default().push(IntakeEntry {
        at: now,
        amount,
        unit: profile.unit,
        kind: IntakeKind::Manual,
        destination: None,
    });
    profile.accumulator += amount;

    events.push(Event::IntakeLogged {
        user_id: user_id.to_string(),
        amount,
        unit: profile.unit,
        kind: IntakeKind::Manual,
        accumulator: profile.accumulator,
        at: now,
    });
    Ok(events)
}
