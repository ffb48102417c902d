//! Day-boundary archival.
//!
//! Applies a rollover decision: the prior day's total moves into the
//! archive, the accumulator restarts, and the reminder timestamp clears so
//! the first reminder of the new day fires immediately. The archive write
//! is an idempotent overwrite; re-invocation for the same prior date (a
//! crash-restart race) stores the same value again.

use chrono::{DateTime, NaiveDate, Utc};

use crate::events::Event;
use crate::profile::HydrationProfile;

/// Apply a rollover into `local_date`.
///
/// Returns the daily-summary event for the day being left, or `None` for
/// the initialization case (no prior `last_reset_date`, nothing to
/// archive). `last_reset_date` never moves backwards: a stale `local_date`
/// (possible after a westward timezone reconfiguration) leaves the profile
/// untouched.
pub fn apply_rollover(
    profile: &mut HydrationProfile,
    user_id: &str,
    local_date: NaiveDate,
    now: DateTime<Utc>,
) -> Option<Event> {
    let event = match profile.last_reset_date {
        Some(prior) if local_date < prior => {
            tracing::debug!(user = user_id, "local date behind last reset date, skipping rollover");
            return None;
        }
        Some(prior) => {
            profile.daily_archive.insert(prior, profile.accumulator);
            Some(Event::DailySummary {
                user_id: user_id.to_string(),
                date: prior,
                total: profile.accumulator,
                goal: profile.daily_goal,
                unit: profile.unit,
                at: now,
            })
        }
        None => None,
    };

    profile.accumulator = 0.0;
    profile.last_reminder_at = None;
    profile.last_reset_date = Some(local_date);
    event
}
