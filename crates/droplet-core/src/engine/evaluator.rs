//! Due-check evaluation.
//!
//! Pure function over a profile and the current instant. The cadence check
//! compares absolute elapsed time, not wall-clock local time, so it is
//! immune to offset shifts between reminders; only the day-boundary check
//! looks at the profile-local calendar.

use chrono::{DateTime, Duration, Utc};

use crate::clock::ZoneResolver;
use crate::profile::HydrationProfile;

/// What a tick should do for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickDecision {
    /// The profile-local date differs from `last_reset_date` (also true on
    /// the very first evaluation, which performs the initialization
    /// rollover).
    pub rollover: bool,
    /// The cadence window has elapsed (or no reminder has ever fired).
    pub reminder_due: bool,
}

impl TickDecision {
    pub fn is_noop(&self) -> bool {
        !self.rollover && !self.reminder_due
    }
}

/// Evaluate one profile against the current instant.
///
/// Dormant profiles always yield a no-op decision; nothing may advance
/// their state before configuration.
pub fn evaluate(profile: &HydrationProfile, now: DateTime<Utc>, zones: &ZoneResolver) -> TickDecision {
    if !profile.is_configured() {
        return TickDecision::default();
    }
    let cadence = match profile.cadence_minutes {
        Some(minutes) => minutes,
        None => return TickDecision::default(),
    };

    let local_date = zones.local_date(&profile.timezone_id, now);
    let rollover = profile.last_reset_date != Some(local_date);

    let reminder_due = match profile.last_reminder_at {
        None => true,
        Some(last) => now.signed_duration_since(last) >= Duration::minutes(i64::from(cadence)),
    };

    TickDecision { rollover, reminder_due }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use crate::profile::QuantityMode;

    fn configured() -> HydrationProfile {
        let mut profile = HydrationProfile::new();
        profile.increment = Some(250.0);
        profile.cadence_minutes = Some(60);
        profile
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, h, m, 0).unwrap()
    }

    #[test]
    fn dormant_profile_is_never_touched() {
        let profile = HydrationProfile::new();
        let decision = evaluate(&profile, at(12, 0), &ZoneResolver::utc());
        assert!(decision.is_noop());

        // Cadence alone is not enough.
        let mut half = HydrationProfile::new();
        half.cadence_minutes = Some(60);
        assert!(evaluate(&half, at(12, 0), &ZoneResolver::utc()).is_noop());
    }

    #[test]
    fn first_evaluation_rolls_over_and_fires() {
        let profile = configured();
        let decision = evaluate(&profile, at(12, 0), &ZoneResolver::utc());
        assert!(decision.rollover);
        assert!(decision.reminder_due);
    }

    #[test]
    fn reminder_respects_cadence_window() {
        let mut profile = configured();
        profile.last_reset_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        profile.last_reminder_at = Some(at(12, 0));

        // 30 minutes into a 60-minute cadence: not due.
        let decision = evaluate(&profile, at(12, 30), &ZoneResolver::utc());
        assert!(!decision.rollover);
        assert!(!decision.reminder_due);

        // Exactly at the window boundary: due.
        let decision = evaluate(&profile, at(13, 0), &ZoneResolver::utc());
        assert!(decision.reminder_due);
    }

    #[test]
    fn rollover_on_local_date_change() {
        let mut profile = configured();
        profile.last_reset_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        profile.last_reminder_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 23, 50, 0).unwrap());

        let decision = evaluate(&profile, at(0, 10), &ZoneResolver::utc());
        assert!(decision.rollover);
        assert!(!decision.reminder_due);
    }

    #[test]
    fn rollover_follows_profile_local_midnight() {
        let mut profile = configured();
        profile.timezone_id = "UTC+9".to_string();
        profile.last_reset_date = NaiveDate::from_ymd_opt(2024, 1, 2);

        // 15:30 UTC on Jan 2 is 00:30 Jan 3 at UTC+9.
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap();
        let decision = evaluate(&profile, now, &ZoneResolver::utc());
        assert!(decision.rollover);
    }

    #[test]
    fn invalid_timezone_degrades_to_default_zone() {
        let mut profile = configured();
        profile.timezone_id = "Atlantis/Sunken".to_string();
        profile.last_reset_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        profile.last_reminder_at = Some(at(11, 30));

        // Default zone is UTC, so Jan 2 noon is still Jan 2: no rollover,
        // and no panic either.
        let decision = evaluate(&profile, at(12, 0), &ZoneResolver::utc());
        assert!(!decision.rollover);
    }

    #[test]
    fn goal_derived_profile_is_schedulable_without_increment() {
        let mut profile = HydrationProfile::new();
        profile.cadence_minutes = Some(60);
        profile.daily_goal = Some(2000.0);
        profile.quantity_mode = QuantityMode::GoalDerived;

        let decision = evaluate(&profile, at(12, 0), &ZoneResolver::utc());
        assert!(decision.reminder_due);
    }
}
