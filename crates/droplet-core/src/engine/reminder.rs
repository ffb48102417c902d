//! Reminder firing.
//!
//! Applies a reminder-due decision: determines the delivered quantity,
//! records the intake, advances the accumulator, and stamps
//! `last_reminder_at` before any dispatch is attempted so a slow or failed
//! delivery can never cause a duplicate fire on the next tick.

use chrono::{DateTime, NaiveDate, Utc};

use crate::events::Event;
use crate::profile::{HydrationProfile, IntakeEntry, IntakeKind, QuantityMode};

/// Assumed active hours per day (16 h) for goal-derived quantities.
pub const WAKING_MINUTES: u32 = 960;

/// The quantity one reminder delivers, or `None` for a profile whose
/// quantity source is missing.
///
/// Under [`QuantityMode::GoalDerived`] the daily goal is split across the
/// reminders that fit into the waking period, rounded up and clamped to at
/// least 1 unit so very large cadences still make forward progress.
pub fn delivered_quantity(profile: &HydrationProfile) -> Option<f64> {
    match profile.quantity_mode {
        QuantityMode::Fixed => profile.increment,
        QuantityMode::GoalDerived => {
            let goal = profile.daily_goal?;
            let cadence = profile.cadence_minutes?;
            let per_day = (WAKING_MINUTES / cadence.max(1)).max(1);
            Some((goal / f64::from(per_day)).ceil().max(1.0))
        }
    }
}

/// Fire a reminder for one profile.
///
/// Expects any pending rollover to have been applied already (the entry is
/// keyed by the profile's current `last_reset_date`). Returns the reminder
/// event plus a log echo mirroring the amount and new running total.
pub fn apply_reminder(
    profile: &mut HydrationProfile,
    user_id: &str,
    now: DateTime<Utc>,
    local_date: NaiveDate,
) -> Vec<Event> {
    let amount = match delivered_quantity(profile) {
        Some(amount) => amount,
        None => return Vec::new(),
    };
    let date = profile.last_reset_date.unwrap_or(local_date);

    profile.event_log.entry(date).or_default().push(IntakeEntry {
        at: now,
        amount,
        unit: profile.unit,
        kind: IntakeKind::Reminder,
        destination: profile.reminder_target.clone(),
    });
    profile.accumulator += amount;
    profile.last_reminder_at = Some(now);

    vec![
        Event::ReminderFired {
            user_id: user_id.to_string(),
            amount,
            unit: profile.unit,
            accumulator: profile.accumulator,
            goal: profile.daily_goal,
            at: now,
        },
        Event::IntakeLogged {
            user_id: user_id.to_string(),
            amount,
            unit: profile.unit,
            kind: IntakeKind::Reminder,
            accumulator: profile.accumulator,
            at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap()
    }

    fn fixed_profile() -> HydrationProfile {
        let mut profile = HydrationProfile::new();
        profile.increment = Some(250.0);
        profile.cadence_minutes = Some(60);
        profile.last_reset_date = Some(date(2));
        profile
    }

    #[test]
    fn fixed_mode_delivers_increment() {
        let mut profile = fixed_profile();
        let events = apply_reminder(&mut profile, "u1", noon(), date(2));

        assert_eq!(profile.accumulator, 250.0);
        assert_eq!(profile.last_reminder_at, Some(noon()));
        let entries = &profile.event_log[&date(2)];
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 250.0);
        assert_eq!(entries[0].kind, IntakeKind::Reminder);

        assert_eq!(events.len(), 2);
        match &events[0] {
            Event::ReminderFired { amount, accumulator, .. } => {
                assert_eq!(*amount, 250.0);
                assert_eq!(*accumulator, 250.0);
            }
            other => panic!("expected ReminderFired, got {other:?}"),
        }
    }

    #[test]
    fn goal_mode_splits_goal_across_waking_period() {
        let mut profile = HydrationProfile::new();
        profile.cadence_minutes = Some(60);
        profile.daily_goal = Some(2000.0);
        profile.quantity_mode = QuantityMode::GoalDerived;
        profile.last_reset_date = Some(date(2));

        // 960 / 60 = 16 reminders; ceil(2000 / 16) = 125.
        apply_reminder(&mut profile, "u1", noon(), date(2));
        assert_eq!(profile.accumulator, 125.0);
    }

    #[test]
    fn goal_mode_guarantees_forward_progress() {
        let mut profile = HydrationProfile::new();
        // Cadence longer than the waking period: one reminder per day.
        profile.cadence_minutes = Some(2000);
        profile.daily_goal = Some(0.25);
        profile.quantity_mode = QuantityMode::GoalDerived;
        profile.last_reset_date = Some(date(2));

        apply_reminder(&mut profile, "u1", noon(), date(2));
        assert!(profile.accumulator >= 1.0);
    }

    #[test]
    fn missing_quantity_source_is_a_noop() {
        let mut profile = HydrationProfile::new();
        profile.cadence_minutes = Some(60);
        profile.last_reset_date = Some(date(2));

        let events = apply_reminder(&mut profile, "u1", noon(), date(2));
        assert!(events.is_empty());
        assert_eq!(profile.accumulator, 0.0);
        assert_eq!(profile.last_reminder_at, None);
    }

    #[test]
    fn entries_accumulate_on_the_same_date() {
        let mut profile = fixed_profile();
        apply_reminder(&mut profile, "u1", noon(), date(2));
        let later = Utc.with_ymd_and_hms(2024, 1, 2, 13, 0, 0).unwrap();
        apply_reminder(&mut profile, "u1", later, date(2));

        assert_eq!(profile.event_log[&date(2)].len(), 2);
        assert_eq!(profile.accumulator, 500.0);
    }

    proptest! {
        #[test]
        fn derived_quantity_is_always_at_least_one(
            goal in 0.1f64..100_000.0,
            cadence in 1u32..10_000,
        ) {
            let mut profile = HydrationProfile::new();
            profile.cadence_minutes = Some(cadence);
            profile.daily_goal = Some(goal);
            profile.quantity_mode = QuantityMode::GoalDerived;

            let amount = delivered_quantity(&profile).unwrap();
            prop_assert!(amount >= 1.0);
            prop_assert!(amount.is_finite());
        }
    }
}
