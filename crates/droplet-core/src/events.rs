//! Events produced by the tick engine.
//!
//! Every scheduling mutation produces an Event. The driver renders events
//! to plain text and hands them to the notifier; hosts may also subscribe
//! to the structured values directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{IntakeKind, Unit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A reminder fired for a user; the delivered quantity has already
    /// been applied to the accumulator.
    ReminderFired {
        user_id: String,
        amount: f64,
        unit: Unit,
        accumulator: f64,
        goal: Option<f64>,
        at: DateTime<Utc>,
    },
    /// A completed local day was archived during rollover.
    DailySummary {
        user_id: String,
        date: NaiveDate,
        total: f64,
        goal: Option<f64>,
        unit: Unit,
        at: DateTime<Utc>,
    },
    /// An intake (manual or reminder echo) was recorded.
    IntakeLogged {
        user_id: String,
        amount: f64,
        unit: Unit,
        kind: IntakeKind,
        accumulator: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Minimal plain-text rendering for the notifier. Embeds and rich
    /// formatting belong to the host surface, not the engine.
    pub fn render(&self) -> String {
        match self {
            Event::ReminderFired { amount, unit, accumulator, goal, .. } => {
                let mut text = format!(
                    "Time to drink {} {}! Today so far: {} {}",
                    fmt_amount(*amount),
                    unit.label(),
                    fmt_amount(*accumulator),
                    unit.label()
                );
                if let Some(goal) = goal {
                    text.push_str(&format!(" of {} {}", fmt_amount(*goal), unit.label()));
                }
                text
            }
            Event::DailySummary { date, total, goal, unit, .. } => {
                let mut text = format!("Daily total for {}: {} {}", date, fmt_amount(*total), unit.label());
                if let Some(goal) = goal {
                    let pct = if *goal > 0.0 { total / goal * 100.0 } else { 0.0 };
                    text.push_str(&format!(" ({:.0}% of {} {})", pct, fmt_amount(*goal), unit.label()));
                }
                text
            }
            Event::IntakeLogged { amount, unit, kind, accumulator, .. } => {
                let verb = match kind {
                    IntakeKind::Manual => "Logged",
                    IntakeKind::Reminder => "Reminder counted",
                };
                format!(
                    "{} {} {} (today: {} {})",
                    verb,
                    fmt_amount(*amount),
                    unit.label(),
                    fmt_amount(*accumulator),
                    unit.label()
                )
            }
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Event::ReminderFired { user_id, .. }
            | Event::DailySummary { user_id, .. }
            | Event::IntakeLogged { user_id, .. } => user_id,
        }
    }
}

fn fmt_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reminder_render_includes_goal() {
        let event = Event::ReminderFired {
            user_id: "u1".into(),
            amount: 250.0,
            unit: Unit::Milliliters,
            accumulator: 750.0,
            goal: Some(2000.0),
            at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        };
        let text = event.render();
        assert!(text.contains("250 mL"));
        assert!(text.contains("750 mL"));
        assert!(text.contains("2000 mL"));
    }

    #[test]
    fn summary_render_shows_percentage() {
        let event = Event::DailySummary {
            user_id: "u1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total: 1500.0,
            goal: Some(2000.0),
            unit: Unit::Milliliters,
            at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 30).unwrap(),
        };
        let text = event.render();
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("75%"));
    }

    #[test]
    fn fractional_amounts_keep_one_decimal() {
        assert_eq!(fmt_amount(8.5), "8.5");
        assert_eq!(fmt_amount(250.0), "250");
    }
}
