//! Per-user hydration profile data model.
//!
//! One profile per tracked user, keyed by an opaque user identifier. A
//! profile is created implicitly as unconfigured (dormant) on first
//! reference and becomes schedulable once the configuration collaborator
//! supplies an intake quantity and a cadence. Scheduling state
//! (`accumulator`, `last_reset_date`, `last_reminder_at`, archive, event
//! log) is owned by the tick engine; settings are owned by configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Milliliters per US fluid ounce.
const ML_PER_OUNCE: f64 = 29.5735;

/// Volume unit a profile records intake in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Milliliters,
    Ounces,
}

impl Unit {
    /// Parse a user-supplied unit name.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "ml" | "milliliter" | "milliliters" => Ok(Unit::Milliliters),
            "oz" | "ounce" | "ounces" | "floz" => Ok(Unit::Ounces),
            _ => Err(ValidationError::UnknownUnit(input.to_string())),
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Milliliters => "mL",
            Unit::Ounces => "fl oz",
        }
    }

    /// Convert an amount expressed in `self` into `target`.
    pub fn convert(self, amount: f64, target: Unit) -> f64 {
        match (self, target) {
            (Unit::Milliliters, Unit::Ounces) => amount / ML_PER_OUNCE,
            (Unit::Ounces, Unit::Milliliters) => amount * ML_PER_OUNCE,
            _ => amount,
        }
    }
}

/// How the per-reminder quantity is determined.
///
/// `Fixed` uses the profile's `increment` as-is. `GoalDerived` divides the
/// daily goal across the reminders that fit into the assumed waking period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityMode {
    #[default]
    Fixed,
    GoalDerived,
}

impl QuantityMode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "fixed" | "increment" => Ok(QuantityMode::Fixed),
            "goal" | "goal_derived" | "goal-derived" => Ok(QuantityMode::GoalDerived),
            _ => Err(ValidationError::UnknownMode(input.to_string())),
        }
    }
}

/// Opaque delivery destination, resolved by the external notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Destination {
    /// A shared channel reference.
    Channel { id: String },
    /// Direct-to-user delivery.
    Direct { user_id: String },
}

/// What produced an intake entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeKind {
    Manual,
    Reminder,
}

/// One recorded intake, appended to the profile's per-date event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEntry {
    /// Absolute instant the intake was recorded.
    pub at: DateTime<Utc>,
    pub amount: f64,
    pub unit: Unit,
    pub kind: IntakeKind,
    /// Destination the matching notification was routed to, if any.
    #[serde(default)]
    pub destination: Option<Destination>,
}

/// Per-user hydration profile.
///
/// Invariants maintained by the engine:
/// - `accumulator` reflects only intakes dated `last_reset_date`.
/// - `last_reset_date` moves forward at most once per tick.
/// - `daily_archive` never holds an entry for the current un-rolled date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationProfile {
    /// Quantity added per reminder; `None` = unconfigured.
    #[serde(default)]
    pub increment: Option<f64>,
    #[serde(default)]
    pub unit: Unit,
    /// Minutes between reminders; `None` = dormant.
    #[serde(default)]
    pub cadence_minutes: Option<u32>,
    /// Daily intake target in `unit`. Drives the derived quantity under
    /// `QuantityMode::GoalDerived`, annotates summaries otherwise.
    #[serde(default)]
    pub daily_goal: Option<f64>,
    #[serde(default)]
    pub quantity_mode: QuantityMode,
    /// Running total for the current local day.
    #[serde(default)]
    pub accumulator: f64,
    /// Timezone identifier; invalid values degrade to the default zone at
    /// use time, never rejected destructively.
    #[serde(default = "default_timezone_id")]
    pub timezone_id: String,
    /// Local calendar date the accumulator is valid for. `None` until the
    /// initialization rollover.
    #[serde(default)]
    pub last_reset_date: Option<NaiveDate>,
    /// Absolute instant of the last fired reminder. `None` means never
    /// fired, due immediately.
    #[serde(default)]
    pub last_reminder_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_target: Option<Destination>,
    #[serde(default)]
    pub log_target: Option<Destination>,
    /// Mention the user in rendered reminders.
    #[serde(default)]
    pub self_mention: bool,
    #[serde(default)]
    pub coach_target: Option<Destination>,
    /// Copy log echoes to the coach target.
    #[serde(default)]
    pub coach_notify_on_log: bool,
    /// Archived totals per completed local day. Append-only.
    #[serde(default)]
    pub daily_archive: BTreeMap<NaiveDate, f64>,
    /// Recorded intakes per local date. Append-only per date.
    #[serde(default)]
    pub event_log: BTreeMap<NaiveDate, Vec<IntakeEntry>>,
}

fn default_timezone_id() -> String {
    "UTC".to_string()
}

impl Default for HydrationProfile {
    fn default() -> Self {
        Self {
            increment: None,
            unit: Unit::default(),
            cadence_minutes: None,
            daily_goal: None,
            quantity_mode: QuantityMode::default(),
            accumulator: 0.0,
            timezone_id: default_timezone_id(),
            last_reset_date: None,
            last_reminder_at: None,
            reminder_target: None,
            log_target: None,
            self_mention: false,
            coach_target: None,
            coach_notify_on_log: false,
            daily_archive: BTreeMap::new(),
            event_log: BTreeMap::new(),
        }
    }
}

impl HydrationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scheduler may touch this profile. Requires a cadence and
    /// a quantity source for the active mode; anything else is dormant.
    pub fn is_configured(&self) -> bool {
        let quantity = match self.quantity_mode {
            QuantityMode::Fixed => self.increment.is_some(),
            QuantityMode::GoalDerived => self.daily_goal.is_some(),
        };
        self.cadence_minutes.is_some() && quantity
    }

    /// Total recorded for `local_date`. Zero when the profile has not yet
    /// rolled over into that date.
    pub fn total_for(&self, local_date: NaiveDate) -> f64 {
        if self.last_reset_date == Some(local_date) {
            self.accumulator
        } else {
            0.0
        }
    }
}

/// Reject non-positive or non-finite intake amounts before they are stored.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount(amount))
    }
}

/// Reject a zero cadence before it is stored.
pub fn validate_cadence(minutes: u32) -> Result<u32, ValidationError> {
    if minutes > 0 {
        Ok(minutes)
    } else {
        Err(ValidationError::InvalidCadence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parse_accepts_aliases() {
        assert_eq!(Unit::parse("ml").unwrap(), Unit::Milliliters);
        assert_eq!(Unit::parse("Ounces").unwrap(), Unit::Ounces);
        assert!(Unit::parse("liters").is_err());
    }

    #[test]
    fn unit_conversion_round_trips() {
        let oz = Unit::Milliliters.convert(500.0, Unit::Ounces);
        let back = Unit::Ounces.convert(oz, Unit::Milliliters);
        assert!((back - 500.0).abs() < 1e-9);
    }

    #[test]
    fn fresh_profile_is_dormant() {
        let profile = HydrationProfile::new();
        assert!(!profile.is_configured());
    }

    #[test]
    fn configured_requires_quantity_for_active_mode() {
        let mut profile = HydrationProfile::new();
        profile.cadence_minutes = Some(60);
        assert!(!profile.is_configured());

        profile.increment = Some(250.0);
        assert!(profile.is_configured());

        profile.quantity_mode = QuantityMode::GoalDerived;
        assert!(!profile.is_configured());
        profile.daily_goal = Some(2000.0);
        assert!(profile.is_configured());
    }

    #[test]
    fn amount_validation_rejects_garbage() {
        assert!(validate_amount(250.0).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-10.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn profile_survives_json_round_trip() {
        let mut profile = HydrationProfile::new();
        profile.increment = Some(250.0);
        profile.cadence_minutes = Some(90);
        profile.timezone_id = "UTC+9".to_string();
        profile.last_reset_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        profile.daily_archive
            .insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1500.0);
        profile.event_log
            .entry(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .or_default()
            .push(IntakeEntry {
                at: Utc::now(),
                amount: 250.0,
                unit: Unit::Milliliters,
                kind: IntakeKind::Reminder,
                destination: Some(Destination::Channel { id: "hydration".into() }),
            });

        let json = serde_json::to_string(&profile).unwrap();
        let decoded: HydrationProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, profile);
    }
}
