//! Timezone identifier resolution and local-time helpers.
//!
//! Profiles carry a timezone identifier as a string. At evaluation time an
//! unresolvable identifier degrades to the configured default zone (logged,
//! never surfaced); at configuration time the strict [`ZoneResolver::validate`]
//! path rejects it before it reaches the store.
//!
//! Accepted forms: `UTC`, `Z`, `UTC+9`, `UTC-08`, `UTC+5:30`, `+05:30`,
//! `GMT-7` (case-insensitive, offsets within ±18:00).

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::ValidationError;

/// Resolves profile timezone identifiers to fixed offsets.
#[derive(Debug, Clone, Copy)]
pub struct ZoneResolver {
    default_zone: FixedOffset,
}

impl ZoneResolver {
    pub fn new(default_zone: FixedOffset) -> Self {
        Self { default_zone }
    }

    /// Resolver defaulting to UTC.
    pub fn utc() -> Self {
        Self::new(FixedOffset::east_opt(0).unwrap())
    }

    pub fn default_zone(&self) -> FixedOffset {
        self.default_zone
    }

    /// Lenient resolution for the tick path: falls back to the default
    /// zone on an unresolvable identifier.
    pub fn resolve(&self, id: &str) -> FixedOffset {
        match parse_zone(id) {
            Some(zone) => zone,
            None => {
                tracing::warn!(timezone = id, "unresolvable timezone identifier, using default zone");
                self.default_zone
            }
        }
    }

    /// Strict resolution for the configuration path.
    pub fn validate(id: &str) -> Result<FixedOffset, ValidationError> {
        parse_zone(id).ok_or_else(|| ValidationError::InvalidTimezone(id.to_string()))
    }

    /// `now` converted into the profile's local zone.
    pub fn local_now(&self, id: &str, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.resolve(id))
    }

    /// The profile-local calendar date of `now`.
    pub fn local_date(&self, id: &str, now: DateTime<Utc>) -> NaiveDate {
        self.local_now(id, now).date_naive()
    }
}

impl Default for ZoneResolver {
    fn default() -> Self {
        Self::utc()
    }
}

fn parse_zone(id: &str) -> Option<FixedOffset> {
    let s = id.trim();
    if s.is_empty() {
        return None;
    }
    let rest = if s.eq_ignore_ascii_case("z") {
        ""
    } else {
        match s.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("utc") || prefix.eq_ignore_ascii_case("gmt") => &s[3..],
            _ => s,
        }
    };
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }

    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hours_part, minutes_part) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None => (digits, "0"),
    };
    if hours_part.is_empty() || hours_part.len() > 2 || minutes_part.is_empty() || minutes_part.len() > 2 {
        return None;
    }
    let hours: i32 = hours_part.parse().ok()?;
    let minutes: i32 = minutes_part.parse().ok()?;
    if hours > 18 || minutes > 59 {
        return None;
    }
    let total = sign * (hours * 3600 + minutes * 60);
    if total.abs() > 18 * 3600 {
        return None;
    }
    FixedOffset::east_opt(total)
}
