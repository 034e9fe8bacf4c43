//! Timezone offset resolution
//!
//! The timeZone field samples a zone's UTC offset at two fixed instants, one
//! in northern summer and one in northern winter, so zones with daylight
//! saving produce two different numbers.
//!
//! Lookups go through [`TimezoneResolver`] so tests and offline callers can
//! swap the IANA database for a fixed table.
//!
//! # Example
//!
//! ```rust
//! use adyen_fingerprint::signals::timezone::{timezone_signature, IanaTimezoneResolver};
//!
//! let resolver = IanaTimezoneResolver::new();
//! let signature = timezone_signature(&resolver, "America/New_York").unwrap();
//! assert_eq!(signature, "240**300");
//! ```

use std::collections::HashMap;

use chrono::{Offset, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// 2024-06-01T20:19:58.425Z and 2024-12-01T21:20:10.818Z.
pub const REFERENCE_INSTANTS_MS: [i64; 2] = [1_717_273_198_425, 1_733_088_010_818];

/// Errors raised while resolving a zone offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimezoneError {
    /// The identifier is not a known zone.
    #[error("Unknown timezone identifier: {0}")]
    UnknownZone(String),

    /// The instant cannot be represented.
    #[error("Instant {0}ms is out of range")]
    InstantOutOfRange(i64),
}

/// Source of UTC offsets for a zone at a given instant.
pub trait TimezoneResolver {
    /// Offset from UTC in minutes at `epoch_millis`, positive east of Greenwich.
    fn offset_minutes(&self, zone: &str, epoch_millis: i64) -> Result<i32, TimezoneError>;
}

impl<R: TimezoneResolver + ?Sized> TimezoneResolver for &R {
    fn offset_minutes(&self, zone: &str, epoch_millis: i64) -> Result<i32, TimezoneError> {
        (**self).offset_minutes(zone, epoch_millis)
    }
}

impl<R: TimezoneResolver + ?Sized> TimezoneResolver for Box<R> {
    fn offset_minutes(&self, zone: &str, epoch_millis: i64) -> Result<i32, TimezoneError> {
        (**self).offset_minutes(zone, epoch_millis)
    }
}

/// `"<C>**<D>"` where C and D are the negated offsets at the two reference instants.
///
/// Negation matches `Date.prototype.getTimezoneOffset`, so New York reads
/// `240**300` rather than `-240**-300`.
pub fn timezone_signature<R: TimezoneResolver + ?Sized>(
    resolver: &R,
    zone: &str,
) -> Result<String, TimezoneError> {
    let [summer, winter] = REFERENCE_INSTANTS_MS;
    let c = -resolver.offset_minutes(zone, summer)?;
    let d = -resolver.offset_minutes(zone, winter)?;
    Ok(format!("{c}**{d}"))
}

/// Resolver backed by the compiled-in IANA database.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaTimezoneResolver;

impl IanaTimezoneResolver {
    pub fn new() -> Self {
        Self
    }
}

impl TimezoneResolver for IanaTimezoneResolver {
    fn offset_minutes(&self, zone: &str, epoch_millis: i64) -> Result<i32, TimezoneError> {
        let tz: Tz = zone
            .parse()
            .map_err(|_| TimezoneError::UnknownZone(zone.to_string()))?;
        let instant = Utc
            .timestamp_millis_opt(epoch_millis)
            .single()
            .ok_or(TimezoneError::InstantOutOfRange(epoch_millis))?;
        let offset = instant.with_timezone(&tz).offset().fix();
        Ok(offset.local_minus_utc() / 60)
    }
}

/// In-memory zone table.
///
/// Each zone holds `(effective_from_ms, offset_minutes)` transitions. A lookup
/// uses the latest transition at or before the instant, or the earliest one
/// when the instant precedes them all.
#[derive(Debug, Clone, Default)]
pub struct StaticTimezoneResolver {
    zones: HashMap<String, Vec<(i64, i32)>>,
}

impl StaticTimezoneResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zone with one offset for all time.
    pub fn with_fixed(self, zone: impl Into<String>, offset_minutes: i32) -> Self {
        self.with_transition(zone, i64::MIN, offset_minutes)
    }

    /// Add an offset taking effect at `from_ms`.
    pub fn with_transition(
        mut self,
        zone: impl Into<String>,
        from_ms: i64,
        offset_minutes: i32,
    ) -> Self {
        let transitions = self.zones.entry(zone.into()).or_default();
        transitions.push((from_ms, offset_minutes));
        transitions.sort_by_key(|(from, _)| *from);
        self
    }

    /// Offsets of a few common zones at the two reference instants.
    pub fn reference_zones() -> Self {
        let [summer, winter] = REFERENCE_INSTANTS_MS;
        let seasonal = [
            ("America/New_York", -240, -300),
            ("America/Chicago", -300, -360),
            ("America/Denver", -360, -420),
            ("America/Los_Angeles", -420, -480),
            ("Europe/London", 60, 0),
            ("Europe/Berlin", 120, 60),
            ("Europe/Paris", 120, 60),
            ("Australia/Sydney", 600, 660),
        ];
        let fixed = [("Asia/Tokyo", 540), ("Asia/Shanghai", 480), ("UTC", 0)];

        let mut resolver = Self::new();
        for (zone, summer_offset, winter_offset) in seasonal {
            resolver = resolver
                .with_transition(zone, summer, summer_offset)
                .with_transition(zone, winter, winter_offset);
        }
        for (zone, offset) in fixed {
            resolver = resolver.with_fixed(zone, offset);
        }
        resolver
    }

    pub fn contains(&self, zone: &str) -> bool {
        self.zones.contains_key(zone)
    }
}

impl TimezoneResolver for StaticTimezoneResolver {
    fn offset_minutes(&self, zone: &str, epoch_millis: i64) -> Result<i32, TimezoneError> {
        let transitions = self
            .zones
            .get(zone)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TimezoneError::UnknownZone(zone.to_string()))?;

        let offset = transitions
            .iter()
            .rev()
            .find(|(from, _)| *from <= epoch_millis)
            .or_else(|| transitions.first())
            .map(|(_, offset)| *offset)
            .ok_or_else(|| TimezoneError::UnknownZone(zone.to_string()))?;
        Ok(offset)
    }
}
