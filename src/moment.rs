//! Bridges between clock readings and [`PartialDate`], and the policy picking
//! the date a file is named after.

use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike};
use tracing::debug;

use crate::{MAX_DECIMALS, PartialDate, TimeUnit, ValidationError, parse_date};

fn narrow(unit: TimeUnit, value: impl Into<i64> + Copy) -> Result<u16, ValidationError> {
    u16::try_from(value.into()).map_err(|_| ValidationError::Overflow {
        unit,
        value: value.into(),
    })
}

impl PartialDate {
    /// Decomposes a wall-clock reading into all twelve fields.
    ///
    /// A leap second's fraction is clamped to `.999999`.
    ///
    /// # Errors
    /// Returns `ValidationError` if the year is outside `[MIN_YEAR, MAX_YEAR]`.
    pub fn from_naive(dt: &NaiveDateTime) -> Result<Self, ValidationError> {
        let micros = (dt.nanosecond() / 1_000).min(MAX_DECIMALS - 1);
        Self::from_decimals(
            [
                Some(narrow(TimeUnit::Year, dt.year())?),
                Some(narrow(TimeUnit::Month, dt.month())?),
                Some(narrow(TimeUnit::Day, dt.day())?),
                Some(narrow(TimeUnit::Hour, dt.hour())?),
                Some(narrow(TimeUnit::Minute, dt.minute())?),
                Some(narrow(TimeUnit::Second, dt.second())?),
            ],
            micros,
        )
    }

    /// Decomposes `dt` as read on its own timezone's clock.
    ///
    /// # Errors
    /// See [`PartialDate::from_naive`].
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Result<Self, ValidationError> {
        Self::from_naive(&dt.naive_local())
    }

    /// Decomposes a filesystem timestamp in the local timezone.
    ///
    /// # Errors
    /// See [`PartialDate::from_naive`].
    pub fn from_system_time(time: SystemTime) -> Result<Self, ValidationError> {
        Self::from_datetime(&DateTime::<Local>::from(time))
    }
}

/// The earlier of two dates. `a` is kept when neither is strictly earlier.
pub fn earliest(a: PartialDate, b: PartialDate) -> PartialDate {
    if b < a { b } else { a }
}

/// Picks the date a file is named after: the date found in `name` if it is
/// earlier than `metadata`, otherwise `metadata`.
///
/// A name without a date counts as [`PartialDate::MAX`], so the metadata wins.
pub fn earliest_plausible(metadata: PartialDate, name: &str) -> PartialDate {
    let Some(parsed) = parse_date(name) else {
        debug!(name, %metadata, "no date in name, keeping metadata");
        return metadata;
    };
    let chosen = earliest(metadata, parsed);
    debug!(name, %metadata, %parsed, %chosen, "picked earliest date");
    chosen
}
