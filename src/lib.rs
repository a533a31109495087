mod consts;
mod layout;
mod moment;
mod parser;
mod prelude;
#[cfg(test)]
mod test_utils;
mod unit;

pub use consts::*;
pub use layout::{Layout, LayoutError, ParseError, Run, digits_of};
pub use moment::{earliest, earliest_plausible};
pub use parser::{DateParser, DigitSource, parse_date};
pub use unit::{SubPattern, TimeUnit};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A date and time where every field, from the year down to the
/// micro-second digit, is either known and in range or absent.
///
/// Values are immutable once built and always carry at least one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PartialDateFields", into = "PartialDateFields")]
pub struct PartialDate {
    fields: [Option<u16>; FIELD_COUNT],
}

/// Named view of a [`PartialDate`], used to build one field by field and as
/// its serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialDateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year:        Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month:       Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day:         Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour:        Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute:      Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second:      Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decis:       Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centis:      Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub millis:      Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten_millis:  Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hun_millis:  Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micros:      Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ValidationError {
    #[display(fmt = "No value given; can't create an empty date")]
    Empty,
    #[display(fmt = "Invalid {unit}: {value} (must be in [{min}, {max}])")]
    OutOfRange {
        unit:  TimeUnit,
        value: u16,
        min:   u16,
        max:   u16,
    },
    #[display(fmt = "Invalid fractional seconds: {} (must be below {})", "_0", MAX_DECIMALS)]
    FractionOutOfRange(u32),
    #[display(fmt = "Invalid {unit}: {value} does not fit the supported range")]
    Overflow { unit: TimeUnit, value: i64 },
}

impl std::error::Error for ValidationError {}

impl PartialDate {
    /// Latest representable value: 2999-12-31 23:59:59.999999
    pub const MAX: Self = Self {
        fields: [
            Some(MAX_YEAR),
            Some(MAX_MONTH),
            Some(MAX_DAY),
            Some(MAX_HOUR),
            Some(MAX_MINUTE),
            Some(MAX_SECOND),
            Some(MAX_SUBSECOND_DIGIT),
            Some(MAX_SUBSECOND_DIGIT),
            Some(MAX_SUBSECOND_DIGIT),
            Some(MAX_SUBSECOND_DIGIT),
            Some(MAX_SUBSECOND_DIGIT),
            Some(MAX_SUBSECOND_DIGIT),
        ],
    };

    /// Earliest representable value: 1800-01-01 00:00:00.000000
    pub const MIN: Self = Self {
        fields: [
            Some(MIN_YEAR),
            Some(MIN_MONTH),
            Some(MIN_DAY),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
            Some(0),
        ],
    };

    /// Creates a date from its fields in significance order (year first).
    ///
    /// # Errors
    /// Returns `ValidationError::Empty` if every field is `None`, and
    /// `ValidationError::OutOfRange` for the first field outside its range.
    pub fn from_fields(fields: [Option<u16>; FIELD_COUNT]) -> Result<Self, ValidationError> {
        if fields.iter().all(Option::is_none) {
            return Err(ValidationError::Empty);
        }
        for (unit, value) in TimeUnit::ALL.into_iter().zip(fields) {
            if let Some(value) = value {
                Self::validate(unit, value)?;
            }
        }
        Ok(Self { fields })
    }

    /// Creates a date from its calendar and clock fields plus a fractional
    /// second given as an integer below one million, split into the six
    /// sub-second digits (`123_456` gives deci-second 1 ... micro-second 6).
    ///
    /// # Errors
    /// Returns `ValidationError::FractionOutOfRange` if `decimals` has more
    /// than six digits, or any error of [`PartialDate::from_fields`].
    pub fn from_decimals(date_time: [Option<u16>; 6], decimals: u32) -> Result<Self, ValidationError> {
        if decimals >= MAX_DECIMALS {
            return Err(ValidationError::FractionOutOfRange(decimals));
        }
        let mut fields = [None; FIELD_COUNT];
        let (calendar, fraction) = fields.split_at_mut(FIELD_COUNT - SUBSECOND_DIGITS);
        calendar.copy_from_slice(&date_time);
        let mut rest = decimals;
        for slot in fraction.iter_mut().rev() {
            // `rest % 10` is a single digit, the cast cannot truncate
            #[allow(clippy::cast_possible_truncation)]
            let digit = (rest % 10) as u16;
            *slot = Some(digit);
            rest /= 10;
        }
        Self::from_fields(fields)
    }

    fn validate(unit: TimeUnit, value: u16) -> Result<(), ValidationError> {
        let pattern = unit.sub_pattern();
        if pattern.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                unit,
                value,
                min: pattern.min,
                max: pattern.max,
            })
        }
    }

    /// Returns the value of `unit` if present
    #[inline]
    pub const fn get(&self, unit: TimeUnit) -> Option<u16> {
        self.fields[unit.index()]
    }

    /// All fields in significance order
    #[inline]
    pub const fn fields(&self) -> [Option<u16>; FIELD_COUNT] {
        self.fields
    }

    pub const fn year(&self) -> Option<u16> {
        self.get(TimeUnit::Year)
    }

    pub const fn month(&self) -> Option<u16> {
        self.get(TimeUnit::Month)
    }

    pub const fn day(&self) -> Option<u16> {
        self.get(TimeUnit::Day)
    }

    pub const fn hour(&self) -> Option<u16> {
        self.get(TimeUnit::Hour)
    }

    pub const fn minute(&self) -> Option<u16> {
        self.get(TimeUnit::Minute)
    }

    pub const fn second(&self) -> Option<u16> {
        self.get(TimeUnit::Second)
    }

    pub const fn decis(&self) -> Option<u16> {
        self.get(TimeUnit::Decisecond)
    }

    pub const fn centis(&self) -> Option<u16> {
        self.get(TimeUnit::Centisecond)
    }

    pub const fn millis(&self) -> Option<u16> {
        self.get(TimeUnit::Millisecond)
    }

    pub const fn ten_millis(&self) -> Option<u16> {
        self.get(TimeUnit::TenMillisecond)
    }

    pub const fn hun_millis(&self) -> Option<u16> {
        self.get(TimeUnit::HundredMillisecond)
    }

    pub const fn micros(&self) -> Option<u16> {
        self.get(TimeUnit::Microsecond)
    }

    /// Sum of every present field times its fixed weight, in microseconds.
    ///
    /// Months count as 30.42 days and years as 365 days, so this orders
    /// values but is not a position on the calendar.
    pub fn magnitude(&self) -> u64 {
        TimeUnit::ALL
            .into_iter()
            .zip(self.fields)
            .filter_map(|(unit, value)| value.map(|v| u64::from(v) * unit.weight_micros()))
            .sum()
    }

    /// Orders by magnitude alone. Unlike `partial_cmp`, values with the same
    /// magnitude but different fields compare `Equal`, which makes this usable
    /// with `sort_by`.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.magnitude().cmp(&other.magnitude())
    }
}

impl PartialOrd for PartialDate {
    /// `None` when both sides weigh the same but differ field-wise, e.g. an
    /// absent hour against an hour of zero.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_magnitude(other) {
            Ordering::Equal if self != other => None,
            ord => Some(ord),
        }
    }
}

impl fmt::Display for PartialDate {
    /// Formats as `YYYYmmdd_HHMMSS_DCITHF`, writing absent fields as zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [y, mo, d, h, mi, s, sub @ ..] = self.fields.map(|v| v.unwrap_or(0));
        write!(f, "{y:04}{mo:02}{d:02}_{h:02}{mi:02}{s:02}_")?;
        sub.iter().try_for_each(|digit| write!(f, "{digit}"))
    }
}

impl TryFrom<PartialDateFields> for PartialDate {
    type Error = ValidationError;

    fn try_from(value: PartialDateFields) -> Result<Self, Self::Error> {
        Self::from_fields([
            value.year,
            value.month,
            value.day,
            value.hour,
            value.minute,
            value.second,
            value.decis,
            value.centis,
            value.millis,
            value.ten_millis,
            value.hun_millis,
            value.micros,
        ])
    }
}

impl From<PartialDate> for PartialDateFields {
    fn from(date: PartialDate) -> Self {
        let [year, month, day, hour, minute, second, decis, centis, millis, ten_millis, hun_millis, micros] =
            date.fields;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            decis,
            centis,
            millis,
            ten_millis,
            hun_millis,
            micros,
        }
    }
}

impl TryFrom<[Option<u16>; FIELD_COUNT]> for PartialDate {
    type Error = ValidationError;

    fn try_from(value: [Option<u16>; FIELD_COUNT]) -> Result<Self, Self::Error> {
        Self::from_fields(value)
    }
}
