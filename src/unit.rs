use crate::consts::{
    FIELD_COUNT, MAX_DAY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_SUBSECOND_DIGIT,
    MAX_YEAR, MIN_DAY, MIN_MONTH, MIN_YEAR, UNIT_WEIGHTS_MICROS,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The twelve fields a partial date is made of, in significance order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "deci-second")]
    Decisecond,
    #[display(fmt = "centi-second")]
    Centisecond,
    #[display(fmt = "milli-second")]
    Millisecond,
    #[display(fmt = "ten-milli-second")]
    TenMillisecond,
    #[display(fmt = "hundred-milli-second")]
    HundredMillisecond,
    #[display(fmt = "micro-second")]
    Microsecond,
}

/// One catalog entry: how a unit is written in a layout, and how its digits
/// are recognised in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubPattern {
    pub unit:     TimeUnit,
    /// Layout token, always a repetition of a single character
    pub token:    &'static str,
    /// Regex fragment matching exactly `token.len()` digits
    pub fragment: &'static str,
    pub min:      u16,
    pub max:      u16,
}

impl SubPattern {
    /// Whether `value` lies in this unit's inclusive range
    #[inline]
    pub const fn contains(&self, value: u16) -> bool {
        self.min <= value && value <= self.max
    }

    /// Number of digits the fragment consumes
    #[inline]
    pub const fn width(&self) -> usize {
        self.token.len()
    }
}

const fn subsecond(unit: TimeUnit, token: &'static str) -> SubPattern {
    SubPattern {
        unit,
        token,
        fragment: "[0-9]",
        min: 0,
        max: MAX_SUBSECOND_DIGIT,
    }
}

/// Indexed by `TimeUnit as usize`.
static SUB_PATTERNS: [SubPattern; FIELD_COUNT] = [
    SubPattern {
        unit:     TimeUnit::Year,
        token:    "YYYY",
        fragment: "(?:18[0-9]{2}|19[0-9]{2}|2[0-9]{3})",
        min:      MIN_YEAR,
        max:      MAX_YEAR,
    },
    SubPattern {
        unit:     TimeUnit::Month,
        token:    "mm",
        fragment: "(?:1[0-2]|0[1-9])",
        min:      MIN_MONTH,
        max:      MAX_MONTH,
    },
    SubPattern {
        unit:     TimeUnit::Day,
        token:    "dd",
        fragment: "(?:3[01]|[12][0-9]|0[1-9])",
        min:      MIN_DAY,
        max:      MAX_DAY,
    },
    SubPattern {
        unit:     TimeUnit::Hour,
        token:    "HH",
        fragment: "(?:[01][0-9]|2[0-3])",
        min:      0,
        max:      MAX_HOUR,
    },
    SubPattern {
        unit:     TimeUnit::Minute,
        token:    "MM",
        fragment: "[0-5][0-9]",
        min:      0,
        max:      MAX_MINUTE,
    },
    SubPattern {
        unit:     TimeUnit::Second,
        token:    "SS",
        fragment: "[0-5][0-9]",
        min:      0,
        max:      MAX_SECOND,
    },
    subsecond(TimeUnit::Decisecond, "D"),
    subsecond(TimeUnit::Centisecond, "C"),
    subsecond(TimeUnit::Millisecond, "I"),
    subsecond(TimeUnit::TenMillisecond, "T"),
    subsecond(TimeUnit::HundredMillisecond, "H"),
    subsecond(TimeUnit::Microsecond, "F"),
];

impl TimeUnit {
    /// All units, most significant first
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Decisecond,
        Self::Centisecond,
        Self::Millisecond,
        Self::TenMillisecond,
        Self::HundredMillisecond,
        Self::Microsecond,
    ];

    /// The six single-digit units following `Second`
    pub const SUBSECONDS: [Self; 6] = [
        Self::Decisecond,
        Self::Centisecond,
        Self::Millisecond,
        Self::TenMillisecond,
        Self::HundredMillisecond,
        Self::Microsecond,
    ];

    /// Position of this unit in significance order
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Catalog entry for this unit
    #[inline]
    pub fn sub_pattern(self) -> &'static SubPattern {
        &SUB_PATTERNS[self.index()]
    }

    /// Weight of one unit of this field, in microseconds
    #[inline]
    pub const fn weight_micros(self) -> u64 {
        UNIT_WEIGHTS_MICROS[self.index()]
    }

    /// Resolves a run of `len` consecutive `symbol` characters to a unit.
    ///
    /// The run must spell a token exactly: `HH` is the hour, `H` the
    /// hundred-millisecond, and `HHH` nothing at all.
    pub fn from_token(symbol: char, len: usize) -> Option<Self> {
        SUB_PATTERNS
            .iter()
            .find(|p| p.token.len() == len && p.token.chars().all(|c| c == symbol))
            .map(|p| p.unit)
    }
}
