/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1800;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 2999;

/// Month number for January
pub const MIN_MONTH: u16 = 1;
/// Month number for December
pub const MAX_MONTH: u16 = 12;

/// First day of month
pub const MIN_DAY: u16 = 1;
/// Upper day bound, not checked against the month length
pub const MAX_DAY: u16 = 31;

/// Last hour of the day
pub const MAX_HOUR: u16 = 23;
/// Last minute of the hour
pub const MAX_MINUTE: u16 = 59;
/// Last second of the minute (leap seconds are not representable)
pub const MAX_SECOND: u16 = 59;
/// Every sub-second field is a single base-10 digit
pub const MAX_SUBSECOND_DIGIT: u16 = 9;

/// Number of fields carried by a partial date
pub const FIELD_COUNT: usize = 12;
/// Number of single-digit sub-second fields
pub const SUBSECOND_DIGITS: usize = 6;
/// Exclusive upper bound of a six digit fractional-second value
pub const MAX_DECIMALS: u32 = 1_000_000;

/// Fixed weight of each field in microseconds, in significance order.
///
/// Months and years use fixed lengths (30.42 and 365 days), so the resulting
/// magnitude is only meaningful for ordering, never as calendar time.
pub const UNIT_WEIGHTS_MICROS: [u64; FIELD_COUNT] = [
    31_536_000_000_000, // year
    2_628_288_000_000,  // month
    86_400_000_000,     // day
    3_600_000_000,      // hour
    60_000_000,         // minute
    1_000_000,          // second
    100_000,            // decisecond
    10_000,             // centisecond
    1_000,              // millisecond
    100,                // ten-millisecond
    10,                 // hundred-millisecond
    1,                  // microsecond
];

/// Characters accepted between two fields of a layout (e.g. `_` in `2023_02_26`)
pub const SEPARATORS: [char; 7] = ['.', ',', ';', '/', '-', '_', '|'];
/// Regex fragment matching zero or one separator
pub const SEPARATOR_PATTERN: &str = r"[.,;/\-_|]?";

/// Layouts tried by the built-in parser, in priority order.
///
/// A layout must come before any shorter layout it contains: `mmYYYY` is
/// part of `ddmmYYYY`, so it is listed after it.
pub const DEFAULT_LAYOUTS: [&str; 23] = [
    "YYYYmmddHHMMSSDCITHF",
    "FHTICDSSMMHHddmmYYYY",
    "YYYYmmddHHMMSSDCITH",
    "HTICDSSMMHHddmmYYYY",
    "YYYYmmddHHMMSSDCIT",
    "TICDSSMMHHddmmYYYY",
    "YYYYmmddHHMMSSDCI",
    "ICDSSMMHHddmmYYYY",
    "YYYYmmddHHMMSSDC",
    "CDSSMMHHddmmYYYY",
    "YYYYmmddHHMMSSD",
    "DSSMMHHddmmYYYY",
    "SSMMHHddmmYYYY",
    "YYYYmmddHHMMSS",
    "MMHHddmmYYYY",
    "YYYYmmddHHMM",
    "HHddmmYYYY",
    "YYYYmmddHH",
    "ddmmYYYY",
    "YYYYmmdd",
    "mmYYYY",
    "YYYYmm",
    "YYYY",
];
