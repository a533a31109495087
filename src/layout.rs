use std::fmt;

use regex::Regex;

use crate::{FIELD_COUNT, PartialDate, SEPARATOR_PATTERN, TimeUnit, ValidationError};

/// A maximal group of identical layout characters, standing for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub unit: TimeUnit,
    /// Number of digits the field takes in the text
    pub len:  usize,
}

/// Error building a [`Layout`]. Layouts are static configuration, so these
/// point at a programming mistake rather than at bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Empty layout")]
    Empty,

    #[error("Unknown token {token:?} at position {position}")]
    UnknownToken { token: String, position: usize },

    #[error("Unit {0} appears more than once")]
    DuplicateUnit(TimeUnit),

    #[error("Layout does not compile: {0}")]
    Regex(String),
}

impl From<regex::Error> for LayoutError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

/// Error turning a matched digit stream into a [`PartialDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The digit stream does not line up with the layout's runs.
    #[error("Layout {layout} expects {expected} digits, found {found}")]
    DigitCountMismatch {
        layout:   String,
        expected: usize,
        found:    usize,
    },

    #[error("Invalid digits {0:?}")]
    InvalidDigits(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A candidate arrangement of fields such as `YYYYmmdd`, compiled into a
/// regex that finds it anywhere in a string.
#[derive(Debug, Clone)]
pub struct Layout {
    source: String,
    runs:   Vec<Run>,
    regex:  Regex,
}

impl Layout {
    /// Parses and compiles a layout.
    ///
    /// # Errors
    /// Returns `LayoutError` if the layout is empty, contains a run that is
    /// not a catalog token, or names a unit twice.
    pub fn new(source: &str) -> Result<Self, LayoutError> {
        let runs = split_runs(source)?;
        let regex = Regex::new(&compose_pattern(&runs))?;
        Ok(Self {
            source: source.to_owned(),
            runs,
            regex,
        })
    }

    /// The layout as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The composed, unanchored regex
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Total digits a match of this layout contains
    pub fn digit_count(&self) -> usize {
        self.runs.iter().map(|run| run.len).sum()
    }

    /// Leftmost match of this layout in `haystack`, separators included.
    pub fn find<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        self.regex.find(haystack).map(|m| m.as_str())
    }

    /// Splits `digits` along the layout's runs into a date.
    ///
    /// # Errors
    /// Returns `ParseError::DigitCountMismatch` unless `digits` holds exactly
    /// [`Layout::digit_count`] characters, `ParseError::InvalidDigits` if a
    /// run is not decimal, and `ParseError::Validation` if a value is out of
    /// its unit's range.
    pub fn extract(&self, digits: &str) -> Result<PartialDate, ParseError> {
        let expected = self.digit_count();
        if digits.len() != expected {
            return Err(ParseError::DigitCountMismatch {
                layout: self.source.clone(),
                expected,
                found: digits.len(),
            });
        }

        let mut fields = [None; FIELD_COUNT];
        let mut rest = digits;
        for run in &self.runs {
            let (chunk, tail) = rest
                .split_at_checked(run.len)
                .ok_or_else(|| ParseError::InvalidDigits(rest.to_owned()))?;
            if !chunk.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidDigits(chunk.to_owned()));
            }
            let value = chunk
                .parse::<u16>()
                .map_err(|_| ParseError::InvalidDigits(chunk.to_owned()))?;
            fields[run.unit.index()] = Some(value);
            rest = tail;
        }
        Ok(PartialDate::from_fields(fields)?)
    }

    /// Finds this layout in `input` and extracts the date from the digits of
    /// the matched span only.
    ///
    /// # Errors
    /// See [`Layout::extract`].
    pub fn parse(&self, input: &str) -> Result<Option<PartialDate>, ParseError> {
        self.find(input)
            .map(|span| self.extract(&digits_of(span)))
            .transpose()
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Layout {}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Keeps the ASCII digits of `s`, dropping separators and everything else.
pub fn digits_of(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Single pass run-length grouping of a layout, resolving each run to a unit.
fn split_runs(source: &str) -> Result<Vec<Run>, LayoutError> {
    let mut runs: Vec<Run> = Vec::new();
    let mut seen = [false; FIELD_COUNT];
    let mut chars = source.char_indices().peekable();

    while let Some((position, symbol)) = chars.next() {
        let mut len = 1;
        while chars.next_if(|&(_, c)| c == symbol).is_some() {
            len += 1;
        }
        let unit = TimeUnit::from_token(symbol, len).ok_or_else(|| LayoutError::UnknownToken {
            token: std::iter::repeat_n(symbol, len).collect(),
            position,
        })?;
        if std::mem::replace(&mut seen[unit.index()], true) {
            return Err(LayoutError::DuplicateUnit(unit));
        }
        runs.push(Run { unit, len });
    }

    if runs.is_empty() {
        return Err(LayoutError::Empty);
    }
    Ok(runs)
}

/// Concatenates each run's fragment, each followed by an optional separator.
fn compose_pattern(runs: &[Run]) -> String {
    runs.iter().fold(String::new(), |mut pattern, run| {
        pattern.push_str(run.unit.sub_pattern().fragment);
        pattern.push_str(SEPARATOR_PATTERN);
        pattern
    })
}
