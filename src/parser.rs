use std::sync::OnceLock;

use tracing::{debug, error, trace};

use crate::{DEFAULT_LAYOUTS, Layout, LayoutError, ParseError, PartialDate, digits_of};

/// Where the digits fed to a matched layout are taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DigitSource {
    /// Only the span the layout matched. Other numbers in the input, such as
    /// a counter in `IMG_0042_20220226`, are ignored.
    #[default]
    MatchedSpan,
    /// Every digit of the input. Any digit outside the match makes the
    /// extraction fail with `ParseError::DigitCountMismatch`.
    WholeInput,
}

/// An ordered list of layouts, tried first to last against each input.
///
/// Earlier layouts win, so longer and more informative layouts must come
/// before the shorter ones they contain.
#[derive(Debug, Clone)]
pub struct DateParser {
    layouts:      Vec<Layout>,
    digit_source: DigitSource,
}

static BUILTIN: OnceLock<Result<DateParser, LayoutError>> = OnceLock::new();

impl DateParser {
    /// Compiles `layouts`, keeping their order as the priority order.
    ///
    /// # Errors
    /// Returns the first `LayoutError` among the layouts.
    pub fn new<I>(layouts: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let layouts = layouts
            .into_iter()
            .map(|layout| Layout::new(layout.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            layouts,
            digit_source: DigitSource::default(),
        })
    }

    /// Shared parser over [`DEFAULT_LAYOUTS`], compiled on first use.
    ///
    /// # Errors
    /// Returns the `LayoutError` of the built-in catalog, which would be a bug
    /// in the crate itself.
    pub fn builtin() -> Result<&'static Self, &'static LayoutError> {
        BUILTIN.get_or_init(|| Self::new(DEFAULT_LAYOUTS)).as_ref()
    }

    #[must_use]
    pub fn with_digit_source(mut self, digit_source: DigitSource) -> Self {
        self.digit_source = digit_source;
        self
    }

    pub const fn digit_source(&self) -> DigitSource {
        self.digit_source
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Returns the date found by the first matching layout, or `None`.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first matching layout whose digits
    /// cannot be extracted, without trying the remaining layouts.
    pub fn try_parse(&self, input: &str) -> Result<Option<PartialDate>, ParseError> {
        for layout in &self.layouts {
            if let Some(date) = self.parse_with(layout, input)? {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }

    /// Like [`DateParser::try_parse`], but a layout whose extraction fails is
    /// logged and skipped in favor of the next one.
    pub fn parse(&self, input: &str) -> Option<PartialDate> {
        self.layouts.iter().find_map(|layout| {
            self.parse_with(layout, input).unwrap_or_else(|err| {
                error!(layout = %layout, input, %err, "layout matched but extraction failed");
                None
            })
        })
    }

    fn parse_with(&self, layout: &Layout, input: &str) -> Result<Option<PartialDate>, ParseError> {
        let Some(span) = layout.find(input) else {
            trace!(layout = %layout, input, "no match");
            return Ok(None);
        };
        let digits = match self.digit_source {
            DigitSource::MatchedSpan => digits_of(span),
            DigitSource::WholeInput => digits_of(input),
        };
        let date = layout.extract(&digits)?;
        debug!(layout = %layout, span, input, %date, "found date");
        Ok(Some(date))
    }
}

/// Finds a date in `input` using the built-in layouts.
///
/// Returns `None` when no layout matches.
pub fn parse_date(input: &str) -> Option<PartialDate> {
    match DateParser::builtin() {
        Ok(parser) => parser.parse(input),
        Err(err) => {
            error!(%err, "built-in layouts failed to compile");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, noisy};
    use crate::{LayoutError, TimeUnit};

    fn assert_all_parse_to(inputs: &[&str], expected: PartialDate) {
        for input in inputs {
            let text = noisy(input);
            assert_eq!(parse_date(&text), Some(expected), "parsing {text:?}");
        }
    }

    #[test]
    fn test_builtin_compiles() {
        let parser = DateParser::builtin().unwrap();
        assert_eq!(parser.layouts().len(), DEFAULT_LAYOUTS.len());
        assert_eq!(parser.digit_source(), DigitSource::MatchedSpan);
        for (layout, source) in parser.layouts().iter().zip(DEFAULT_LAYOUTS) {
            assert_eq!(layout.as_str(), source);
        }
    }

    #[test]
    fn test_longer_layouts_come_first() {
        // A layout whose units all appear in a later, longer layout would
        // shadow the more informative one.
        let parser = DateParser::builtin().unwrap();
        let units = |l: &Layout| l.runs().iter().map(|r| r.unit).collect::<Vec<TimeUnit>>();
        for (i, earlier) in parser.layouts().iter().enumerate() {
            for later in &parser.layouts()[i + 1..] {
                let earlier_units = units(earlier);
                let later_units = units(later);
                let subsumed = earlier_units.len() < later_units.len()
                    && earlier_units.iter().all(|u| later_units.contains(u));
                assert!(!subsumed, "{earlier} shadows {later}");
            }
        }
    }

    #[test]
    fn test_year_month_day() {
        assert_all_parse_to(
            &[
                "20220226",
                "2022.02.26",
                "2022-02-26",
                "2022_02_26",
                "2022/02/26",
                "26022022",
                "26.02.2022",
                "26-02-2022",
                "26_02_2022",
                "26/02/2022",
            ],
            date(&[2022, 2, 26]),
        );
    }

    #[test]
    fn test_year_month() {
        assert_all_parse_to(
            &[
                "202202",
                "2022.02",
                "2022-02",
                "2022_02",
                "2022/02",
                "022022",
                "02.2022",
                "02-2022",
                "02_2022",
                "02/2022",
            ],
            date(&[2022, 2]),
        );
    }

    #[test]
    fn test_decis() {
        assert_all_parse_to(
            &[
                "202202262359599",
                "2022.02.26.23.59.59.9",
                "959592326022022",
                "9.59.59.23.26.02.2022",
            ],
            date(&[2022, 2, 26, 23, 59, 59, 9]),
        );
    }

    #[test]
    fn test_centis() {
        assert_all_parse_to(
            &[
                "2022022623595999",
                "2022.02.26.23.59.59.9.9",
                "9959592326022022",
                "9.9.59.59.23.26.02.2022",
            ],
            date(&[2022, 2, 26, 23, 59, 59, 9, 9]),
        );
    }

    #[test]
    fn test_millis() {
        assert_all_parse_to(
            &[
                "20220226235959999",
                "2022.02.26.23.59.59.9.9.9",
                "99959592326022022",
                "9.9.9.59.59.23.26.02.2022",
            ],
            date(&[2022, 2, 26, 23, 59, 59, 9, 9, 9]),
        );
    }

    #[test]
    fn test_micros() {
        assert_all_parse_to(
            &[
                "20220226235959999999",
                "2022.02.26.23.59.59.999999",
                "99999959592326022022",
                "999999.59.59.23.26.02.2022",
            ],
            date(&[2022, 2, 26, 23, 59, 59, 9, 9, 9, 9, 9, 9]),
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(parse_date("no_date_here"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date(&noisy("")), None);
        assert_eq!(parse_date("IMG_0042.jpg"), None);
        assert_eq!(DateParser::builtin().unwrap().try_parse("no_date_here"), Ok(None));
    }

    #[test]
    fn test_bare_year_fallback() {
        assert_eq!(parse_date("holiday 1987"), Some(date(&[1987])));
        // 1799 is out of range, but 2023 further on is a year
        assert_eq!(parse_date("1799 and 2023"), Some(date(&[2023])));
    }

    #[test]
    fn test_first_layout_in_list_wins() {
        let full_first = DateParser::new(["YYYYmmdd", "YYYY"]).unwrap();
        assert_eq!(full_first.parse("20220226"), Some(date(&[2022, 2, 26])));

        let year_first = DateParser::new(["YYYY", "YYYYmmdd"]).unwrap();
        assert_eq!(year_first.parse("20220226"), Some(date(&[2022])));

        assert_eq!(parse_date("20220226"), Some(date(&[2022, 2, 26])));
    }

    #[test]
    fn test_day_first_layout_precedes_year_first() {
        // Both readings are valid; ddmmYYYY is listed before YYYYmmdd
        assert_eq!(parse_date("12102010"), Some(date(&[2010, 10, 12])));
    }

    #[test]
    fn test_single_numeric_run() {
        for source in [DigitSource::MatchedSpan, DigitSource::WholeInput] {
            let parser = DateParser::builtin().unwrap().clone().with_digit_source(source);
            assert_eq!(
                parser.try_parse("IMG_2022-02-26.jpg"),
                Ok(Some(date(&[2022, 2, 26]))),
                "{source:?}"
            );
        }
    }

    #[test]
    fn test_multiple_numeric_runs_matched_span() {
        let parser = DateParser::builtin().unwrap();
        assert_eq!(parser.try_parse("IMG_1999_20220226"), Ok(Some(date(&[2022, 2, 26]))));
        assert_eq!(parse_date("IMG_1999_20220226"), Some(date(&[2022, 2, 26])));
    }

    #[test]
    fn test_multiple_numeric_runs_whole_input() {
        let parser = DateParser::builtin()
            .unwrap()
            .clone()
            .with_digit_source(DigitSource::WholeInput);
        assert_eq!(
            parser.try_parse("IMG_1999_20220226"),
            Err(ParseError::DigitCountMismatch {
                layout:   "YYYYmmdd".to_owned(),
                expected: 8,
                found:    12,
            })
        );
        // Every matching layout sees the stray digits, so nothing is returned
        assert_eq!(parser.parse("IMG_1999_20220226"), None);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        assert_eq!(
            DateParser::new(["YYYYmmdd", "YYYYxx"]).unwrap_err(),
            LayoutError::UnknownToken {
                token:    "xx".to_owned(),
                position: 4,
            }
        );
        let empty: [&str; 0] = [];
        let parser = DateParser::new(empty).unwrap();
        assert_eq!(parser.parse("20220226"), None);
    }

    #[test]
    fn test_deterministic() {
        let input = noisy("2022.02.26.23.59.59.999999");
        let first = parse_date(&input);
        for _ in 0..10 {
            assert_eq!(parse_date(&input), first);
        }
    }

    #[test]
    fn test_concurrent_parsing() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DateParser>();
        assert_send_sync::<PartialDate>();

        let names = ["IMG_20220226.jpg", "VID_26-02-2022.mp4", "scan_2022_02.pdf", "notes.txt"];
        let expected: Vec<_> = names.iter().map(|n| parse_date(n)).collect();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| names.iter().map(|n| parse_date(n)).collect::<Vec<_>>()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
        assert_eq!(expected[0], Some(date(&[2022, 2, 26])));
        assert_eq!(expected[1], Some(date(&[2022, 2, 26])));
        assert_eq!(expected[2], Some(date(&[2022, 2])));
        assert_eq!(expected[3], None);
    }
}
