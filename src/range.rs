use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    DATE_SEPARATOR, DECEMBER, DateValue, JANUARY, MAX_VALID_YEAR, MIN_DAY, MIN_VALID_YEAR, MONTHS_PER_YEAR,
    NOW_KEYWORD, ParseError, Precision, RANGE_SEPARATOR, days_in_month,
};

/// Inclusive window of selectable dates.
/// `min` is never after `max` at day precision; an unconfigured side sits at
/// the first or last valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    min: DateValue,
    max: DateValue,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Min date is after max date.
    #[error("Invalid date range: min ({min}) is after max ({max})")]
    InvalidRange { min: DateValue, max: DateValue },

    /// Error parsing a date value.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// A side of the range string is neither `NOW` nor `YYYY[-MM[-DD]]`.
    #[error("Invalid range bound: {0:?}")]
    InvalidBound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Min,
    Max,
}

impl Default for DateRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl DateRange {
    /// The range used when nothing (or nothing usable) is configured: every
    /// valid date, so stepping stops at the edge of the four digit years.
    pub const UNBOUNDED: Self = Self {
        min: DateValue::from_ymd(MIN_VALID_YEAR, JANUARY, MIN_DAY),
        max: DateValue::from_ymd(MAX_VALID_YEAR, DECEMBER, 31),
    };

    /// Creates a range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if min > max at day precision.
    pub fn new(min: DateValue, max: DateValue) -> Result<Self, RangeError> {
        if min.compare(&max, Precision::Day) == Ordering::Greater {
            return Err(RangeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> DateValue {
        self.min
    }

    pub const fn max(&self) -> DateValue {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Strict parse of a `min:max` range string, each side `NOW` or
    /// `YYYY[-MM[-DD]]`. A missing or empty side is unbounded.
    ///
    /// A side given as a bare year or year-month covers the whole period: on
    /// the min side it starts on the first day, on the max side it ends on the
    /// last. An out-of-range month or day inside a side resets to 1.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidBound` for a malformed side and
    /// `RangeError::InvalidRange` if the result is inverted.
    pub fn parse(spec: &str, today: DateValue) -> Result<Self, RangeError> {
        let mut sides = spec.split(RANGE_SEPARATOR);
        let min = Self::parse_side(sides.next(), Side::Min, today)?;
        let max = Self::parse_side(sides.next(), Side::Max, today)?;
        Self::new(min, max)
    }

    /// Lenient counterpart of [`DateRange::parse`] used for configuration.
    ///
    /// Never fails: a malformed side falls back to unbounded on that side, and
    /// an inverted result is replaced by [`DateRange::UNBOUNDED`] as a whole.
    pub fn normalize(spec: Option<&str>, today: DateValue) -> Self {
        let Some(spec) = spec else {
            return Self::UNBOUNDED;
        };

        let mut sides = spec.split(RANGE_SEPARATOR);
        let mut side_or_unbounded = |side: Side| {
            Self::parse_side(sides.next(), side, today).unwrap_or_else(|err| {
                tracing::warn!(range = spec, ?side, %err, "ignoring malformed range bound");
                Self::unbounded_side(side)
            })
        };
        let min = side_or_unbounded(Side::Min);
        let max = side_or_unbounded(Side::Max);

        Self::new(min, max).unwrap_or_else(|err| {
            tracing::warn!(range = spec, %err, "discarding inverted date range");
            Self::UNBOUNDED
        })
    }

    const fn unbounded_side(side: Side) -> DateValue {
        match side {
            Side::Min => Self::UNBOUNDED.min,
            Side::Max => Self::UNBOUNDED.max,
        }
    }

    fn parse_side(raw: Option<&str>, side: Side, today: DateValue) -> Result<DateValue, RangeError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::unbounded_side(side)),
            Some(raw) => raw,
        };

        if raw.eq_ignore_ascii_case(NOW_KEYWORD) {
            return Ok(today);
        }

        let parts: Vec<&str> = raw.split(DATE_SEPARATOR).collect();
        let well_formed = match parts.as_slice() {
            [year, rest @ ..] if rest.len() <= 2 => {
                Self::is_digits(year, 4, 4) && rest.iter().all(|p| Self::is_digits(p, 1, 2))
            },
            _ => false,
        };
        if !well_formed {
            return Err(RangeError::InvalidBound(raw.to_owned()));
        }

        let year = Self::parse_i32(parts[0])?;
        let month = match parts.get(1) {
            Some(month) => Self::parse_u8(month)?,
            None if side == Side::Max => MONTHS_PER_YEAR,
            None => 1,
        };
        let month0 = if (1..=MONTHS_PER_YEAR).contains(&month) {
            month - 1
        } else {
            JANUARY
        };

        let last_day = days_in_month(year, month0);
        let day = match parts.get(2) {
            Some(day) => Self::parse_u8(day)?,
            None if side == Side::Max => last_day,
            None => MIN_DAY,
        };
        let day = if (MIN_DAY..=last_day).contains(&day) { day } else { MIN_DAY };

        Ok(DateValue::from_ymd(year, month0, day))
    }

    fn is_digits(s: &str, min_len: usize, max_len: usize) -> bool {
        (min_len..=max_len).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    }

    fn parse_i32(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Checks if the range contains a date at full precision.
    pub fn contains(&self, date: &DateValue) -> bool {
        self.contains_at(date, Precision::Day)
    }

    /// Checks containment looking only as deep as `precision`, so a year is
    /// inside the range when any part of it is.
    pub fn contains_at(&self, date: &DateValue, precision: Precision) -> bool {
        date.compare(&self.max, precision) != Ordering::Greater && date.compare(&self.min, precision) != Ordering::Less
    }

    /// Fits a date into the range.
    ///
    /// A structurally invalid date is first replaced by `today`. A date before
    /// `min` becomes `min`, one after `max` becomes `max`; anything else is
    /// returned unchanged. Idempotent: clamping a clamped value is a no-op.
    pub fn clamp(&self, date: DateValue, today: DateValue) -> DateValue {
        let date = if date.is_valid() { date } else { today };

        if date.compare(&self.min, Precision::Day) == Ordering::Less {
            self.min
        } else if date.compare(&self.max, Precision::Day) == Ordering::Greater {
            self.max
        } else {
            date
        }
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    /// Strict parse resolving `NOW` against the local date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DateValue::today())
    }
}

impl fmt::Display for DateRange {
    /// Writes `min:max`, leaving an unbounded side empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min != Self::UNBOUNDED.min {
            write!(f, "{}", self.min)?;
        }
        write!(f, "{RANGE_SEPARATOR}")?;
        if self.max != Self::UNBOUNDED.max {
            write!(f, "{}", self.max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: DateValue = DateValue::from_ymd(2026, 9, 19);

    #[test]
    fn test_normalize_cases() {
        struct TestCase {
            spec:        Option<&'static str>,
            min:         DateValue,
            max:         DateValue,
            description: &'static str,
        }

        let unbounded = DateRange::UNBOUNDED;
        let cases = [
            TestCase {
                spec:        Some("2013-01-01:2013-12-12"),
                min:         DateValue::from_ymd(2013, 0, 1),
                max:         DateValue::from_ymd(2013, 11, 12),
                description: "full dates",
            },
            TestCase {
                spec:        Some("1990:2020"),
                min:         DateValue::from_ymd(1990, 0, 1),
                max:         DateValue::from_ymd(2020, 11, 31),
                description: "legacy year-only range",
            },
            TestCase {
                spec:        Some("1990-08-25:2020-11"),
                min:         DateValue::from_ymd(1990, 7, 25),
                max:         DateValue::from_ymd(2020, 10, 30),
                description: "month precision max ends the month",
            },
            TestCase {
                spec:        Some("2020-2:2020-2"),
                min:         DateValue::from_ymd(2020, 1, 1),
                max:         DateValue::from_ymd(2020, 1, 29),
                description: "single leap February",
            },
            TestCase {
                spec:        Some("2020:1990"),
                min:         unbounded.min(),
                max:         unbounded.max(),
                description: "inverted range is discarded",
            },
            TestCase {
                spec:        Some("2015-06-15:2015-06-15"),
                min:         DateValue::from_ymd(2015, 5, 15),
                max:         DateValue::from_ymd(2015, 5, 15),
                description: "single day range",
            },
            TestCase {
                spec:        Some("2000-13-40:2001"),
                min:         DateValue::from_ymd(2000, 0, 1),
                max:         DateValue::from_ymd(2001, 11, 31),
                description: "bad month and day reset to 1",
            },
            TestCase {
                spec:        Some("2001-02-30:2001"),
                min:         DateValue::from_ymd(2001, 1, 1),
                max:         DateValue::from_ymd(2001, 11, 31),
                description: "day past the month end resets to 1",
            },
            TestCase {
                spec:        Some("garbage:2020"),
                min:         unbounded.min(),
                max:         DateValue::from_ymd(2020, 11, 31),
                description: "malformed min side only",
            },
            TestCase {
                spec:        Some("2020-01-01:20x0"),
                min:         DateValue::from_ymd(2020, 0, 1),
                max:         unbounded.max(),
                description: "malformed max side only",
            },
            TestCase {
                spec:        Some("2020"),
                min:         DateValue::from_ymd(2020, 0, 1),
                max:         unbounded.max(),
                description: "missing max side",
            },
            TestCase {
                spec:        Some(":2020-06"),
                min:         unbounded.min(),
                max:         DateValue::from_ymd(2020, 5, 30),
                description: "empty min side",
            },
            TestCase {
                spec:        Some("now:2030"),
                min:         TODAY,
                max:         DateValue::from_ymd(2030, 11, 31),
                description: "NOW keyword is case-insensitive",
            },
            TestCase {
                spec:        None,
                min:         unbounded.min(),
                max:         unbounded.max(),
                description: "no range configured",
            },
        ];

        for case in &cases {
            let range = DateRange::normalize(case.spec, TODAY);
            assert_eq!(range.min(), case.min, "min for {}", case.description);
            assert_eq!(range.max(), case.max, "max for {}", case.description);
        }
    }

    #[test]
    fn test_parse_strict_errors() {
        assert!(matches!(
            DateRange::parse("2020:1990", TODAY),
            Err(RangeError::InvalidRange { .. })
        ));
        assert!(matches!(
            DateRange::parse("20:1990", TODAY),
            Err(RangeError::InvalidBound(_))
        ));
        assert!(matches!(
            DateRange::parse("2020-01-01-01:2021", TODAY),
            Err(RangeError::InvalidBound(_))
        ));
        let range = DateRange::parse("NOW:", TODAY).expect("open-ended range parses");
        assert_eq!(range.min(), TODAY);
        assert_eq!(range.max(), DateRange::UNBOUNDED.max());
    }

    #[test]
    fn test_new_rejects_inverted() {
        let a = DateValue::from_ymd(2020, 0, 2);
        let b = DateValue::from_ymd(2020, 0, 1);
        assert!(DateRange::new(b, a).is_ok());
        assert!(DateRange::new(a, a).is_ok());
        let err = DateRange::new(a, b).expect_err("inverted range must fail");
        assert_eq!(
            err.to_string(),
            "Invalid date range: min (2020-01-02) is after max (2020-01-01)"
        );
    }

    #[test]
    fn test_contains() {
        let range = DateRange::normalize(Some("2020-03-10:2020-05-20"), TODAY);

        assert!(range.contains(&DateValue::from_ymd(2020, 2, 10)));
        assert!(range.contains(&DateValue::from_ymd(2020, 4, 20)));
        assert!(!range.contains(&DateValue::from_ymd(2020, 2, 9)));
        assert!(!range.contains(&DateValue::from_ymd(2020, 4, 21)));
        assert!(range.contains(&DateValue::from_ym(2020, 2)), "position compares to the month");
    }

    #[test]
    fn test_contains_at_precision() {
        let range = DateRange::normalize(Some("2020-03-10:2020-05-20"), TODAY);
        let january = DateValue::from_ymd(2020, 0, 1);

        assert!(!range.contains_at(&january, Precision::Month));
        assert!(range.contains_at(&january, Precision::Year));
        assert!(range.contains_at(&DateValue::from_ymd(2020, 4, 31), Precision::Month));
        assert!(!range.contains_at(&DateValue::from_ymd(2021, 0, 1), Precision::Year));
    }

    #[test]
    fn test_clamp() {
        let range = DateRange::normalize(Some("2020-03-10:2020-05-20"), TODAY);
        let inside = DateValue::from_ymd(2020, 3, 1);

        assert_eq!(range.clamp(inside, TODAY), inside);
        assert_eq!(range.clamp(DateValue::from_ymd(2019, 0, 1), TODAY), range.min());
        assert_eq!(range.clamp(DateValue::from_ymd(2021, 0, 1), TODAY), range.max());
        // invalid dates fall back to today, which is then clamped too
        assert_eq!(range.clamp(DateValue::from_ymd(2020, 1, 30), TODAY), range.max());

        let open = DateRange::UNBOUNDED;
        assert_eq!(open.clamp(DateValue::from_ymd(2020, 1, 30), TODAY), TODAY);
        assert_eq!(open.clamp(DateValue::from_ym(2020, 1), TODAY), DateValue::from_ym(2020, 1));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let ranges = [
            DateRange::UNBOUNDED,
            DateRange::normalize(Some("2020-03-10:2020-05-20"), TODAY),
            DateRange::normalize(Some("0500:0800"), TODAY),
            DateRange::normalize(Some("NOW:"), TODAY),
        ];
        let dates = [
            DateValue::from_ymd(2020, 3, 1),
            DateValue::from_ymd(1999, 0, 1),
            DateValue::from_ymd(2999, 11, 31),
            DateValue::from_ymd(2020, 1, 30),
            DateValue::from_ymd(12, 0, 1),
            DateValue::from_ym(2020, 6),
        ];

        for range in &ranges {
            for date in dates {
                let once = range.clamp(date, TODAY);
                assert_eq!(range.clamp(once, TODAY), once, "clamp({date}) in {range}");
            }
        }
    }

    #[test]
    fn test_unbounded_spans_valid_years() {
        let open = DateRange::UNBOUNDED;
        assert_eq!(open.min(), DateValue::from_ymd(1000, 0, 1));
        assert_eq!(open.max(), DateValue::from_ymd(9999, 11, 31));
        assert!(open.min().is_valid() && open.max().is_valid());
        assert_eq!(DateRange::normalize(Some(":2020"), TODAY).min(), open.min());
        assert_eq!(DateRange::normalize(Some("nonsense:2020"), TODAY).min(), open.min());
    }

    #[test]
    fn test_display() {
        assert_eq!(DateRange::UNBOUNDED.to_string(), ":");
        let range = DateRange::normalize(Some("1990:2020-06-01"), TODAY);
        assert_eq!(range.to_string(), "1990-01-01:2020-06-01");
        let range = DateRange::normalize(Some(":2020-06-01"), TODAY);
        assert_eq!(range.to_string(), ":2020-06-01");
    }

    #[test]
    fn test_default_is_unbounded() {
        assert!(DateRange::default().is_unbounded());
        assert!(!DateRange::normalize(Some("1990:2020"), TODAY).is_unbounded());
    }
}
