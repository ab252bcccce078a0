mod config;
mod consts;
mod navigator;
mod predicates;
mod prelude;
mod range;
mod types;
mod view;

pub use config::{DateFormat, NavigatorConfig, NavigatorOptions, Notify};
pub use consts::*;
pub use navigator::{Navigator, NavigatorError};
pub use predicates::{DateFinder, DatePredicate, Validity};
pub use range::{DateRange, RangeError};
pub use types::{Direction, Precision, SelectionState, Unit, days_in_month, is_leap_year};
pub use view::{DayCell, MonthCell, MonthSelector, MonthView, YearCell, YearSelector};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A year / zero-based month / optional day triple.
///
/// This is the unit every comparison and every navigation step works on. It
/// is a plain value: constructing one does not validate it, so an impossible
/// date such as 2021-02-31 can be represented and later rejected by
/// [`DateValue::is_valid`]. A value without a day is a browsing position
/// (a month on screen) rather than a picked date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateValue {
    year:  i32,
    month: u8,
    day:   Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_VALID_YEAR, MAX_VALID_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MONTHS_PER_YEAR)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DateValue {
    /// Creates a full date from a year, a zero-based month and a day.
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day: Some(day),
        }
    }

    /// Creates a browsing position (no day) from a year and a zero-based month.
    pub const fn from_ym(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            day: None,
        }
    }

    /// Today's date in the local time zone.
    pub fn today() -> Self {
        Local::now().date_naive().into()
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (January is 0)
    pub const fn month0(&self) -> u8 {
        self.month
    }

    /// One-based month (January is 1), the numbering used by caller callbacks
    pub const fn month(&self) -> u8 {
        self.month + 1
    }

    pub const fn day(&self) -> Option<u8> {
        self.day
    }

    /// Returns a copy carrying the given day (or none).
    #[must_use]
    pub const fn with_day(self, day: Option<u8>) -> Self {
        Self { day, ..self }
    }

    /// First year of the decade containing this value (2017 -> 2010, -3 -> -10).
    pub const fn decade(&self) -> i32 {
        self.year.div_euclid(DECADE) * DECADE
    }

    /// Structural validity: a four digit year, a month in `0..12` and, when a
    /// day is present, a day that exists in that month.
    pub fn is_valid(&self) -> bool {
        (MIN_VALID_YEAR..=MAX_VALID_YEAR).contains(&self.year)
            && self.month < MONTHS_PER_YEAR
            && self
                .day
                .is_none_or(|day| (MIN_DAY..=days_in_month(self.year, self.month)).contains(&day))
    }

    /// Compares two values down to `precision`.
    ///
    /// Years are compared first; with [`Precision::Year`] equal years compare
    /// equal whatever their months. Months follow, then days. When either side
    /// has no day the comparison stops at the month.
    pub fn compare(&self, other: &Self, precision: Precision) -> Ordering {
        match self.year.cmp(&other.year) {
            Ordering::Equal if precision > Precision::Year => {},
            ord => return ord,
        }
        match self.month.cmp(&other.month) {
            Ordering::Equal if precision > Precision::Month => {},
            ord => return ord,
        }
        match (self.day, other.day) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }

    /// Moves by `delta` months, wrapping across year ends. The day, if any, is
    /// shortened to fit the target month. Returns `None` if the year overflows.
    #[must_use]
    pub fn add_months(self, delta: i32) -> Option<Self> {
        let total = i64::from(self.year) * i64::from(MONTHS_PER_YEAR) + i64::from(self.month) + i64::from(delta);
        let year = i32::try_from(total.div_euclid(i64::from(MONTHS_PER_YEAR))).ok()?;
        let month = u8::try_from(total.rem_euclid(i64::from(MONTHS_PER_YEAR))).ok()?;
        Some(Self::fit_day(year, month, self.day))
    }

    /// Moves by `delta` years keeping the month. 29 February becomes
    /// 28 February outside leap years. Returns `None` if the year overflows.
    #[must_use]
    pub fn add_years(self, delta: i32) -> Option<Self> {
        let year = self.year.checked_add(delta)?;
        Some(Self::fit_day(year, self.month, self.day))
    }

    fn fit_day(year: i32, month: u8, day: Option<u8>) -> Self {
        Self {
            year,
            month,
            day: day.map(|d| d.min(days_in_month(year, month))),
        }
    }

    /// Checked constructor from calendar numbers, month one-based as people
    /// write it. The result is always valid.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `InvalidMonth` or `InvalidDay` for
    /// the first component out of range.
    pub fn from_calendar(year: i32, month: u8, day: Option<u8>) -> Result<Self, ParseError> {
        if !(MIN_VALID_YEAR..=MAX_VALID_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        let month0 = month - 1;
        if let Some(d) = day {
            if !(MIN_DAY..=days_in_month(year, month0)).contains(&d) {
                return Err(ParseError::InvalidDay { year, month, day: d });
            }
        }

        Ok(Self {
            year,
            month: month0,
            day,
        })
    }

    /// Converts a full, existing date to a `chrono` date.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month) + 1, u32::from(self.day?))
    }

    /// Reads a `YYYY-M-D` string (one or two digit month and day) without
    /// checking that the date exists. Month `0` or `13` comes back as an
    /// invalid value rather than an error; only the shape is checked.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match Self::split_components(s) {
            Ok((year, month, Some(day))) => Some(Self {
                year,
                month: month.wrapping_sub(1),
                day: Some(day),
            }),
            _ => None,
        }
    }

    /// Splits `YYYY-M` or `YYYY-M-D` into numbers, month still one-based.
    fn split_components(s: &str) -> Result<(i32, u8, Option<u8>), ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let (year, month, day) = match parts.as_slice() {
            [year, month] => (*year, *month, None),
            [year, month, day] => (*year, *month, Some(*day)),
            _ => return Err(ParseError::InvalidFormat(trimmed.to_owned())),
        };

        let is_digits = |p: &str, len: std::ops::RangeInclusive<usize>| {
            len.contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_digits(year, 4..=4) || !is_digits(month, 1..=2) || !day.is_none_or(|d| is_digits(d, 1..=2)) {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year: i32 = Self::parse_number(year)?;
        let month: u8 = Self::parse_number(month)?;
        let day: Option<u8> = day.map(Self::parse_number).transpose()?;
        Ok((year, month, day))
    }

    fn parse_number<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for DateValue {
    type Err = ParseError;

    /// Strict parse of `YYYY-M` or `YYYY-M-D`; the result is always valid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = Self::split_components(s)?;
        Self::from_calendar(year, month, day)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{:04}-{:02}-{:02}", self.year, self.month(), day),
            None => write!(f, "{:04}-{:02}", self.year, self.month()),
        }
    }
}

impl From<NaiveDate> for DateValue {
    #[allow(clippy::cast_possible_truncation)]
    fn from(date: NaiveDate) -> Self {
        Self::from_ymd(date.year(), date.month0() as u8, date.day() as u8)
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
