use std::fmt;

use crate::{DateRange, DateValue, Precision};

/// Decides whether a day, month or year may be picked.
///
/// Any `Fn(year, month, day) -> bool` closure is a predicate. The closure
/// receives a one-based month (January is 1), and no day when a month or a
/// year is being asked about.
pub trait DatePredicate {
    fn accepts(&self, date: &DateValue) -> bool;
}

impl<F> DatePredicate for F
where
    F: Fn(i32, u8, Option<u8>) -> bool,
{
    fn accepts(&self, date: &DateValue) -> bool {
        self(date.year(), date.month(), date.day())
    }
}

/// Finds the next (or previous) date worth showing, given the current one.
///
/// Used for calendars with sparse valid dates, so that a single step can jump
/// over months or years with nothing selectable. `None` means there is no such
/// date. Closures get the same one-based `(year, month, day)` arguments as
/// [`DatePredicate`].
pub trait DateFinder {
    fn find(&self, from: &DateValue) -> Option<DateValue>;
}

impl<F> DateFinder for F
where
    F: Fn(i32, u8, Option<u8>) -> Option<DateValue>,
{
    fn find(&self, from: &DateValue) -> Option<DateValue> {
        self(from.year(), from.month(), from.day())
    }
}

/// Per-granularity acceptability checks.
///
/// A granularity without a caller predicate accepts whatever lies inside the
/// configured [`DateRange`] at that granularity.
#[derive(Default)]
pub struct Validity {
    day:   Option<Box<dyn DatePredicate>>,
    month: Option<Box<dyn DatePredicate>>,
    year:  Option<Box<dyn DatePredicate>>,
}

impl Validity {
    #[must_use]
    pub fn with_day(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.day = Some(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn with_month(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.month = Some(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn with_year(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.year = Some(Box::new(predicate));
        self
    }

    pub fn acceptable_day(&self, date: &DateValue, range: &DateRange) -> bool {
        self.acceptable(Precision::Day, date, range)
    }

    pub fn acceptable_month(&self, date: &DateValue, range: &DateRange) -> bool {
        self.acceptable(Precision::Month, date, range)
    }

    pub fn acceptable_year(&self, date: &DateValue, range: &DateRange) -> bool {
        self.acceptable(Precision::Year, date, range)
    }

    pub fn acceptable(&self, precision: Precision, date: &DateValue, range: &DateRange) -> bool {
        let predicate = match precision {
            Precision::Day => &self.day,
            Precision::Month => &self.month,
            Precision::Year => &self.year,
        };
        match predicate {
            Some(predicate) => predicate.accepts(date),
            None => range.contains_at(date, precision),
        }
    }
}

impl fmt::Debug for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validity")
            .field("day", &self.day.is_some())
            .field("month", &self.month.is_some())
            .field("year", &self.year.is_some())
            .finish()
    }
}
