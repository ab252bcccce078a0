use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MONTHS_PER_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How deep a comparison or boundary check looks: year only, year and month,
/// or the full date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// The unit a navigator step moves the current position by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Unit {
    /// Precision used for the "already at the boundary" check of this unit.
    pub const fn precision(self) -> Precision {
        match self {
            Self::Month => Precision::Month,
            Self::Year => Precision::Year,
        }
    }
}

/// Which way a step goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    #[display(fmt = "prev")]
    Prev,
    #[display(fmt = "next")]
    Next,
}

impl Direction {
    pub(crate) const fn delta(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }

    /// How a position reached by stepping this way compares to where it started.
    pub(crate) const fn ordering(self) -> Ordering {
        match self {
            Self::Prev => Ordering::Less,
            Self::Next => Ordering::Greater,
        }
    }
}

/// Whether a day has been picked, as opposed to only browsing months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SelectionState {
    #[display(fmt = "no selection")]
    NoSelection,
    #[display(fmt = "day selected")]
    DaySelected,
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in a zero-based month. Returns 0 for a month index outside `0..12`.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    if month >= MONTHS_PER_YEAR {
        0
    } else if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2004,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        -400,
                is_leap:     true,
                description: "negative multiple of 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2000, FEBRUARY), 29);
        assert_eq!(days_in_month(1900, FEBRUARY), 28);
        assert_eq!(days_in_month(2004, FEBRUARY), 29);
        assert_eq!(days_in_month(2023, FEBRUARY), 28);
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in (0..MONTHS_PER_YEAR).zip(expected) {
            assert_eq!(days_in_month(2023, month), days, "month index {month}");
        }
    }

    #[test]
    fn test_days_in_month_out_of_range() {
        assert_eq!(days_in_month(2023, 12), 0);
        assert_eq!(days_in_month(2023, 255), 0);
    }

    #[test]
    fn test_unit_precision() {
        assert_eq!(Unit::Month.precision(), Precision::Month);
        assert_eq!(Unit::Year.precision(), Precision::Year);
    }

    #[test]
    fn test_display() {
        assert_eq!(Precision::Day.to_string(), "day");
        assert_eq!(Unit::Month.to_string(), "month");
        assert_eq!(Direction::Next.to_string(), "next");
        assert_eq!(SelectionState::NoSelection.to_string(), "no selection");
    }
}
