use chrono::{Datelike, NaiveDate};

use crate::{DAYS_PER_WEEK, DECADE, DateValue, Direction, MIN_DAY, MONTHS_PER_YEAR, Navigator, days_in_month};

/// One day of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day:        u8,
    pub selectable: bool,
    pub selected:   bool,
}

/// The month on screen, split into weeks starting on the configured week day.
/// Slots before the 1st and after the last day are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year:    i32,
    /// Zero-based
    pub month:   u8,
    /// Week days of the columns, Sunday = 0
    pub columns: [u8; DAYS_PER_WEEK],
    pub weeks:   Vec<[Option<DayCell>; DAYS_PER_WEEK]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    /// Zero-based
    pub month:      u8,
    pub current:    bool,
    pub selectable: bool,
}

/// The twelve months of the current year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSelector {
    pub year:  i32,
    pub cells: [MonthCell; MONTHS_PER_YEAR as usize],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCell {
    pub year:       i32,
    pub current:    bool,
    pub selectable: bool,
}

/// The years of the current decade, plus whether the neighbouring decades
/// can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSelector {
    pub decade:   i32,
    pub years:    Vec<YearCell>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl MonthView {
    /// Cell for a day of the month, if it exists.
    pub fn cell(&self, day: u8) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .find(|cell| cell.day == day)
    }
}

impl Navigator {
    /// Lays out the month of the current position.
    #[allow(clippy::cast_possible_truncation)]
    pub fn month_view(&self) -> MonthView {
        let position = self.position();
        let (year, month) = (position.year(), position.month0());
        let start = usize::from(self.config().options().start_week_day) % DAYS_PER_WEEK;

        let columns = std::array::from_fn(|i| ((start + i) % DAYS_PER_WEEK) as u8);
        let first = NaiveDate::from_ymd_opt(year, u32::from(month) + 1, 1)
            .map_or(0, |first| first.weekday().num_days_from_sunday() as usize);
        let offset = (first + DAYS_PER_WEEK - start) % DAYS_PER_WEEK;

        let validity = self.config().validity();
        let mut weeks = Vec::new();
        let mut week = [None; DAYS_PER_WEEK];
        let mut slot = offset;
        for day in MIN_DAY..=days_in_month(year, month) {
            let date = DateValue::from_ymd(year, month, day);
            week[slot] = Some(DayCell {
                day,
                selectable: validity.acceptable_day(&date, self.range()),
                selected: position.day() == Some(day),
            });
            slot += 1;
            if slot == DAYS_PER_WEEK {
                weeks.push(week);
                week = [None; DAYS_PER_WEEK];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        MonthView {
            year,
            month,
            columns,
            weeks,
        }
    }

    /// Lays out the months of the current year.
    #[allow(clippy::cast_possible_truncation)]
    pub fn month_selector(&self) -> MonthSelector {
        let position = self.position();
        let validity = self.config().validity();
        let cells = std::array::from_fn(|i| {
            let month = i as u8;
            MonthCell {
                month,
                current: month == position.month0(),
                selectable: validity.acceptable_month(&DateValue::from_ym(position.year(), month), self.range()),
            }
        });
        MonthSelector {
            year: position.year(),
            cells,
        }
    }

    /// Lays out the years of the current decade.
    pub fn year_selector(&self) -> YearSelector {
        let position = self.position();
        let decade = position.decade();
        let validity = self.config().validity();
        let years = (decade..decade.saturating_add(DECADE))
            .map(|year| YearCell {
                year,
                current: year == position.year(),
                selectable: validity.acceptable_year(&self.year_probe(year), self.range()),
            })
            .collect();

        YearSelector {
            decade,
            years,
            has_prev: self.leap_decade(Direction::Prev).is_some(),
            has_next: self.leap_decade(Direction::Next).is_some(),
        }
    }
}
