use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_START_WEEK_DAY, DateFinder, DatePredicate, DateValue, Direction, Navigator, ParseError, Validity,
    prelude::*,
};

/// Callback fired with the navigator and the position it just moved to.
pub type Notify = Box<dyn Fn(&Navigator, &DateValue)>;

/// Text formats a bound input field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "yyyy-mm-dd")]
    #[display(fmt = "yyyy-mm-dd")]
    IsoDash,
    #[serde(rename = "yyyy/mm/dd")]
    #[display(fmt = "yyyy/mm/dd")]
    IsoSlash,
    #[serde(rename = "yy-mm-dd")]
    #[display(fmt = "yy-mm-dd")]
    ShortIsoDash,
    #[serde(rename = "yy/mm/dd")]
    #[display(fmt = "yy/mm/dd")]
    ShortIsoSlash,
    #[serde(rename = "dd-mm-yyyy")]
    #[display(fmt = "dd-mm-yyyy")]
    DayFirstDash,
    #[serde(rename = "dd/mm/yyyy")]
    #[display(fmt = "dd/mm/yyyy")]
    DayFirstSlash,
    #[serde(rename = "dd-mm-yy")]
    #[display(fmt = "dd-mm-yy")]
    ShortDayFirstDash,
    #[serde(rename = "dd/mm/yy")]
    #[display(fmt = "dd/mm/yy")]
    ShortDayFirstSlash,
    #[serde(rename = "mm/dd/yyyy")]
    #[display(fmt = "mm/dd/yyyy")]
    MonthFirstSlash,
    #[serde(rename = "mm-dd-yyyy")]
    #[display(fmt = "mm-dd-yyyy")]
    MonthFirstDash,
}

impl DateFormat {
    /// `chrono` format string for this layout
    const fn pattern(self) -> &'static str {
        match self {
            Self::IsoDash => "%Y-%m-%d",
            Self::IsoSlash => "%Y/%m/%d",
            Self::ShortIsoDash => "%y-%m-%d",
            Self::ShortIsoSlash => "%y/%m/%d",
            Self::DayFirstDash => "%d-%m-%Y",
            Self::DayFirstSlash => "%d/%m/%Y",
            Self::ShortDayFirstDash => "%d-%m-%y",
            Self::ShortDayFirstSlash => "%d/%m/%y",
            Self::MonthFirstSlash => "%m/%d/%Y",
            Self::MonthFirstDash => "%m-%d-%Y",
        }
    }

    /// Reads a field value written in this format.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for a blank value and
    /// `ParseError::InvalidFormat` when the text does not match or names a
    /// date that does not exist.
    pub fn parse(self, value: &str) -> Result<DateValue, ParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        NaiveDate::parse_from_str(trimmed, self.pattern())
            .map(DateValue::from)
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))
    }

    /// Writes a date in this format.
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// Plain-data options of a navigator, loadable from a JSON or TOML option bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatorOptions {
    /// `min:max`, each side `NOW` or `YYYY[-MM[-DD]]`
    pub date_range:     Option<String>,
    /// Legacy `YYYY:YYYY` range, used only when `date_range` is unset
    pub year_range:     Option<String>,
    /// Initial `YYYY-MM-DD` date
    pub start_date:     Option<String>,
    /// First column of the month grid, Sunday = 0
    pub start_week_day: u8,
    /// Format of the bound field
    pub format:         DateFormat,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            date_range:     None,
            year_range:     None,
            start_date:     None,
            start_week_day: DEFAULT_START_WEEK_DAY,
            format:         DateFormat::default(),
        }
    }
}

impl NavigatorOptions {
    /// The range string in effect: `date_range`, else `year_range`.
    pub fn range_spec(&self) -> Option<&str> {
        non_empty(self.date_range.as_deref()).or_else(|| non_empty(self.year_range.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Everything a [`Navigator`] is built from: options plus caller hooks.
///
/// Immutable once handed to the navigator, which shares it behind an `Rc`.
#[derive(Default)]
pub struct NavigatorConfig {
    options:           NavigatorOptions,
    validity:          Validity,
    next_valid_date:   Option<Box<dyn DateFinder>>,
    prev_valid_date:   Option<Box<dyn DateFinder>>,
    on_set_date:       Option<Notify>,
    on_month_selected: Option<Notify>,
    on_year_selected:  Option<Notify>,
    today:             Option<DateValue>,
}

impl NavigatorConfig {
    pub fn new(options: NavigatorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date_range(mut self, spec: impl Into<String>) -> Self {
        self.options.date_range = Some(spec.into());
        self
    }

    #[must_use]
    pub fn with_year_range(mut self, spec: impl Into<String>) -> Self {
        self.options.year_range = Some(spec.into());
        self
    }

    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.options.start_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_start_week_day(mut self, week_day: u8) -> Self {
        self.options.start_week_day = week_day;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.options.format = format;
        self
    }

    #[must_use]
    pub fn with_validity(mut self, validity: Validity) -> Self {
        self.validity = validity;
        self
    }

    #[must_use]
    pub fn with_valid_day_fn(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.validity = self.validity.with_day(predicate);
        self
    }

    #[must_use]
    pub fn with_valid_month_fn(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.validity = self.validity.with_month(predicate);
        self
    }

    #[must_use]
    pub fn with_valid_year_fn(mut self, predicate: impl DatePredicate + 'static) -> Self {
        self.validity = self.validity.with_year(predicate);
        self
    }

    #[must_use]
    pub fn with_next_valid_date_fn(mut self, finder: impl DateFinder + 'static) -> Self {
        self.next_valid_date = Some(Box::new(finder));
        self
    }

    #[must_use]
    pub fn with_prev_valid_date_fn(mut self, finder: impl DateFinder + 'static) -> Self {
        self.prev_valid_date = Some(Box::new(finder));
        self
    }

    #[must_use]
    pub fn on_set_date(mut self, callback: impl Fn(&Navigator, &DateValue) + 'static) -> Self {
        self.on_set_date = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_month_selected(mut self, callback: impl Fn(&Navigator, &DateValue) + 'static) -> Self {
        self.on_month_selected = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_year_selected(mut self, callback: impl Fn(&Navigator, &DateValue) + 'static) -> Self {
        self.on_year_selected = Some(Box::new(callback));
        self
    }

    /// Pins the date used for `NOW` and for replacing invalid dates.
    #[must_use]
    pub fn with_today(mut self, today: DateValue) -> Self {
        self.today = Some(today);
        self
    }

    pub const fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub const fn validity(&self) -> &Validity {
        &self.validity
    }

    /// The pinned date if any, the local date otherwise.
    pub fn today(&self) -> DateValue {
        self.today.unwrap_or_else(DateValue::today)
    }

    pub(crate) fn finder(&self, direction: Direction) -> Option<&dyn DateFinder> {
        match direction {
            Direction::Next => self.next_valid_date.as_deref(),
            Direction::Prev => self.prev_valid_date.as_deref(),
        }
    }

    pub(crate) fn set_date_hook(&self) -> Option<&Notify> {
        self.on_set_date.as_ref()
    }

    pub(crate) fn month_selected_hook(&self) -> Option<&Notify> {
        self.on_month_selected.as_ref()
    }

    pub(crate) fn year_selected_hook(&self) -> Option<&Notify> {
        self.on_year_selected.as_ref()
    }
}

impl From<NavigatorOptions> for NavigatorConfig {
    fn from(options: NavigatorOptions) -> Self {
        Self::new(options)
    }
}

impl fmt::Debug for NavigatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorConfig")
            .field("options", &self.options)
            .field("validity", &self.validity)
            .field("next_valid_date", &self.next_valid_date.is_some())
            .field("prev_valid_date", &self.prev_valid_date.is_some())
            .field("on_set_date", &self.on_set_date.is_some())
            .field("on_month_selected", &self.on_month_selected.is_some())
            .field("on_year_selected", &self.on_year_selected.is_some())
            .field("today", &self.today)
            .finish()
    }
}
