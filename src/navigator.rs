use std::{cmp::Ordering, rc::Rc};

use chrono::NaiveDate;

use crate::{
    DECADE, DateRange, DateValue, Direction, MONTHS_PER_YEAR, NavigatorConfig, Notify, ParseError, Precision,
    SelectionState, Unit, days_in_month,
};

/// Error type for navigator queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigatorError {
    /// Only a month is on screen; no day has been picked.
    #[error("No date selected yet: still picking a date")]
    NoDateSelected,

    /// The position does not exist on the proleptic Gregorian calendar.
    #[error("Position {0} is not a calendar date")]
    OutOfCalendar(DateValue),
}

/// The date picker's navigation state.
///
/// Holds the current position (year, month and, once picked, a day) inside a
/// [`DateRange`], and moves it month by month, year by year or a decade at a
/// time. Configuration is shared and never mutated; the position only changes
/// through the methods here, and a refused move leaves it untouched.
#[derive(Debug)]
pub struct Navigator {
    config:   Rc<NavigatorConfig>,
    range:    DateRange,
    position: DateValue,
}

impl Navigator {
    /// Builds a navigator positioned on the configured start date, or on
    /// today when there is none.
    pub fn new(config: impl Into<Rc<NavigatorConfig>>) -> Self {
        let mut navigator = Self::unpositioned(config.into());
        let start_date = navigator.config.options().start_date.clone();
        match start_date {
            Some(start_date) => navigator.set_date(&start_date),
            None => navigator.commit(),
        }
        navigator
    }

    /// Builds a navigator for a bound field. A start date still wins; otherwise
    /// the field value is read with the configured format.
    pub fn with_field_value(config: impl Into<Rc<NavigatorConfig>>, value: &str) -> Self {
        let config = config.into();
        if config.options().start_date.is_some() || value.trim().is_empty() {
            return Self::new(config);
        }
        let mut navigator = Self::unpositioned(config);
        // An unreadable field leaves today in place, which is what we want.
        let _ = navigator.update_from_field(value);
        navigator
    }

    /// Builds a navigator browsing a month with no day picked.
    pub fn browsing(config: impl Into<Rc<NavigatorConfig>>, year: i32, month: u8) -> Self {
        let mut navigator = Self::unpositioned(config.into());
        navigator.position = DateValue::from_ym(year, month);
        navigator.normalize();
        navigator
    }

    fn unpositioned(config: Rc<NavigatorConfig>) -> Self {
        let today = config.today();
        let range = DateRange::normalize(config.options().range_spec(), today);
        Self {
            config,
            range,
            position: today,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// The current position, what the month view shows.
    pub const fn position(&self) -> DateValue {
        self.position
    }

    pub const fn state(&self) -> SelectionState {
        match self.position.day() {
            Some(_) => SelectionState::DaySelected,
            None => SelectionState::NoSelection,
        }
    }

    /// The picked date, if a day has been picked.
    pub const fn selected(&self) -> Option<DateValue> {
        match self.position.day() {
            Some(_) => Some(self.position),
            None => None,
        }
    }

    /// The picked date as a `chrono` date.
    ///
    /// # Errors
    /// Returns `NavigatorError::NoDateSelected` while only a month is being
    /// browsed.
    pub fn get_date(&self) -> Result<NaiveDate, NavigatorError> {
        if self.position.day().is_none() {
            return Err(NavigatorError::NoDateSelected);
        }
        self.position
            .to_naive()
            .ok_or(NavigatorError::OutOfCalendar(self.position))
    }

    /// Sets the date from a `YYYY-M-D` string.
    ///
    /// A string of another shape leaves the position as it is. Either way the
    /// position is then fitted into the range and committed, so this also
    /// repairs an invalid position.
    pub fn set_date(&mut self, date: &str) {
        match DateValue::parse_loose(date) {
            Some(parsed) => self.position = parsed,
            None => tracing::debug!(date, "ignoring date that is not YYYY-M-D"),
        }
        self.commit();
    }

    /// Forgets the picked day, keeping the month on screen.
    pub fn clear(&mut self) {
        self.position = self.position.with_day(None);
    }

    /// Reads a bound field value in the configured format and commits it.
    ///
    /// # Errors
    /// Returns the `ParseError` if the value cannot be read; the current
    /// position is still normalized and committed.
    pub fn update_from_field(&mut self, value: &str) -> Result<DateValue, ParseError> {
        let parsed = self.config.options().format.parse(value);
        match &parsed {
            Ok(date) => self.position = *date,
            Err(err) => tracing::debug!(value, %err, "field value not understood"),
        }
        self.commit();
        parsed.map(|_| self.position)
    }

    /// The picked date written in the configured field format.
    ///
    /// # Errors
    /// Same as [`Navigator::get_date`].
    pub fn field_value(&self) -> Result<String, NavigatorError> {
        Ok(self.config.options().format.format(self.get_date()?))
    }

    /// Same as [`Navigator::update_from_field`] for a picker bound to separate
    /// year, month (one-based) and day fields.
    ///
    /// # Errors
    /// Returns the `ParseError` for a component out of range; the current
    /// position is still normalized and committed.
    pub fn update_from_fields(&mut self, year: i32, month: u8, day: u8) -> Result<DateValue, ParseError> {
        let parsed = DateValue::from_calendar(year, month, Some(day));
        match &parsed {
            Ok(date) => self.position = *date,
            Err(err) => tracing::debug!(year, month, day, %err, "field values not understood"),
        }
        self.commit();
        parsed.map(|_| self.position)
    }

    /// The picked date as `(year, month, day)` for separate fields, month
    /// one-based.
    ///
    /// # Errors
    /// Same as [`Navigator::get_date`].
    pub fn field_parts(&self) -> Result<(i32, u8, u8), NavigatorError> {
        let date = DateValue::from(self.get_date()?);
        match date.day() {
            Some(day) => Ok((date.year(), date.month(), day)),
            None => Err(NavigatorError::NoDateSelected),
        }
    }

    /// Where a step would land, without moving.
    ///
    /// The step is refused when the position already shares the boundary's
    /// year (year steps) or year and month (month steps). Otherwise the caller's
    /// next/previous-valid-date finder picks the candidate if one is
    /// configured, plain one-unit arithmetic if not. The candidate is fitted
    /// into the range, must still lie in the step's direction, and must pass
    /// the unit's acceptability check.
    pub fn leap(&self, unit: Unit, direction: Direction) -> Option<DateValue> {
        let from = self.position;
        let boundary = match direction {
            Direction::Next => self.range.max(),
            Direction::Prev => self.range.min(),
        };

        if from.compare(&boundary, unit.precision()) == Ordering::Equal {
            tracing::debug!(%unit, %direction, position = %from, "step refused: at the range boundary");
            return None;
        }

        let candidate = match self.config.finder(direction) {
            Some(finder) => finder.find(&from),
            None => Self::advance(from, unit, direction),
        };
        let Some(candidate) = candidate else {
            tracing::debug!(%unit, %direction, position = %from, "step refused: no candidate date");
            return None;
        };

        let landed = self.fit(candidate, from);
        if landed.compare(&from, unit.precision()) != direction.ordering() {
            tracing::debug!(%unit, %direction, candidate = %landed, "step refused: candidate does not move that way");
            return None;
        }
        if !self
            .config
            .validity()
            .acceptable(unit.precision(), &landed, &self.range)
        {
            tracing::debug!(%unit, %direction, candidate = %landed, "step refused: candidate not acceptable");
            return None;
        }
        Some(landed)
    }

    /// Moves one unit in a direction, returning the new position, or `None`
    /// (position untouched) when [`Navigator::leap`] refuses.
    pub fn step(&mut self, unit: Unit, direction: Direction) -> Option<DateValue> {
        let landed = self.leap(unit, direction)?;
        self.position = landed;
        tracing::trace!(%unit, %direction, position = %landed, "stepped");
        match unit {
            Unit::Month => self.notify(self.config.month_selected_hook()),
            Unit::Year => self.notify(self.config.year_selected_hook()),
        }
        Some(landed)
    }

    pub fn next_month(&mut self) -> Option<DateValue> {
        self.step(Unit::Month, Direction::Next)
    }

    pub fn prev_month(&mut self) -> Option<DateValue> {
        self.step(Unit::Month, Direction::Prev)
    }

    pub fn next_year(&mut self) -> Option<DateValue> {
        self.step(Unit::Year, Direction::Next)
    }

    pub fn prev_year(&mut self) -> Option<DateValue> {
        self.step(Unit::Year, Direction::Prev)
    }

    /// First year of the neighbouring decade, or `None` if that decade lies
    /// entirely outside the range's years. Finders are not consulted.
    pub fn leap_decade(&self, direction: Direction) -> Option<i32> {
        let target = self
            .position
            .decade()
            .checked_add(direction.delta() * DECADE)?;
        let last = target.checked_add(DECADE - 1)?;
        if target > self.range.max().year() || last < self.range.min().year() {
            tracing::debug!(%direction, decade = target, "decade step refused: outside the range");
            return None;
        }
        Some(target)
    }

    /// Moves the position ten years and fits it into the range. Returns the
    /// first year of the decade now on screen.
    pub fn step_decade(&mut self, direction: Direction) -> Option<i32> {
        let target = self.leap_decade(direction)?;
        let moved = self
            .position
            .add_years(direction.delta() * DECADE)?;
        let landed = self.fit(moved, self.position);
        if landed.compare(&self.position, Precision::Year) != direction.ordering() {
            tracing::debug!(%direction, candidate = %landed, "decade step refused: candidate does not move that way");
            return None;
        }
        self.position = landed;
        Some(target)
    }

    pub fn next_decade(&mut self) -> Option<i32> {
        self.step_decade(Direction::Next)
    }

    pub fn prev_decade(&mut self) -> Option<i32> {
        self.step_decade(Direction::Prev)
    }

    /// Picks a day of the month on screen and commits it.
    /// Refused when the day does not exist or is not acceptable.
    pub fn select_day(&mut self, day: u8) -> Option<DateValue> {
        let candidate = self.position.with_day(Some(day));
        if !candidate.is_valid() || !self.config.validity().acceptable_day(&candidate, &self.range) {
            tracing::debug!(candidate = %candidate, "day selection refused");
            return None;
        }
        self.position = candidate;
        self.commit();
        Some(self.position)
    }

    /// Shows another month of the same year (zero-based month).
    /// Refused when the month is not acceptable.
    pub fn select_month(&mut self, month: u8) -> Option<DateValue> {
        if month >= MONTHS_PER_YEAR {
            return None;
        }
        let probe = DateValue::from_ym(self.position.year(), month);
        if !self.config.validity().acceptable_month(&probe, &self.range) {
            tracing::debug!(month = %probe, "month selection refused");
            return None;
        }
        self.position = self.fit(self.moved_to(probe), self.position);
        self.notify(self.config.month_selected_hook());
        Some(self.position)
    }

    /// Shows the same month of another year.
    /// Refused when the year is not acceptable.
    pub fn select_year(&mut self, year: i32) -> Option<DateValue> {
        let probe = self.year_probe(year);
        if !self.config.validity().acceptable_year(&probe, &self.range) {
            tracing::debug!(year, "year selection refused");
            return None;
        }
        self.position = self.fit(self.moved_to(probe), self.position);
        self.notify(self.config.year_selected_hook());
        Some(self.position)
    }

    /// The dayless value the year predicate is asked about for `year`.
    pub(crate) const fn year_probe(&self, year: i32) -> DateValue {
        DateValue::from_ym(year, self.position.month0())
    }

    fn advance(from: DateValue, unit: Unit, direction: Direction) -> Option<DateValue> {
        match unit {
            Unit::Month => from.add_months(direction.delta()),
            Unit::Year => from.add_years(direction.delta()),
        }
    }

    /// The current position moved to the probe's year and month, keeping the
    /// picked day where it still exists.
    fn moved_to(&self, probe: DateValue) -> DateValue {
        let last_day = days_in_month(probe.year(), probe.month0());
        probe.with_day(self.position.day().map(|day| day.min(last_day)))
    }

    /// Fits `candidate` into the range without changing the selection state
    /// relative to `from`: a dayless position stays dayless, and a candidate
    /// missing a day inherits the one from `from`.
    fn fit(&self, candidate: DateValue, from: DateValue) -> DateValue {
        let candidate = match (from.day(), candidate.day()) {
            (Some(day), None) => {
                candidate.with_day(Some(day.min(days_in_month(candidate.year(), candidate.month0()))))
            },
            _ => candidate,
        };
        let landed = self.range.clamp(candidate, self.config.today());
        match from.day() {
            Some(_) => landed,
            None => landed.with_day(None),
        }
    }

    /// Fits the position into the range.
    fn normalize(&mut self) {
        self.position = self.fit(self.position, self.position);
    }

    /// Normalizes the position and reports it as the chosen date.
    fn commit(&mut self) {
        self.normalize();
        if self.position.day().is_some() {
            tracing::trace!(date = %self.position, "date committed");
            self.notify(self.config.set_date_hook());
        }
    }

    fn notify(&self, hook: Option<&Notify>) {
        if let Some(hook) = hook {
            hook(self, &self.position);
        }
    }
}
