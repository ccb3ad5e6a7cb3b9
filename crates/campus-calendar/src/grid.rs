//! Month grid construction: events bucketed by calendar day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::cursor::CalendarCursor;
use crate::format::overflow_label;
use crate::types::Event;

/// Titles shown directly inside a day cell before the overflow marker.
pub const MAX_VISIBLE_EVENTS: usize = 2;

/// Entries in the upcoming-events panel when nothing is configured.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Events whose UTC calendar day is `date`, in input order.
pub fn events_on_date(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| e.date() == date).collect()
}

/// Events starting at or after `now`, earliest first, at most `limit` of them.
///
/// Compares full instants: an event earlier today is no longer upcoming.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.starts_at >= now).collect();
    upcoming.sort_by_key(|e| e.starts_at);
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
    pub is_today: bool,
}

impl<'a> DayCell<'a> {
    pub fn day(&self) -> u32 {
        chrono::Datelike::day(&self.date)
    }

    /// Events whose titles fit in the cell.
    pub fn visible_events(&self) -> &[&'a Event] {
        &self.events[..self.events.len().min(MAX_VISIBLE_EVENTS)]
    }

    pub fn hidden_count(&self) -> usize {
        self.events.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }

    /// `+K más` when some events do not fit.
    pub fn overflow_label(&self) -> Option<String> {
        match self.hidden_count() {
            0 => None,
            hidden => Some(overflow_label(hidden)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell<'a> {
    /// Padding before day 1 or after the last day.
    Blank,
    Day(DayCell<'a>),
}

impl<'a> GridCell<'a> {
    pub fn as_day(&self) -> Option<&DayCell<'a>> {
        match self {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        }
    }
}

/// A month laid out Sunday-first in whole weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    cursor: CalendarCursor,
    cells: Vec<GridCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Lay out `cursor`'s month and attach each day's events.
    ///
    /// `today` only marks a cell; it does not need to fall inside the month.
    pub fn build(events: &'a [Event], cursor: CalendarCursor, today: NaiveDate) -> Self {
        let mut by_day: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events.iter().filter(|e| cursor.contains(e.date())) {
            by_day.entry(event.date()).or_default().push(event);
        }

        let leading = cursor.first_weekday_offset() as usize;
        let days = cursor.days_in_month() as usize;
        let total = (leading + days).div_ceil(7) * 7;

        let mut cells = Vec::with_capacity(total);
        cells.extend(std::iter::repeat_with(|| GridCell::Blank).take(leading));
        cells.extend((1..=cursor.days_in_month()).filter_map(|day| {
            let date = cursor.date(day)?;
            Some(GridCell::Day(DayCell {
                date,
                events: by_day.remove(&date).unwrap_or_default(),
                is_today: date == today,
            }))
        }));
        cells.resize_with(total, || GridCell::Blank);

        tracing::debug!(
            "Built grid for {} with {} cells ({} leading blanks)",
            cursor,
            cells.len(),
            leading
        );

        Self { cursor, cells }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn week_count(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    /// Cell for day-of-month `day`.
    pub fn day(&self, day: u32) -> Option<&DayCell<'a>> {
        self.days().find(|cell| cell.day() == day)
    }
}

/// Build the grid for `cursor` from the loaded events.
pub fn render_grid<'a>(
    events: &'a [Event],
    cursor: CalendarCursor,
    today: NaiveDate,
) -> MonthGrid<'a> {
    MonthGrid::build(events, cursor, today)
}
