//! Event calendar for the campus site.
//!
//! Fetches approved events, buckets them into a month grid and tracks the
//! displayed month and the selected event.

pub mod client;
pub mod cursor;
pub mod error;
pub mod format;
pub mod grid;
pub mod render;
pub mod types;
pub mod view;

pub use client::{EventSource, EventsClient};
pub use cursor::{CalendarCursor, Direction};
pub use error::CalendarError;
pub use format::{format_cost, format_date_es, normalize_external_url};
pub use grid::{events_on_date, render_grid, upcoming_events, DayCell, GridCell, MonthGrid};
pub use types::{parse_event_instant, Event};
pub use view::{refresh, CalendarView, EventDetail, LoadState, SidePanel};
