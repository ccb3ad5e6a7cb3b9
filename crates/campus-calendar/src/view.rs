//! Calendar view state: the loaded snapshot, the displayed month and the selection.

use campus_core::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use crate::client::EventSource;
use crate::cursor::{CalendarCursor, Direction};
use crate::error::CalendarError;
use crate::format::{format_cost, format_date_es, normalize_external_url};
use crate::grid::{upcoming_events, MonthGrid, DEFAULT_UPCOMING_LIMIT};
use crate::types::Event;

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<Event>),
    /// Holds the message shown to the user next to the retry action.
    Failed(String),
}

impl LoadState {
    /// Loaded events; empty while loading or after a failure.
    pub fn events(&self) -> &[Event] {
        match self {
            LoadState::Loaded(events) => events,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Retry is offered for failures only, never for an empty snapshot.
    pub fn can_retry(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// Everything the detail panel shows for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_label: String,
    pub cost_label: String,
    pub link: Option<Url>,
}

impl From<&Event> for EventDetail {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date_label: format_date_es(event.date()),
            cost_label: format_cost(event.cost),
            link: event
                .external_url
                .as_deref()
                .and_then(normalize_external_url),
        }
    }
}

/// Right-hand panel: the selected event, or the next few events.
#[derive(Debug, Clone, PartialEq)]
pub enum SidePanel<'a> {
    Detail(EventDetail),
    Upcoming(Vec<&'a Event>),
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    cursor: CalendarCursor,
    selection: Option<Event>,
    state: LoadState,
    upcoming_limit: usize,
}

impl CalendarView {
    /// Fresh view on `cursor`, waiting for its first load.
    pub fn new(cursor: CalendarCursor) -> Self {
        Self {
            cursor,
            selection: None,
            state: LoadState::Loading,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }

    #[must_use]
    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Event> {
        self.selection.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        self.state.events()
    }

    /// Number of loaded events.
    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn begin_load(&mut self) {
        tracing::debug!("Loading events");
        self.state = LoadState::Loading;
    }

    /// Replace the event set with a fetch result. Cursor and selection are kept.
    pub fn finish_load(&mut self, result: Result<Vec<Event>, CalendarError>) {
        self.state = match result {
            Ok(events) => {
                tracing::info!("Loaded {} events", events.len());
                LoadState::Loaded(events)
            }
            Err(e) => {
                tracing::error!("Error fetching events: {}", e);
                LoadState::Failed(AppError::from(e).user_message().to_string())
            }
        };
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.cursor = self.cursor.navigate(direction);
    }

    /// Show `event` in the detail panel, or clear it with `None`.
    pub fn select_event(&mut self, event: Option<Event>) {
        self.selection = event;
    }

    /// Select the loaded event with `id`. Returns false and leaves the
    /// selection alone when no such event is loaded.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.events().iter().find(|e| e.id == id).cloned() {
            Some(event) => {
                self.selection = Some(event);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid<'_> {
        MonthGrid::build(self.events(), self.cursor, today)
    }

    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&Event> {
        upcoming_events(self.events(), now, self.upcoming_limit)
    }

    pub fn side_panel(&self, now: DateTime<Utc>) -> SidePanel<'_> {
        match &self.selection {
            Some(event) => SidePanel::Detail(EventDetail::from(event)),
            None => SidePanel::Upcoming(self.upcoming(now)),
        }
    }
}

/// Fetch a fresh snapshot from `source` into `view`.
pub async fn refresh<S: EventSource>(view: &mut CalendarView, source: &S) {
    view.begin_load();
    let result = source.fetch_events().await;
    view.finish_load(result);
}
