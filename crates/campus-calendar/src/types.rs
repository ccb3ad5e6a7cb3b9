//! Event types and the JSON shape served by the events API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// An approved event, as displayed by the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Start instant in UTC. Day bucketing uses its UTC calendar day.
    pub starts_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub cost: f64,
    pub external_url: Option<String>,
    pub approval_state: i64,
}

impl Event {
    /// UTC calendar day the event falls on.
    pub fn date(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }

    pub fn is_free(&self) -> bool {
        self.cost == 0.0
    }
}

// API Response Types

/// Event record as served by the events API.
///
/// Every field except `id` is optional at this layer so one sloppy record
/// can be rejected on its own during conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    pub id: ApiScalar,
    pub fecha: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub costo: Option<ApiScalar>,
    pub evento_url: Option<String>,
    pub status_id: Option<i64>,
}

/// JSON value that the API sends either as a number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ApiScalar {
    fn as_key(&self) -> String {
        match self {
            ApiScalar::Int(n) => n.to_string(),
            ApiScalar::Float(n) => n.to_string(),
            ApiScalar::Text(s) => s.trim().to_string(),
        }
    }

    fn as_amount(&self) -> Option<f64> {
        let amount = match self {
            ApiScalar::Int(n) => *n as f64,
            ApiScalar::Float(n) => *n,
            ApiScalar::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        amount.is_finite().then_some(amount)
    }
}

impl TryFrom<ApiEvent> for Event {
    type Error = CalendarError;

    fn try_from(api: ApiEvent) -> Result<Self, Self::Error> {
        let id = api.id.as_key();

        let fecha = api.fecha.unwrap_or_default();
        let starts_at = parse_event_instant(&fecha).ok_or_else(|| {
            CalendarError::InvalidEventData(format!("event {}: unparseable fecha {:?}", id, fecha))
        })?;

        // A missing cost is shown as free; a present but unreadable one is rejected.
        let cost = match &api.costo {
            None => 0.0,
            Some(raw) => raw.as_amount().ok_or_else(|| {
                CalendarError::InvalidEventData(format!(
                    "event {}: unparseable costo {:?}",
                    id, raw
                ))
            })?,
        };

        let external_url = api
            .evento_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Ok(Self {
            id,
            starts_at,
            title: api.titulo.unwrap_or_default(),
            description: api.descripcion.unwrap_or_default(),
            cost,
            external_url,
            approval_state: api.status_id.unwrap_or_default(),
        })
    }
}

/// Convert a fetched snapshot, dropping records that fail to parse.
pub fn events_from_api(records: Vec<serde_json::Value>) -> Vec<Event> {
    let total = records.len();
    let events: Vec<Event> = records
        .into_iter()
        .filter_map(|value| {
            let api: ApiEvent = match serde_json::from_value(value) {
                Ok(api) => api,
                Err(e) => {
                    tracing::warn!("Skipping malformed event record: {}", e);
                    return None;
                }
            };
            match Event::try_from(api) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Skipping event: {}", e);
                    None
                }
            }
        })
        .collect();

    if events.len() < total {
        tracing::info!("Loaded {} of {} event records", events.len(), total);
    }
    events
}

/// Parse the API's `fecha` field into a UTC instant.
///
/// Offsets are honoured; values without an offset are read as UTC, and a
/// bare date is UTC midnight.
pub fn parse_event_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn api(json: serde_json::Value) -> ApiEvent {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_event_from_api() {
        let event = Event::try_from(api(serde_json::json!({
            "id": 7,
            "fecha": "2025-03-05T15:30:00.000Z",
            "titulo": "Taller de Rust",
            "descripcion": "Introducción a ownership",
            "costo": "12.50",
            "evento_url": "eventos.example.org/rust",
            "status_id": 2
        })))
        .unwrap();

        assert_eq!(event.id, "7");
        assert_eq!(event.title, "Taller de Rust");
        assert_eq!(event.cost, 12.5);
        assert!(!event.is_free());
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(
            event.external_url.as_deref(),
            Some("eventos.example.org/rust")
        );
        assert_eq!(event.approval_state, 2);
    }

    #[test]
    fn test_free_and_missing_cost() {
        let zero = Event::try_from(api(serde_json::json!({
            "id": 1, "fecha": "2025-03-05", "costo": "0.00"
        })))
        .unwrap();
        assert!(zero.is_free());

        let missing = Event::try_from(api(serde_json::json!({
            "id": 2, "fecha": "2025-03-05", "costo": null
        })))
        .unwrap();
        assert!(missing.is_free());

        let numeric = Event::try_from(api(serde_json::json!({
            "id": 3, "fecha": "2025-03-05", "costo": 3
        })))
        .unwrap();
        assert_eq!(numeric.cost, 3.0);
    }

    #[test]
    fn test_rejects_bad_date_and_cost() {
        let bad_date = Event::try_from(api(serde_json::json!({
            "id": 1, "fecha": "mañana"
        })));
        assert!(matches!(bad_date, Err(CalendarError::InvalidEventData(_))));

        let no_date = Event::try_from(api(serde_json::json!({ "id": 1 })));
        assert!(no_date.is_err());

        let bad_cost = Event::try_from(api(serde_json::json!({
            "id": 1, "fecha": "2025-03-05", "costo": "gratis"
        })));
        assert!(matches!(bad_cost, Err(CalendarError::InvalidEventData(_))));
    }

    #[test]
    fn test_blank_url_is_absent() {
        let event = Event::try_from(api(serde_json::json!({
            "id": "abc", "fecha": "2025-03-05", "evento_url": "  "
        })))
        .unwrap();
        assert_eq!(event.id, "abc");
        assert!(event.external_url.is_none());
    }

    #[test]
    fn test_parse_event_instant_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_event_instant("2025-03-05T10:00:00Z"), Some(expected));
        assert_eq!(parse_event_instant("2025-03-05T05:00:00-05:00"), Some(expected));
        assert_eq!(parse_event_instant("2025-03-05T10:00:00"), Some(expected));
        assert_eq!(parse_event_instant("2025-03-05 10:00:00"), Some(expected));
        assert_eq!(parse_event_instant("2025-03-05T10:00"), Some(expected));
        assert_eq!(
            parse_event_instant(" 2025-03-05 "),
            Some(Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_event_instant(""), None);
        assert_eq!(parse_event_instant("2025-02-30"), None);
    }

    #[test]
    fn test_offset_moves_utc_day() {
        // 22:00 in UTC-05:00 is already the next UTC day.
        let instant = parse_event_instant("2025-03-05T22:00:00-05:00").unwrap();
        assert_eq!(instant.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 6).unwrap());
    }

    #[test]
    fn test_events_from_api_skips_bad_records() {
        let records = vec![
            serde_json::json!({ "id": 1, "fecha": "2025-03-05", "titulo": "A" }),
            serde_json::json!({ "id": 2, "fecha": "not a date", "titulo": "B" }),
            serde_json::json!({ "titulo": "no id" }),
            serde_json::json!("not an object"),
            serde_json::json!({ "id": 3, "fecha": "2025-03-06", "titulo": "C" }),
        ];

        let events = events_from_api(records);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
