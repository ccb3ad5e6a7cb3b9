//! HTTP client for the approved-events endpoint.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use campus_core::{ApiConfig, Config};
use tracing::instrument;
use url::Url;

use crate::error::CalendarError;
use crate::types::{events_from_api, Event};

/// Anything that can hand the calendar a complete snapshot of approved events.
pub trait EventSource {
    fn fetch_events(&self) -> impl Future<Output = Result<Vec<Event>, CalendarError>> + Send;
}

#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Arc<reqwest::Client>,
    endpoint: Url,
    approved_status: String,
}

impl EventsClient {
    pub fn new(api: &ApiConfig) -> Result<Self, CalendarError> {
        let endpoint = format!(
            "{}{}",
            api.base_url.trim_end_matches('/'),
            api.events_path
        );
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| CalendarError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
            approved_status: api.approved_status.clone(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CalendarError> {
        Self::new(&config.api)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the approved events, skipping records that fail to parse.
    ///
    /// One request per call; a failure is returned to the caller as is.
    #[instrument(skip(self), fields(endpoint = %self.endpoint), level = "info")]
    pub async fn fetch_approved(&self) -> Result<Vec<Event>, CalendarError> {
        let records = self.fetch_records().await?;
        let events = events_from_api(records);
        tracing::info!("Fetched {} approved events", events.len());
        Ok(events)
    }

    async fn fetch_records(&self) -> Result<Vec<serde_json::Value>, CalendarError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("status", self.approved_status.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CalendarError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        match body {
            serde_json::Value::Array(records) => Ok(records),
            other => Err(CalendarError::InvalidResponse(format!(
                "expected a JSON array of events, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl EventSource for EventsClient {
    fn fetch_events(&self) -> impl Future<Output = Result<Vec<Event>, CalendarError>> + Send {
        self.fetch_approved()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
