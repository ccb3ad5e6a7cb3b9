//! Calendar-specific error types.

use campus_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("Invalid events endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<CalendarError> for AppError {
    fn from(e: CalendarError) -> Self {
        match e {
            CalendarError::Network(err) => AppError::Network(err.into_network_error()),
            CalendarError::Api { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            CalendarError::InvalidResponse(msg) => {
                AppError::Network(NetworkError::InvalidResponse(msg))
            }
            CalendarError::InvalidEndpoint(msg) => AppError::Config(ConfigError::Invalid(msg)),
            CalendarError::InvalidEventData(msg) => AppError::Calendar(msg),
        }
    }
}
