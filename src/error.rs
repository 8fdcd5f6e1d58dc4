//! Error handling for the Volunteer Hub client

use std::fmt;
use serde_json::Value;
use thiserror::Error;

use crate::models::{FieldErrors, Id};
use crate::resilience::{Cancelled, FailedResponse, RequestFailure};

/// Unified error type for the Volunteer Hub client
#[derive(Error, Debug)]
pub enum Error {
    /// Transport errors: connection refused, DNS, timeouts, TLS
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Response body, when it parsed as JSON
        body: Option<Value>,
    },

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT decoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Local form validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A mutation for this entity is already in flight.
    ///
    /// Unreachable through `PageData::mutate`, which holds `&mut self`
    /// across the write; kept for callers sharing a page behind a lock.
    #[error("An update for record {0} is already in progress")]
    Busy(Id),

    /// A write was attempted before the page had any data
    #[error("Nothing is loaded yet")]
    NotLoaded,

    /// The owning page went away before the operation finished
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Error::Cancelled
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors)
    }
}

impl RequestFailure for Error {
    fn response(&self) -> Option<FailedResponse<'_>> {
        match self {
            Error::Api { status, body, .. } => Some(FailedResponse {
                status: *status,
                data: body.as_ref(),
            }),
            Error::Http(e) => e.status().map(|status| FailedResponse {
                status: status.as_u16(),
                data: None,
            }),
            _ => None,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Error::Api { message, .. } if !message.is_empty() => Some(message.clone()),
            Error::Http(e) if e.is_connect() || e.is_timeout() => {
                Some(format!("Network Error: {}", e))
            }
            Error::Validation(errors) => errors.first_message().map(str::to_string),
            _ => None,
        }
    }

    fn is_decode_failure(&self) -> bool {
        match self {
            Error::Json(_) => true,
            Error::Http(e) => e.is_decode(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
