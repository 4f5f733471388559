//! Uniform `{status, message, data}` response wrapper.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Outcome reported in the `status` field of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request was handled.
    Success,
    /// The client sent something unacceptable (4xx).
    Fail,
    /// The server could not complete the request (5xx).
    Error,
}

/// Response envelope shared by every handler.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    /// Successful envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Envelope for a non-success outcome
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug)]
pub struct Reply<T> {
    pub code: StatusCode,
    pub envelope: Envelope<T>,
}

impl<T> Reply<T> {
    pub fn ok(envelope: Envelope<T>) -> Self {
        Self {
            code: StatusCode::OK,
            envelope,
        }
    }

    pub fn created(envelope: Envelope<T>) -> Self {
        Self {
            code: StatusCode::CREATED,
            envelope,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.envelope)).into_response()
    }
}

/// Result type returned by envelope-speaking handlers
pub type ApiResult<T> = Result<Reply<T>, crate::error::AppError>;
