//! Relay result and its wire form

use std::fmt;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Result of one relay invocation. On the wire it is a bare word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The transport accepted the message
    Success,
    /// The transport failed to take the message
    TransportError,
    /// The request was not a POST
    InvalidMethod,
}

impl RelayOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayOutcome::Success => "success",
            RelayOutcome::TransportError => "error",
            RelayOutcome::InvalidMethod => "invalid",
        }
    }

    /// Parse a relay response body
    pub fn parse(body: &str) -> Option<Self> {
        match body.trim() {
            "success" => Some(RelayOutcome::Success),
            "error" => Some(RelayOutcome::TransportError),
            "invalid" => Some(RelayOutcome::InvalidMethod),
            _ => None,
        }
    }
}

impl fmt::Display for RelayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntoResponse for RelayOutcome {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.as_str(),
        )
            .into_response()
    }
}
