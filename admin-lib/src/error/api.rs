use std::time::Duration;

use serde::Deserialize;

/// A failed call to the admin API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success status other than 401.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Invalid URL: {0}")]
    BadUrl(String),

    /// The body did not match the expected payload.
    #[error("Unexpected response: {reason}")]
    Decode { reason: String, body: String },
}

/// `{ "message": "..." }`, the API's error envelope.
#[derive(Deserialize)]
struct Envelope {
    message: String,
}

impl ApiError {
    /// Status error for a response body. Uses the envelope's message when
    /// the body has one, the raw body otherwise.
    pub fn from_response(code: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) => envelope.message,
            Err(_) => body.trim().to_string(),
        };
        Self::Status { code, message }
    }

    pub fn decode(reason: impl ToString, body: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.to_string(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
