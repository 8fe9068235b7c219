//! Client errors

mod api;

pub use api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP 401: no session, or it expired.
    #[error("Oturum bulunamadı veya süresi doldu")]
    Unauthorized,

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Text for a toast. Server messages are shown as sent.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Status { message, .. }) if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}
