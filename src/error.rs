use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client. None of them are recovered internally,
/// every failure propagates to the caller as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials were missing or unusable at construction time
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required request parameter was empty, caught before any network call
    #[error("invalid request: {0}")]
    Validation(String),

    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout)
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status
    #[error("api error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The service answered with a success status but a body the client
    /// could not decode into the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl Error {
    /// Returns the HTTP status for api errors, None for every other kind
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error envelope the service uses for non-success responses
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/**
Builds an api error from a non-success status and the raw response body

Prefers the message from the service's `{"error": {"message": ...}}` envelope,
falls back to the raw body, then to the canonical status reason
*/
pub(crate) fn api_error(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            let raw = body.trim();
            if raw.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                raw.to_string()
            }
        }
    };
    Error::Api { status, message }
}
