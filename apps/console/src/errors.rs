use thiserror::Error;

/// Application-level error type. Exactly three kinds of failure exist:
/// a local precondition was not met (nothing went over the wire), the call
/// itself failed, or the service answered and said no.
///
/// No error is fatal — the console surfaces the message and the operator
/// retries the action. No layer retries automatically.
#[derive(Debug, Error)]
pub enum AppError {
    /// Local precondition failure. No request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure, timeout, or a response body that was not the
    /// expected JSON. Session state is never touched by a failed call.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service returned `success: false`. The error string is
    /// surfaced verbatim.
    #[error("{0}")]
    Application(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}
