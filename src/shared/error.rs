// src/shared/error.rs
use thiserror::Error;

/// Failure taxonomy for every backend call: either nothing reached the
/// server, or the server answered with a failure status and (usually)
/// a message in its envelope.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("session expired, please log in again")]
    Unauthorized,
}

impl GatewayError {
    /// One human-readable line for the admin UI. Server-provided messages
    /// win over transport text; an empty message falls back to a generic
    /// line rather than a blank toast.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Server { message, .. } if !message.is_empty() => message.clone(),
            GatewayError::Server { status, .. } => format!("server returned {status}"),
            GatewayError::Transport(detail) if !detail.is_empty() => {
                format!("network error: {detail}")
            }
            GatewayError::Transport(_) => "request failed, please try again".to_string(),
            GatewayError::Unauthorized => "session expired, please log in again".to_string(),
        }
    }
}
