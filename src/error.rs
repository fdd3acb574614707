//! Typed errors and their user-facing messages.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Non-2xx response. `message` is the response text, or the status reason when the body is unreadable.
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// A 2xx body that is not the record shape the console expects.
    #[error("invalid record: {0}")]
    Decode(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Build an HTTP failure from a status and whatever body text could be read.
    pub fn from_status(status: StatusCode, body: Option<String>) -> Self {
        let message = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        AppError::Http { status, message }
    }

    /// Text shown in an error banner or next to the control that failed.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http { message, .. } => message.clone(),
            AppError::Transport(e) if e.is_timeout() => "request timed out".into(),
            AppError::Transport(e) if e.is_connect() => "could not reach the server".into(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Transport(e) => e.status(),
            AppError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_body_text() {
        let err = AppError::from_status(StatusCode::CONFLICT, Some("PanNo already exists\n".into()));
        assert_eq!(err.user_message(), "PanNo already exists");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn http_error_falls_back_to_reason_phrase() {
        let err = AppError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.user_message(), "Internal Server Error");
        let err = AppError::from_status(StatusCode::BAD_GATEWAY, Some("   ".into()));
        assert_eq!(err.user_message(), "Bad Gateway");
    }

    #[test]
    fn config_errors_convert() {
        let err: AppError = ConfigError::DuplicatePathSegment("parti".into()).into();
        assert_eq!(err.user_message(), "duplicate path segment: parti");
    }
}
