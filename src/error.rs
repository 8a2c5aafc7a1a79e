//! API Errors
//!
//! Coarse, presentation-oriented taxonomy: every failure ends up as banner
//! text or a log line.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request never got a response
    #[error("network error: {0}")]
    Network(String),
    /// 401; session has already been cleared when the request was authenticated
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden(Option<String>),
    #[error("not found")]
    NotFound,
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Error body some endpoints return alongside a non-2xx status
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

impl ApiError {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound,
            _ => ApiError::Status { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Text for an error banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error. Please check your connection and try again.".to_string(),
            ApiError::Unauthorized => "Please sign in to continue.".to_string(),
            ApiError::Forbidden(_) => "This content is private.".to_string(),
            ApiError::NotFound => "Not found.".to_string(),
            ApiError::Status { message: Some(message), .. } => message.clone(),
            ApiError::Status { status, .. } if *status >= 500 => {
                "The server had a problem. Please try again later.".to_string()
            }
            ApiError::Status { .. } => "The request could not be completed.".to_string(),
            ApiError::Decode(_) => "Received an unexpected response from the server.".to_string(),
        }
    }

    /// Server-supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Forbidden(message) | ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_taxonomy() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, Some("private".into())), ApiError::Forbidden(Some("private".into())));
        assert_eq!(ApiError::from_status(404, Some("gone".into())), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(409, Some("slug taken".into())),
            ApiError::Status { status: 409, message: Some("slug taken".into()) }
        );
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status { status: 400, message: Some("Title is required".into()) };
        assert_eq!(err.user_message(), "Title is required");
        assert_eq!(ApiError::NotFound.user_message(), "Not found.");
        assert!(ApiError::Network("timeout".into()).user_message().starts_with("Network error"));
        assert!(ApiError::Status { status: 502, message: None }.user_message().contains("server"));
    }

    #[test]
    fn test_error_body_falls_back_to_error_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Bad credentials"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad credentials"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
