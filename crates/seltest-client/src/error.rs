// ABOUTME: Error types for seltest-client
// ABOUTME: Separates transport failures from backend-reported HTTP errors

use thiserror::Error;

/// Errors that can occur talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The backend's `detail` message, when the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status code for backend-reported errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an `Http` error from a status and raw error body.
    ///
    /// FastAPI reports failures as `{"detail": "..."}`. Validation failures
    /// carry a list under `detail` instead, which is not a user-facing message
    /// and is dropped, as is a blank one.
    pub fn from_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .filter(|d| !d.trim().is_empty());
        ApiError::Http { status, detail }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_connection() {
        let err = ApiError::Connection("refused".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Connection failed"));
        assert!(display.contains("refused"));
    }

    #[test]
    fn test_display_http_with_detail() {
        let err = ApiError::Http {
            status: 404,
            detail: Some("Model 'x' not found.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 404: Model 'x' not found."
        );
    }

    #[test]
    fn test_display_http_without_detail() {
        let err = ApiError::Http {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "Request failed with status 502: no detail");
    }

    #[test]
    fn test_from_body_string_detail() {
        let err = ApiError::from_body(500, r#"{"detail": "Failed to generate a valid test plan."}"#);
        assert_eq!(err.detail(), Some("Failed to generate a valid test plan."));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_from_body_validation_list_is_dropped() {
        let body = r#"{"detail": [{"loc": ["body", "codebase"], "msg": "field required"}]}"#;
        let err = ApiError::from_body(422, body);
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_from_body_blank_detail_is_dropped() {
        assert_eq!(ApiError::from_body(500, r#"{"detail": ""}"#).detail(), None);
        assert_eq!(ApiError::from_body(500, r#"{"detail": "  "}"#).detail(), None);
    }

    #[test]
    fn test_from_body_not_json() {
        let err = ApiError::from_body(500, "Internal Server Error");
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_detail_only_for_http() {
        let err = ApiError::Decode("bad".to_string());
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.zip");
        let err: ApiError = io.into();
        assert!(matches!(err, ApiError::Io(_)));
        assert!(err.to_string().contains("missing.zip"));
    }
}
