//! Failures of backend-facing calls.

use thiserror::Error;

/// Message shown when a failure carries no usable reason.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";

/// Failure of a backend-facing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success status; `reason` is the backend's message when it sent one.
    #[error("HTTP error: {status}")]
    Http {
        /// Response status code.
        status: u16,
        /// Message extracted from the response body.
        reason: Option<String>,
    },
    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Token missing, invalid or expired.
    #[error("Session expired")]
    SessionExpired,
    /// The backend (or a mock) refused the request with a message.
    #[error("{0}")]
    Rejected(String),
}

/// Result alias for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Text for a toast: the failure reason when one is known, otherwise a
    /// generic message.
    pub fn user_message(&self) -> String {
        let reason = match self {
            ServiceError::Http {
                reason: Some(reason),
                ..
            } => reason.trim(),
            ServiceError::Http {
                reason: None, ..
            } => return GENERIC_FAILURE.to_string(),
            ServiceError::Rejected(message) => message.trim(),
            ServiceError::SessionExpired => return self.to_string(),
            ServiceError::Network(_) | ServiceError::Parse(_) => {
                return GENERIC_FAILURE.to_string()
            },
        };
        if reason.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            reason.to_string()
        }
    }

    /// Whether the failure means the session is no longer usable.
    pub fn is_session_failure(&self) -> bool {
        matches!(
            self,
            ServiceError::SessionExpired
                | ServiceError::Http {
                    status: 401,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_reason_is_surfaced() {
        let err = ServiceError::Http {
            status: 400,
            reason: Some("Title is taken".to_string()),
        };
        assert_eq!(err.user_message(), "Title is taken");
    }

    #[test]
    fn missing_reason_falls_back_to_generic() {
        let err = ServiceError::Http {
            status: 500,
            reason: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(ServiceError::Network("boom".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(ServiceError::Rejected("  ".into()).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn unauthorized_counts_as_session_failure() {
        assert!(ServiceError::Http {
            status: 401,
            reason: None
        }
        .is_session_failure());
        assert!(ServiceError::SessionExpired.is_session_failure());
        assert!(!ServiceError::Parse("x".into()).is_session_failure());
    }
}
