//! Error types for Klingo operations.
//!
//! Every failure surfaced by the client crates is an [`Error`]. The platform
//! reports application errors either through the transport status or inside a
//! 200 body, so the central variant carries the operation name, the numeric
//! status and, when the body could be decoded, the payload itself.

use serde_json::Value;
use thiserror::Error;

/// Main error type for Klingo operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A remote call was rejected by the platform
    #[error("Remote call `{operation}` failed with status {status}")]
    RemoteCall {
        /// Operation or query name that failed
        operation: String,
        /// Numeric status reported by the platform
        status: u16,
        /// Decoded error body, when the response was parseable
        body: Option<Value>,
    },

    /// Login was rejected
    #[error("Authentication failed with status {status}")]
    AuthenticationFailed {
        /// Transport status of the login response
        status: u16,
        /// Decoded error body, when the response was parseable
        body: Option<Value>,
    },

    /// Login succeeded but the response carried no token field
    #[error("Login response carried no `access_token` or `token` field")]
    MissingToken,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint or path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout waiting for the platform: {0}")]
    Timeout(String),

    /// Platform is unreachable
    #[error("Platform unavailable: {0}")]
    Unavailable(String),

    /// Failed to decode a platform response
    #[error("Failed to parse platform response: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Local I/O error (file uploads)
    #[error("I/O error: {0}")]
    Io(String),
}

/// Specialized result type for Klingo operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::RemoteCall { .. } => "REMOTE_CALL_FAILED",
            Self::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            Self::MissingToken => "MISSING_TOKEN",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Numeric status attached to the error, when the platform reported one.
    ///
    /// The client performs no local classification of transient versus
    /// permanent failures; callers inspect the status themselves.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteCall { status, .. } | Self::AuthenticationFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Decoded error body attached to the error, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::RemoteCall { body, .. } | Self::AuthenticationFailed { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::Unavailable(_) | Self::ParseError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Unavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::RemoteCall {
                operation: "pacientes.index".to_string(),
                status: 422,
                body: None
            }
            .error_code(),
            "REMOTE_CALL_FAILED"
        );
        assert_eq!(
            Error::AuthenticationFailed {
                status: 401,
                body: None
            }
            .error_code(),
            "AUTHENTICATION_FAILED"
        );
        assert_eq!(Error::MissingToken.error_code(), "MISSING_TOKEN");
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
        assert_eq!(Error::HttpError("test".to_string()).error_code(), "HTTP_ERROR");
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::Unavailable("test".to_string()).error_code(),
            "UNAVAILABLE"
        );
        assert_eq!(
            Error::ParseError("test".to_string()).error_code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(Error::Io("test".to_string()).error_code(), "IO_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = Error::RemoteCall {
            operation: "agendas.index".to_string(),
            status: 500,
            body: None,
        };
        assert_eq!(
            err.to_string(),
            "Remote call `agendas.index` failed with status 500"
        );

        let err = Error::AuthenticationFailed {
            status: 403,
            body: None,
        };
        assert_eq!(err.to_string(), "Authentication failed with status 403");
    }

    #[test]
    fn test_status_accessor() {
        let err = Error::RemoteCall {
            operation: "op".to_string(),
            status: 404,
            body: None,
        };
        assert_eq!(err.status(), Some(404));

        let err = Error::AuthenticationFailed {
            status: 401,
            body: None,
        };
        assert_eq!(err.status(), Some(401));

        assert_eq!(Error::Timeout("t".to_string()).status(), None);
    }

    #[test]
    fn test_body_accessor() {
        let body = json!({"status": 422, "error": "invalid"});
        let err = Error::RemoteCall {
            operation: "op".to_string(),
            status: 422,
            body: Some(body.clone()),
        };
        assert_eq!(err.body(), Some(&body));
        assert_eq!(Error::MissingToken.body(), None);
    }

    #[test]
    fn test_should_log() {
        assert!(Error::ConfigError("test".to_string()).should_log());
        assert!(Error::Unavailable("test".to_string()).should_log());
        assert!(Error::ParseError("test".to_string()).should_log());

        assert!(!Error::MissingToken.should_log());
        assert!(!Error::RemoteCall {
            operation: "op".to_string(),
            status: 400,
            body: None
        }
        .should_log());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let klingo_err: Error = err.into();
        assert!(matches!(klingo_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<Value>("{invalid json}").unwrap_err();
        let klingo_err: Error = err.into();
        assert!(matches!(klingo_err, Error::ParseError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let klingo_err: Error = err.into();
        assert!(matches!(klingo_err, Error::Io(_)));
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = Error::RemoteCall {
            operation: "op".to_string(),
            status: 400,
            body: Some(json!({"error": "bad"})),
        };
        let cloned = err.clone();
        assert_eq!(err, cloned);
        assert_ne!(
            err,
            Error::RemoteCall {
                operation: "op".to_string(),
                status: 401,
                body: None
            }
        );
    }
}
