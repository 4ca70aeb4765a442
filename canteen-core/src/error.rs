//! Error types for Canteen operations
//!
//! Recording itself never fails: normalizing, appending, trimming,
//! projecting, serializing and digesting are total. The errors here cover
//! configuration, which is the only place a caller can hand the recorder
//! something it cannot use.
//!
//! Each variant carries a stable error code (e.g. `INVALID_STACK_SIZE`)
//! and a category, and can be rendered as a JSON-serializable response.
//!
//! # Example
//!
//! ```rust
//! use canteen_core::{CanteenError, ErrorCategory, StackLimit};
//!
//! let limit = StackLimit::new(10);
//! let err = limit.try_set(-1).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_STACK_SIZE");
//! assert_eq!(err.category(), ErrorCategory::Validation);
//! // The limit is left untouched
//! assert_eq!(limit.get(), 10);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Canteen operations
pub type Result<T> = std::result::Result<T, CanteenError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller supplied an unusable value
    Validation,
    /// Reading configuration from outside the process failed
    External,
}

/// Errors that can occur in Canteen operations
#[derive(Error, Debug)]
pub enum CanteenError {
    /// Stack size must be a non-negative integer
    #[error("Invalid stack size: {value}. The stack size must be zero or greater.")]
    InvalidStackSize { value: i64 },

    /// Number precision factor must be positive
    #[error("Invalid number precision: {value}. Use a positive factor such as 1000 for three decimals.")]
    InvalidPrecision { value: u32 },

    /// Failed to load configuration from a file
    #[error("Failed to load config from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error: {message}")]
    Io { message: String },
}

impl CanteenError {
    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            CanteenError::InvalidStackSize { .. }
            | CanteenError::InvalidPrecision { .. }
            | CanteenError::Json(_) => ErrorCategory::Validation,

            CanteenError::ConfigLoad { .. } | CanteenError::Io { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CanteenError::InvalidStackSize { .. } => "INVALID_STACK_SIZE",
            CanteenError::InvalidPrecision { .. } => "INVALID_PRECISION",
            CanteenError::ConfigLoad { .. } => "CONFIG_LOAD_ERROR",
            CanteenError::Json(_) => "JSON_ERROR",
            CanteenError::Io { .. } => "IO_ERROR",
        }
    }

    /// Converts this error to a JSON-serializable response object
    ///
    /// ```json
    /// {
    ///   "error": {
    ///     "code": "INVALID_STACK_SIZE",
    ///     "message": "Invalid stack size: -1. ...",
    ///     "category": "validation"
    ///   }
    /// }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
            },
        }
    }
}

impl From<std::io::Error> for CanteenError {
    fn from(err: std::io::Error) -> Self {
        CanteenError::Io {
            message: err.to_string(),
        }
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "INVALID_STACK_SIZE")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CanteenError::InvalidStackSize { value: -3 }.error_code(),
            "INVALID_STACK_SIZE"
        );
        assert_eq!(
            CanteenError::InvalidPrecision { value: 0 }.error_code(),
            "INVALID_PRECISION"
        );
        assert_eq!(
            CanteenError::ConfigLoad {
                path: "canteen.json".to_string(),
                reason: "missing".to_string()
            }
            .error_code(),
            "CONFIG_LOAD_ERROR"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CanteenError::InvalidStackSize { value: -1 }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            CanteenError::Io {
                message: "denied".to_string()
            }
            .category(),
            ErrorCategory::External
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let err = CanteenError::InvalidStackSize { value: -7 };
        let response = err.to_error_response();

        let json = serde_json::to_string_pretty(&response).unwrap();
        assert!(json.contains("INVALID_STACK_SIZE"));
        assert!(json.contains("-7"));
        assert!(json.contains("validation"));

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error.code, "INVALID_STACK_SIZE");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CanteenError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().contains("no such file"));
    }
}
