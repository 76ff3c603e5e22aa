//! Centralized Error Handling Module
//!
//! Setiap kegagalan memiliki kode error yang unik supaya mudah dilacak
//! di log production.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - DATE_xxx: Date parsing errors
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use std::fmt;

use crate::core::date_parser::ParseFailure;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Date Errors (1xx)
    // ============================================
    /// Date missing, empty, or not a string/date value
    DateEmptyOrInvalidType,
    /// String did not match any accepted date format
    DateUnparseable,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Unauthorized (invalid API key)
    ApiUnauthorized,
    /// Field is not on the writable allow-list
    ApiForbiddenField,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateEmptyOrInvalidType => "DATE_EMPTY_OR_INVALID_TYPE",
            Self::DateUnparseable => "DATE_UNPARSEABLE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiUnauthorized => "API_UNAUTHORIZED",
            Self::ApiForbiddenField => "API_FORBIDDEN_FIELD",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest
            | Self::DateEmptyOrInvalidType
            | Self::DateUnparseable => 400,
            Self::ApiUnauthorized => 401,
            Self::ApiForbiddenField => 403,
            // Bad config stops startup, it never reaches a client
            Self::ConfigInvalidValue => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Missing or wrong API key
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::ApiUnauthorized, "Invalid or missing API key")
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Field outside the writable allow-list
    pub fn forbidden_field(field: &str) -> Self {
        Self::new(
            ErrorCode::ApiForbiddenField,
            format!("Field '{}' is not allowed to be updated", field),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: '{}'", key, value),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from date failures
// ============================================

impl From<ParseFailure> for AppError {
    fn from(err: ParseFailure) -> Self {
        let code = match err {
            ParseFailure::EmptyOrInvalidType => ErrorCode::DateEmptyOrInvalidType,
            ParseFailure::UnparseableString => ErrorCode::DateUnparseable,
        };
        Self::with_source(code, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        let err = AppError::forbidden_field("created_at");
        assert_eq!(err.code, ErrorCode::ApiForbiddenField);
        assert_eq!(err.code_str(), "API_FORBIDDEN_FIELD");
        assert!(err.to_string().contains("created_at"));
    }

    #[test]
    fn test_unauthorized() {
        let err = AppError::unauthorized();
        assert_eq!(err.code_str(), "API_UNAUTHORIZED");
        assert_eq!(err.code.http_status(), 401);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiForbiddenField.http_status(), 403);
        assert_eq!(ErrorCode::ApiUnauthorized.http_status(), 401);
        assert_eq!(ErrorCode::DateUnparseable.http_status(), 400);
        assert_eq!(ErrorCode::ConfigInvalidValue.http_status(), 500);
    }

    #[test]
    fn test_parse_failure_conversion() {
        let err: AppError = ParseFailure::UnparseableString.into();
        assert_eq!(err.code, ErrorCode::DateUnparseable);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("[DATE_UNPARSEABLE] date string"));

        let err: AppError = ParseFailure::EmptyOrInvalidType.into();
        assert_eq!(err.code_str(), "DATE_EMPTY_OR_INVALID_TYPE");
    }
}
