use thiserror::Error;

use crate::client::ApiError;

/// Crate-level error types
#[derive(Error, Debug)]
pub enum FoiError {
    /// Failures talking to the open data API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Page, page size and jump-to-page validation errors
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FoiError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            FoiError::Api(_) => "API_ERROR",
            FoiError::Pagination(_) => "PAGINATION_ERROR",
            FoiError::Configuration(_) => "CONFIGURATION_ERROR",
            FoiError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Process exit code used by the CLI (sysexits values)
    pub fn exit_code(&self) -> u8 {
        match self {
            FoiError::Configuration(_) | FoiError::Validation(_) => 78,
            FoiError::Api(ApiError::InvalidRequest(_)) => 64,
            FoiError::Api(_) => 69,
            FoiError::Pagination(_) => 65,
        }
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for FoiError {
    fn from(err: validator::ValidationErrors) -> Self {
        FoiError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for FoiError {
    fn from(err: config::ConfigError) -> Self {
        FoiError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FoiError>;
