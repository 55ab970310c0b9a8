//! Error type shared by every layer of the crate.
//!
//! Each variant carries a human-readable message and structured `details`
//! so an outer layer can render the failure without re-deriving context.

use serde::Serialize;
use serde_json::{Value, json};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User, watch list, or entry-in-category absent.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The series does not exist in the catalogue.
    #[error("{message}")]
    InvalidSeries { message: String, details: Value },

    /// The series is already tracked in some category of the watch list.
    #[error("{message}")]
    DuplicateSeries { message: String, details: Value },

    /// Unrecognized category identifier.
    #[error("{message}")]
    InvalidCategory { message: String, details: Value },

    /// Progress payload out of range.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Opaque failure from the persistence gateway.
    #[error("persistence failure: {source}")]
    Persistence {
        #[source]
        source: BoxError,
    },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_series(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidSeries {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_series(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateSeries {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_category(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCategory {
            message: message.into(),
            details,
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn persistence(source: impl Into<BoxError>) -> Self {
        Self::Persistence {
            source: source.into(),
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidSeries { .. } => "invalid_series",
            AppError::DuplicateSeries { .. } => "duplicate_series",
            AppError::InvalidCategory { .. } => "invalid_category",
            AppError::Validation { .. } => "validation_error",
            AppError::Persistence { .. } => "persistence_failure",
        }
    }

    /// Renders this error into the serializable form used by [`Envelope`].
    pub fn to_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::NotFound { details, .. }
            | AppError::InvalidSeries { details, .. }
            | AppError::DuplicateSeries { details, .. }
            | AppError::InvalidCategory { details, .. }
            | AppError::Validation { details, .. } => details.clone(),
            AppError::Persistence { .. } => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::persistence(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::validation("Invalid series progress", json!({ "fields": fields }))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// `{data, error}` wrapper for results handed to an outer presentation layer.
///
/// Exactly one of the two fields is populated.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ErrorInfo>,
}

impl<T: Serialize> From<Result<T, AppError>> for Envelope<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Envelope {
                data: Some(data),
                error: None,
            },
            Err(e) => Envelope {
                data: None,
                error: Some(e.to_info()),
            },
        }
    }
}
