//! Error handling for the Coffee Shop Catalog
//!
//! Provides consistent error details for the presentation layer

use std::fmt;

use serde::Serialize;
use shared::{FieldError, FieldErrors};
use thiserror::Error;

/// Failures of the key-value storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is not available in this environment")]
    Unavailable,

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Catalog mutations that write to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Delete,
}

impl Operation {
    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::Add => "Coffee shop added successfully",
            Operation::Delete => "Coffee shop removed",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => "Failed to add coffee shop",
            Operation::Delete => "Failed to remove coffee shop",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => f.write_str("add"),
            Operation::Delete => f.write_str("remove"),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum CatalogError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Storage errors
    #[error("Failed to {operation} coffee shop: {source}")]
    Persistence {
        operation: Operation,
        #[source]
        source: StorageError,
    },

    #[error("No unused coffee shop id could be allocated")]
    IdExhausted,

    #[error("Stored catalog could not be read: {0}")]
    StorageRead(#[source] StorageError),

    #[error("Stored catalog could not be parsed: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Catalog could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

/// Error structure handed to the presentation layer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            errors: Vec::new(),
        }
    }
}

impl CatalogError {
    pub fn persistence(operation: Operation, source: StorageError) -> Self {
        CatalogError::Persistence { operation, source }
    }

    /// Stable code and message for the UI boundary
    pub fn detail(&self) -> ErrorDetail {
        match self {
            CatalogError::Validation(errors) => {
                let mut detail = ErrorDetail::new("VALIDATION_ERROR", self.to_string());
                detail.field = errors.iter().next().map(|e| e.field.to_string());
                detail.errors = errors.iter().cloned().collect();
                detail
            }
            CatalogError::InvalidInput(msg) => ErrorDetail::new("INVALID_INPUT", msg.clone()),
            CatalogError::Persistence { operation, source } => {
                let code = match source {
                    StorageError::QuotaExceeded { .. } => "STORAGE_QUOTA_EXCEEDED",
                    StorageError::Unavailable => "STORAGE_UNAVAILABLE",
                    _ => "PERSISTENCE_ERROR",
                };
                ErrorDetail::new(code, operation.failure_message())
            }
            CatalogError::IdExhausted => ErrorDetail::new("ID_ALLOCATION_ERROR", self.to_string()),
            CatalogError::StorageRead(_) => ErrorDetail::new("STORAGE_READ_ERROR", self.to_string()),
            CatalogError::Parse(_) => ErrorDetail::new("PARSE_ERROR", self.to_string()),
            CatalogError::Serialization(_) => {
                ErrorDetail::new("SERIALIZATION_ERROR", self.to_string())
            }
            CatalogError::Configuration(_) => {
                ErrorDetail::new("CONFIGURATION_ERROR", self.to_string())
            }
        }
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
