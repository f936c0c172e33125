//! Error types for filter execution
//!
//! One typed error covers the whole pipeline. Malformed filter arguments are
//! never errors (they parse permissively, see `filters::args`); only loader
//! failures, raster engine failures, and request-level aborts surface here.

use thiserror::Error;

/// Errors that can occur while executing a filter directive chain
#[derive(Error, Debug, Clone)]
pub enum FilterError {
    /// Auxiliary image reference failed to load
    #[error("Failed to load '{reference}': {message}")]
    Loader { reference: String, message: String },

    /// Underlying raster operation failed
    #[error("Raster operation '{operation}' failed: {message}")]
    Engine {
        operation: &'static str,
        message: String,
    },

    /// Request context was cancelled before the chain completed
    #[error("Filter execution cancelled")]
    Cancelled,

    /// Directive list exceeds the configured per-request cap
    #[error("Too many filters: {count} exceeds limit of {max}")]
    TooManyFilters { count: usize, max: usize },
}

impl FilterError {
    /// Helper constructors for common error patterns
    pub fn loader(reference: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::Loader {
            reference: reference.into(),
            message: message.into(),
        }
    }

    pub fn engine(operation: &'static str, message: impl Into<String>) -> Self {
        FilterError::Engine {
            operation,
            message: message.into(),
        }
    }

    /// True when the chain stopped for a request-level reason rather than a
    /// raster or loader failure.
    pub fn is_request_abort(&self) -> bool {
        matches!(
            self,
            FilterError::Cancelled | FilterError::TooManyFilters { .. }
        )
    }
}
