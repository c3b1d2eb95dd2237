//! Crate error types.
//!
//! Per-product failures (too few segments, degenerate regression inputs,
//! implausible fits) are not errors: they surface as skipped products and the
//! run continues. Only run-level problems reach `ElasticityError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElasticityError {
    /// Configuration failed validation before the pipeline was built.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No product passed candidate selection at any relaxation tier.
    #[error(
        "No usable input data: 0 candidates at every selection tier \
         ({valid_records} valid of {total_records} records)"
    )]
    NoUsableData {
        total_records: usize,
        valid_records: usize,
    },

    /// Result table could not be written.
    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ElasticityError {
    pub fn config(msg: impl Into<String>) -> Self {
        ElasticityError::Config(msg.into())
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ElasticityError>;
