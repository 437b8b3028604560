//! Error types for codegraph-pta
//!
//! Provides unified error handling across the crate. Only unrecoverable
//! conditions are errors: unresolvable dispatch, parameter-count mismatch
//! at a wired call edge, and the optional iteration safety valve.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for analysis runs
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No concrete method was found for a method reference
    #[error("Unresolved method: {class}.{subsignature}")]
    UnresolvedMethod { class: String, subsignature: String },

    /// Actual/formal parameter-count mismatch on a call edge
    #[error("Arity mismatch at call site {call_site} -> {callee}: expected {expected} arguments, found {found}")]
    ArityMismatch {
        call_site: String,
        callee: String,
        expected: usize,
        found: usize,
    },

    /// The program declares no entry method
    #[error("Program has no entry method")]
    NoEntryMethod,

    /// Configured iteration bound was exceeded
    #[error("{solver} exceeded the iteration limit of {limit}")]
    IterationLimit { solver: &'static str, limit: usize },

    /// Program construction error
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Create an invalid-program error
    pub fn invalid_program(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidProgram(msg.into())
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
