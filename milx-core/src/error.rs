//! Error types shared across the solver crates.

use thiserror::Error;

/// Classification of a solver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unclassified failure.
    Unknown,

    /// The problem admits no feasible point.
    Infeasible,

    /// The objective is unbounded over the feasible region.
    Unbounded,

    /// A numerical operation failed (singular basis, iteration limit).
    NumericalFailure,

    /// Caller-supplied data or configuration is invalid.
    InvalidInput,
}

/// A solver error: a kind, a message, and an optional wrapped cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SolverError {
    /// Failure classification.
    pub kind: ErrorKind,

    /// Human-readable description.
    pub message: String,

    /// Underlying cause, if any.
    #[source]
    pub source: Option<Box<SolverError>>,
}

impl SolverError {
    /// Create an error with no cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_source(kind: ErrorKind, message: impl Into<String>, source: SolverError) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for an [`ErrorKind::Infeasible`] error.
    pub fn infeasible(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infeasible, message)
    }

    /// Shorthand for an [`ErrorKind::Unbounded`] error.
    pub fn unbounded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unbounded, message)
    }

    /// Shorthand for an [`ErrorKind::NumericalFailure`] error.
    pub fn numerical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NumericalFailure, message)
    }

    /// Shorthand for an [`ErrorKind::InvalidInput`] error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }
}
