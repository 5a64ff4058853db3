//! Solver configuration and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SolverError;

/// Cancellation flag shared between a caller and an in-flight solve.
///
/// The token is cheap to clone; all clones observe the same flag. The solver
/// consults it at stage boundaries and at the top of each simplex iteration,
/// so cancellation is cooperative rather than preemptive.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any solve holding a clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Settings for the simplex engine.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Reduced-cost acceptance threshold, near-zero detection, and output
    /// zeroing all use this tolerance.
    pub tolerance: f64,

    /// Iteration safeguard per simplex phase.
    pub max_iterations: usize,

    /// Emit per-node debug traces.
    pub debug: bool,

    /// Emit progress logging.
    pub logging: bool,

    /// Cancellation flag.
    pub cancel: CancelToken,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            debug: false,
            logging: false,
            cancel: CancelToken::new(),
        }
    }
}

impl SolverSettings {
    /// Check the settings for consistency.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0) {
            return Err(SolverError::invalid_input("tolerance must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::invalid_input("max iterations must be > 0"));
        }
        Ok(())
    }

    /// Whether any logging output is requested. Debug implies logging.
    pub fn verbose(&self) -> bool {
        self.logging || self.debug
    }

    /// Set the numerical tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the per-phase iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable progress logging.
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}
