//! Options for the top-level solve entry point.

use std::fmt;

use milx_core::{CancelToken, SolverError, SolverSettings};

use crate::search::{BranchHook, CutHook, HeuristicHook};

/// Options accepted by [`solve`](crate::solve).
///
/// Embeds the simplex engine settings and adds the integer-layer knobs:
/// worker cap, reserved gap sensitivity, and the strategy hooks.
#[derive(Clone)]
pub struct SolveOptions {
    /// Settings forwarded to the simplex engine.
    pub solver: SolverSettings,

    /// Relative gap at which the search may stop early. Reserved; validated
    /// but not yet consulted.
    pub gap_sensitivity: f64,

    /// Cap on parallel tree workers; zero picks half the hardware
    /// parallelism.
    pub threads: usize,

    /// Branching strategy override.
    pub branch: Option<BranchHook>,

    /// Rounding-heuristic override.
    pub heuristic: Option<HeuristicHook>,

    /// Cutting-plane override.
    pub cut: Option<CutHook>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            gap_sensitivity: 0.05,
            threads: 0,
            branch: None,
            heuristic: None,
            cut: None,
        }
    }
}

impl fmt::Debug for SolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveOptions")
            .field("solver", &self.solver)
            .field("gap_sensitivity", &self.gap_sensitivity)
            .field("threads", &self.threads)
            .field("branch", &self.branch.is_some())
            .field("heuristic", &self.heuristic.is_some())
            .field("cut", &self.cut.is_some())
            .finish()
    }
}

impl SolveOptions {
    /// Check the options for consistency.
    pub fn validate(&self) -> Result<(), SolverError> {
        self.solver.validate()?;
        if !(0.0..=1.0).contains(&self.gap_sensitivity) {
            return Err(SolverError::invalid_input(
                "gap sensitivity must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Set the numerical tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Set the per-phase simplex iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Set the worker cap; zero picks the hardware default.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Enable or disable progress logging.
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.solver.logging = logging;
        self
    }

    /// Enable or disable per-node debug traces.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.solver.debug = debug;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.solver.cancel = cancel;
        self
    }

    /// Override the branching strategy.
    pub fn with_branch(mut self, branch: BranchHook) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Override the rounding heuristic.
    pub fn with_heuristic(mut self, heuristic: HeuristicHook) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    /// Override the cut generator.
    pub fn with_cut(mut self, cut: CutHook) -> Self {
        self.cut = Some(cut);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milx_core::ErrorKind;

    #[test]
    fn test_default_options_are_valid() {
        assert!(SolveOptions::default().validate().is_ok());
    }

    #[test]
    fn test_gap_sensitivity_bounds() {
        let mut options = SolveOptions::default();
        options.gap_sensitivity = 1.5;
        assert_eq!(options.validate().unwrap_err().kind, ErrorKind::InvalidInput);

        options.gap_sensitivity = -0.1;
        assert!(options.validate().is_err());

        options.gap_sensitivity = 1.0;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_solver_settings_are_validated_too() {
        let options = SolveOptions::default().with_tolerance(-1.0);
        assert!(options.validate().is_err());
    }
}
