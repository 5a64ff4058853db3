//! Integer-program wrapper: the root standard form plus the shared
//! incumbent state.

use std::sync::Mutex;

use nalgebra::DVector;

use milx_core::StandardForm;

use crate::search::{BranchHook, CutHook, HeuristicHook};

/// Best integer-feasible solution found so far, stored in the original
/// problem sense.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Objective value of the incumbent; starts at +inf for minimization
    /// and -inf for maximization.
    pub objective: f64,

    /// The incumbent primal, `None` until a first candidate is accepted.
    pub solution: Option<DVector<f64>>,
}

/// A linear program with integrality requirements.
///
/// The incumbent is shared between branch-and-bound workers; its two fields
/// change together, so both sit behind one mutex and every candidate is
/// compared and written inside the same critical section.
pub struct IntegerProgram {
    /// Root standard form; carries the final status and solution.
    pub scf: StandardForm,

    pub(crate) incumbent: Mutex<Incumbent>,

    /// Branching strategy override.
    pub branch: Option<BranchHook>,

    /// Rounding-heuristic override.
    pub heuristic: Option<HeuristicHook>,

    /// Cutting-plane override.
    pub cut: Option<CutHook>,
}

impl IntegerProgram {
    /// Wrap a standard form, seeding the incumbent at the identity for the
    /// problem's sense.
    pub fn new(scf: StandardForm) -> Self {
        let objective = if scf.is_maximization {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        Self {
            scf,
            incumbent: Mutex::new(Incumbent {
                objective,
                solution: None,
            }),
            branch: None,
            heuristic: None,
            cut: None,
        }
    }

    /// Offer a candidate solution with its objective in the original sense.
    ///
    /// The first candidate is always accepted; afterwards a candidate must
    /// improve the incumbent by more than `tolerance` (strictly greater for
    /// maximization, strictly lower for minimization). Returns whether the
    /// candidate was accepted.
    pub fn offer_incumbent(
        &self,
        objective: f64,
        solution: &DVector<f64>,
        tolerance: f64,
    ) -> bool {
        let mut best = self
            .incumbent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let improved = match best.solution {
            None => true,
            Some(_) => {
                if self.scf.is_maximization {
                    objective > best.objective + tolerance
                } else {
                    objective < best.objective - tolerance
                }
            }
        };

        if improved {
            best.objective = objective;
            best.solution = Some(solution.clone());
        }
        improved
    }

    /// Snapshot of the current incumbent.
    pub fn incumbent(&self) -> Incumbent {
        self.incumbent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
