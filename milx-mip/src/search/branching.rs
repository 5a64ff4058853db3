//! Branching strategies and the strategy hook types.

use std::sync::Arc;

use nalgebra::DVector;

use milx_core::{BranchDirection, SolverError, SolverSettings};

use super::Node;

/// Produces the children of a fractional node. An error marks the branch as
/// dead; the caller prunes it and continues with the siblings.
pub type BranchHook =
    Arc<dyn Fn(&Node, &SolverSettings) -> Result<Vec<Node>, SolverError> + Send + Sync>;

/// An integer-feasible solution suggested by a heuristic, with its
/// objective in the original problem sense.
#[derive(Debug, Clone)]
pub struct Hint {
    /// Suggested primal point.
    pub solution: DVector<f64>,

    /// Objective value of the suggestion, original sense.
    pub objective: f64,
}

/// Proposes an integer-feasible point for a node, or `None` for no hint.
pub type HeuristicHook = Arc<dyn Fn(&Node) -> Option<Hint> + Send + Sync>;

/// A cutting plane: one row to append to a node's equality system.
#[derive(Debug, Clone)]
pub struct CutRow {
    /// Row coefficients, one per column of the node's form.
    pub coefficients: DVector<f64>,

    /// Right-hand side of the row.
    pub rhs: f64,
}

/// Generates cutting planes for a node. An empty list adds nothing.
pub type CutHook = Arc<dyn Fn(&Node) -> Vec<CutRow> + Send + Sync>;

/// Default branching rule: split on the lowest-indexed decision variable
/// whose relaxation value is fractional.
///
/// Two children are produced: one bounding the variable at the integer
/// below its current value, one at the integer above. Slack columns are
/// never branched on. Returns an infeasibility error when no fractional
/// decision variable exists.
pub fn first_fractional(node: &Node, settings: &SolverSettings) -> Result<Vec<Node>, SolverError> {
    let scf = &node.scf;
    let Some(primal) = scf.primal.as_ref() else {
        return Err(SolverError::infeasible(
            "node has no relaxation solution to branch on",
        ));
    };

    let target = (0..primal.len().min(scf.slack_mask.len())).find(|&i| {
        !scf.slack_mask[i] && (primal[i] - primal[i].round()).abs() >= settings.tolerance
    });
    let Some(var) = target else {
        return Err(SolverError::infeasible("no fractional variable to branch on"));
    };

    let floor = primal[var].floor();
    let up = node.branch_child(var, floor + 1.0, BranchDirection::Up);
    let down = node.branch_child(var, floor, BranchDirection::Down);
    Ok(vec![up, down])
}

/// Default heuristic: no hint.
pub fn no_heuristic(_node: &Node) -> Option<Hint> {
    None
}

/// Default cut generator: no cuts.
pub fn no_cuts(_node: &Node) -> Vec<CutRow> {
    Vec::new()
}
