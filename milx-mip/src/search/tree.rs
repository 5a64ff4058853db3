//! Branch-and-bound driver.

use std::thread;

use milx_core::{simplex, ErrorKind, SolveStatus, SolverError, StandardForm};

use crate::program::IntegerProgram;
use crate::search::{branching, Node};
use crate::settings::SolveOptions;
use crate::workers;

/// Solve an integer program by branch-and-bound.
///
/// The root relaxation is solved first; a non-optimal root propagates its
/// status directly. Otherwise the tree is expanded recursively and, on
/// return, the program's standard form carries the final status and, when
/// an incumbent was found, its objective and solution.
pub fn branch_and_bound(
    ip: &mut IntegerProgram,
    options: &SolveOptions,
) -> Result<(), SolverError> {
    simplex::solve(&mut ip.scf, &options.solver).map_err(|err| {
        SolverError::with_source(ErrorKind::Unknown, "error solving root relaxation", err)
    })?;

    if ip.scf.status != SolveStatus::Optimal {
        return Ok(());
    }

    let mut root = Node::new(ip.scf.clone());
    root.is_integer = is_integer_feasible(&root.scf, options.solver.tolerance);

    if root.is_integer {
        if let Some(primal) = root.scf.primal.as_ref() {
            ip.offer_incumbent(original_sense(&root.scf), primal, options.solver.tolerance);
        }
    } else {
        expand(ip, &root, options)?;
    }

    let incumbent = ip.incumbent();
    match incumbent.solution {
        Some(solution) => {
            ip.scf.status = SolveStatus::Optimal;
            ip.scf.objective_value = incumbent.objective;
            ip.scf.primal = Some(solution);
        }
        None => ip.scf.status = SolveStatus::Infeasible,
    }
    Ok(())
}

/// Expand a fractional node: branch, solve every child (on a worker thread
/// when a slot is free, inline otherwise), and recurse into children whose
/// relaxations are still fractional.
fn expand(ip: &IntegerProgram, node: &Node, options: &SolveOptions) -> Result<(), SolverError> {
    if options.solver.cancel.is_cancelled() {
        return Err(SolverError::new(ErrorKind::Unknown, "solve cancelled"));
    }

    let children = match &ip.branch {
        Some(hook) => hook(node, &options.solver)?,
        None => branching::first_fractional(node, &options.solver)?,
    };

    let outcomes = thread::scope(|scope| {
        let mut results = Vec::with_capacity(children.len());
        let mut handles = Vec::new();

        for mut child in children {
            child.depth = node.depth + 1;
            if workers::try_acquire() {
                handles.push(scope.spawn(move || {
                    let result = process_child(ip, &mut child, options);
                    workers::release();
                    result
                }));
            } else {
                results.push(process_child(ip, &mut child, options));
            }
        }

        for handle in handles {
            results.push(handle.join().unwrap_or_else(|_| {
                Err(SolverError::new(
                    ErrorKind::Unknown,
                    "branch worker panicked",
                ))
            }));
        }
        results
    });

    // Child failures kill only their own subtree; the siblings already ran.
    for outcome in outcomes {
        if let Err(err) = outcome {
            if options.solver.verbose() {
                log::warn!("branch subtree failed: {err}");
            }
        }
    }
    Ok(())
}

/// Solve one child relaxation and act on the outcome.
fn process_child(
    ip: &IntegerProgram,
    child: &mut Node,
    options: &SolveOptions,
) -> Result<(), SolverError> {
    if options.solver.debug {
        log::debug!("expanding node at depth {}", child.depth);
    }

    simplex::solve(&mut child.scf, &options.solver)?;
    if child.scf.status != SolveStatus::Optimal {
        // Infeasible or unbounded under the extra bound rows: prune.
        return Ok(());
    }

    child.is_integer = is_integer_feasible(&child.scf, options.solver.tolerance);
    if child.is_integer {
        if let Some(primal) = child.scf.primal.as_ref() {
            let objective = original_sense(&child.scf);
            let accepted = ip.offer_incumbent(objective, primal, options.solver.tolerance);
            if accepted && options.solver.debug {
                log::debug!("new incumbent: {objective:.4} at depth {}", child.depth);
            }
        }
        return Ok(());
    }

    if let Some(heuristic) = &ip.heuristic {
        if let Some(hint) = heuristic(child) {
            ip.offer_incumbent(hint.objective, &hint.solution, options.solver.tolerance);
        }
    }
    if let Some(cut) = &ip.cut {
        for row in cut(child) {
            child.scf.append_row(&row.coefficients, row.rhs);
        }
    }

    expand(ip, child, options)
}

/// Integer feasibility of a solved relaxation: every decision component is
/// within `tolerance` of its nearest integer. Slack columns are exempt.
pub fn is_integer_feasible(scf: &StandardForm, tolerance: f64) -> bool {
    let Some(primal) = scf.primal.as_ref() else {
        return false;
    };
    primal.iter().enumerate().all(|(i, &value)| {
        scf.slack_mask.get(i).copied().unwrap_or(false)
            || (value - value.round()).abs() < tolerance
    })
}

/// The solved objective flipped back into the original problem sense.
fn original_sense(scf: &StandardForm) -> f64 {
    if scf.is_maximization {
        -scf.objective_value
    } else {
        scf.objective_value
    }
}
