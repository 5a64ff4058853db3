//! Two-phase revised simplex over a [`StandardForm`].
//!
//! Phase one augments the system with an identity block of artificial
//! variables and minimizes their sum to find a feasible basis; phase two
//! reuses that basis against the true objective. Both phases run the same
//! revised loop: solve for the basic solution and duals, price the
//! non-basic columns, run the ratio test, and overwrite one basis column.

mod basis;
mod pivot;

use nalgebra::{DMatrix, DVector};

use crate::error::{ErrorKind, SolverError};
use crate::settings::SolverSettings;
use crate::standard_form::{SolveStatus, StandardForm};

use basis::Basis;
use pivot::Phase;

/// Absolute threshold below which a basic artificial counts as zero during
/// the pre-phase-two cleanup.
const ARTIFICIAL_ZERO: f64 = 1e-8;

/// Result of one simplex phase.
struct PhaseOutcome {
    status: SolveStatus,
    value: f64,
    x: DVector<f64>,
}

/// Solve the standard form in place.
///
/// On return the form's `status` is set; `primal` and `objective_value` are
/// written only when the status is [`SolveStatus::Optimal`]. Infeasibility
/// detected by phase one is reported through the status, not as an error;
/// errors are reserved for numerical breakdown (singular basis, iteration
/// limit) and cancellation.
pub fn solve(scf: &mut StandardForm, settings: &SolverSettings) -> Result<(), SolverError> {
    let m = scf.constraints.nrows();
    let n = scf.constraints.ncols();

    // Phase 1 tableau [A | I] with unit costs on the artificial block.
    let mut tableau = DMatrix::zeros(m, n + m);
    tableau.view_mut((0, 0), (m, n)).copy_from(&scf.constraints);
    for i in 0..m {
        tableau[(i, n + i)] = 1.0;
    }

    let mut phase_one_costs = DVector::zeros(n + m);
    for i in 0..m {
        phase_one_costs[n + i] = 1.0;
    }

    let mut basis = Basis::from_indices(&tableau, &phase_one_costs, (n..n + m).collect());
    let outcome = run_phase(
        &tableau,
        &phase_one_costs,
        &mut basis,
        &scf.rhs,
        Phase::One,
        settings,
    )
    .map_err(|err| {
        let kind = err.kind;
        SolverError::with_source(kind, "phase one failed", err)
    })?;

    if outcome.status == SolveStatus::Optimal && outcome.value > settings.tolerance {
        if settings.verbose() {
            log::info!(
                "phase one residual {:.3e} exceeds tolerance; infeasible",
                outcome.value
            );
        }
        scf.status = SolveStatus::Infeasible;
        return Ok(());
    }

    // Swap zero-valued artificials out of the basis. A strictly positive
    // artificial, or one with no original column left to swap in, means the
    // constraint system is inconsistent.
    if !clear_artificials(&mut basis.indices, &outcome.x, n) {
        scf.status = SolveStatus::Infeasible;
        return Ok(());
    }

    // Phase 2: true objective over the original columns, zero cost on the
    // artificial block; the basis carries over from phase one.
    let mut phase_two_costs = DVector::zeros(n + m);
    for j in 0..n {
        phase_two_costs[j] = scf.objective[j];
    }
    let mut basis = Basis::from_indices(&tableau, &phase_two_costs, basis.indices);

    let outcome = run_phase(
        &tableau,
        &phase_two_costs,
        &mut basis,
        &scf.rhs,
        Phase::Two,
        settings,
    )
    .map_err(|err| {
        let kind = err.kind;
        SolverError::with_source(kind, "phase two failed", err)
    })?;

    scf.status = outcome.status;
    match outcome.status {
        SolveStatus::Optimal => {
            scf.objective_value = outcome.value;
            scf.primal = Some(outcome.x);
        }
        SolveStatus::Unbounded => {
            scf.objective_value = 0.0;
            scf.primal = Some(DVector::zeros(n));
        }
        _ => {}
    }
    Ok(())
}

/// Run the revised simplex loop for one phase.
fn run_phase(
    tableau: &DMatrix<f64>,
    costs: &DVector<f64>,
    basis: &mut Basis,
    rhs: &DVector<f64>,
    phase: Phase,
    settings: &SolverSettings,
) -> Result<PhaseOutcome, SolverError> {
    let m = rhs.len();
    let width = match phase {
        Phase::One => tableau.ncols(),
        Phase::Two => tableau.ncols() - m,
    };

    for _ in 0..settings.max_iterations {
        if settings.cancel.is_cancelled() {
            return Err(SolverError::new(ErrorKind::Unknown, "solve cancelled"));
        }

        let basic_solution = basis.solve(rhs)?;
        let duals = basis.solve_duals()?;

        let mut is_basic = vec![false; width];
        for &index in &basis.indices {
            if index < width {
                is_basic[index] = true;
            }
        }

        let Some(entering) = pivot::select_entering(
            tableau,
            costs,
            &duals,
            &is_basic,
            width,
            settings.tolerance,
        ) else {
            // Optimal: scatter the basic values into the phase primal.
            let mut x = DVector::zeros(width);
            let mut value = 0.0;
            for (row, &index) in basis.indices.iter().enumerate() {
                if index < width {
                    x[index] = basic_solution[row];
                }
                value += basis.costs[row] * basic_solution[row];
            }
            return Ok(PhaseOutcome {
                status: SolveStatus::Optimal,
                value,
                x,
            });
        };

        let direction = basis.solve(&entering.column)?;

        let Some(leaving) = pivot::select_leaving(
            &direction,
            &basic_solution,
            &basis.indices,
            phase,
            width,
        ) else {
            return Ok(PhaseOutcome {
                status: SolveStatus::Unbounded,
                value: 0.0,
                x: DVector::zeros(width),
            });
        };

        basis.replace(leaving, tableau, entering.index, entering.cost);
    }

    Err(SolverError::numerical("iteration limit reached"))
}

/// Swap every zero-valued basic artificial for a non-basic original column.
/// Returns `false` when the system is degenerate beyond repair: an
/// artificial sits in the basis at a non-zero value, or no original column
/// is left to take its place.
fn clear_artificials(indices: &mut [usize], x: &DVector<f64>, n: usize) -> bool {
    for position in 0..indices.len() {
        let index = indices[position];
        if index < n {
            continue;
        }
        if x[index].abs() >= ARTIFICIAL_ZERO {
            return false;
        }
        match (0..n).find(|j| !indices.contains(j)) {
            Some(replacement) => indices[position] = replacement,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CancelToken;

    /// min x + y  s.t.  x + y >= 4 (surplus column at index 2).
    fn covering_form() -> StandardForm {
        StandardForm {
            objective: DVector::from_vec(vec![1.0, 1.0, 0.0]),
            constraints: DMatrix::from_row_slice(1, 3, &[1.0, 1.0, -1.0]),
            rhs: DVector::from_vec(vec![4.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, false, true],
            num_primals: 2,
            is_maximization: false,
        }
    }

    #[test]
    fn test_simple_covering_lp() {
        let mut scf = covering_form();
        solve(&mut scf, &SolverSettings::default()).unwrap();

        assert_eq!(scf.status, SolveStatus::Optimal);
        assert!((scf.objective_value - 4.0).abs() < 1e-9);
        let primal = scf.primal.as_ref().unwrap();
        assert!((primal[0] + primal[1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounded_maximization_form() {
        // max 3x s.t. x <= 10, stored negated: min -3x, slack at index 1.
        let mut scf = StandardForm {
            objective: DVector::from_vec(vec![-3.0, 0.0]),
            constraints: DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            rhs: DVector::from_vec(vec![10.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, true],
            num_primals: 1,
            is_maximization: true,
        };
        solve(&mut scf, &SolverSettings::default()).unwrap();

        assert_eq!(scf.status, SolveStatus::Optimal);
        assert!((scf.objective_value + 30.0).abs() < 1e-9);
        assert!((scf.primal.as_ref().unwrap()[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_system() {
        // x <= 1 and x >= 2: slack at 1, surplus at 2.
        let mut scf = StandardForm {
            objective: DVector::from_vec(vec![1.0, 0.0, 0.0]),
            constraints: DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 0.0, 1.0, 0.0, -1.0]),
            rhs: DVector::from_vec(vec![1.0, 2.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, true, true],
            num_primals: 1,
            is_maximization: false,
        };
        solve(&mut scf, &SolverSettings::default()).unwrap();

        assert_eq!(scf.status, SolveStatus::Infeasible);
        assert!(scf.primal.is_none());
    }

    #[test]
    fn test_unbounded_objective() {
        // min -x s.t. x - s = 0: x can grow without bound.
        let mut scf = StandardForm {
            objective: DVector::from_vec(vec![-1.0, 0.0]),
            constraints: DMatrix::from_row_slice(1, 2, &[1.0, -1.0]),
            rhs: DVector::from_vec(vec![0.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, true],
            num_primals: 1,
            is_maximization: false,
        };
        solve(&mut scf, &SolverSettings::default()).unwrap();

        assert_eq!(scf.status, SolveStatus::Unbounded);
        assert_eq!(scf.objective_value, 0.0);
        assert_eq!(scf.primal.as_ref().unwrap()[0], 0.0);
    }

    #[test]
    fn test_iteration_limit_is_numerical_failure() {
        let mut scf = covering_form();
        let settings = SolverSettings::default().with_max_iterations(1);
        let err = solve(&mut scf, &settings).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericalFailure);
    }

    #[test]
    fn test_cancelled_solve_returns_early() {
        let mut scf = covering_form();
        let cancel = CancelToken::new();
        cancel.cancel();
        let settings = SolverSettings::default().with_cancel(cancel);

        assert!(solve(&mut scf, &settings).is_err());
        assert_eq!(scf.status, SolveStatus::NotSolved);
    }

    #[test]
    fn test_solution_satisfies_constraints() {
        // min -6x1 + 7x2 + 4x3 with mixed row types, after standardization:
        //   2x1 + 5x2 -  x3 + s4        = 18
        //  -x1  +  x2 + 2x3      - s5   = 14
        //   3x1 + 2x2 + 2x3            = 26
        let mut scf = StandardForm {
            objective: DVector::from_vec(vec![-6.0, 7.0, 4.0, 0.0, 0.0]),
            constraints: DMatrix::from_row_slice(
                3,
                5,
                &[
                    2.0, 5.0, -1.0, 1.0, 0.0, //
                    -1.0, 1.0, 2.0, 0.0, -1.0, //
                    3.0, 2.0, 2.0, 0.0, 0.0,
                ],
            ),
            rhs: DVector::from_vec(vec![18.0, 14.0, 26.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, false, false, true, true],
            num_primals: 3,
            is_maximization: false,
        };
        let settings = SolverSettings::default();
        solve(&mut scf, &settings).unwrap();

        assert_eq!(scf.status, SolveStatus::Optimal);
        assert!((scf.objective_value - 16.0).abs() < 1e-6);

        // A x* = b within 10x tolerance, x* >= -tolerance.
        let primal = scf.primal.as_ref().unwrap();
        let residual = &scf.constraints * primal - &scf.rhs;
        assert!(residual.amax() < 10.0 * settings.tolerance);
        assert!(primal.iter().all(|&v| v >= -settings.tolerance));

        // Reported objective matches c'x*.
        let recomputed = scf.objective.dot(primal);
        assert!((recomputed - scf.objective_value).abs() < 10.0 * settings.tolerance);
    }

    #[test]
    fn test_clear_artificials_swaps_zero_valued() {
        // Position 1 holds artificial 3 (n = 2) at value zero; the first
        // non-basic original column, 1, takes its place.
        let mut indices = vec![0, 3];
        let x = DVector::from_vec(vec![2.0, 0.0, 0.0, 0.0]);
        assert!(clear_artificials(&mut indices, &x, 2));
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_clear_artificials_rejects_positive_artificial() {
        let mut indices = vec![0, 3];
        let x = DVector::from_vec(vec![2.0, 0.0, 0.0, 0.5]);
        assert!(!clear_artificials(&mut indices, &x, 2));
    }

    #[test]
    fn test_clear_artificials_needs_a_swap_target() {
        // n = 1 and the only original column is already basic.
        let mut indices = vec![0, 2];
        let x = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert!(!clear_artificials(&mut indices, &x, 1));
    }

    #[test]
    fn test_positive_scaling_of_costs() {
        let mut base = covering_form();
        solve(&mut base, &SolverSettings::default()).unwrap();

        let mut scaled = covering_form();
        scaled.objective *= 3.0;
        solve(&mut scaled, &SolverSettings::default()).unwrap();

        assert!((scaled.objective_value - 3.0 * base.objective_value).abs() < 1e-9);
    }
}
