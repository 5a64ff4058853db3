//! milx-mip: mixed-integer layer and solve entry point.
//!
//! [`solve`] takes a fully built [`LinearProgram`](milx_core::LinearProgram)
//! and dispatches on integrality: a purely continuous model goes straight to
//! the simplex engine, while a model with integer variables is wrapped in an
//! [`IntegerProgram`] and solved by parallel branch-and-bound, one simplex
//! relaxation per tree node.
//!
//! Reported results are always in the original problem sense: maximization
//! objectives are flipped back at this boundary, integer solutions are
//! rounded, and near-zero components are reported as exact zeros.
//!
//! # Example
//!
//! ```no_run
//! use milx_core::{ConstraintOp, Expression, LinearProgram, Sense, Term, Variable};
//! use milx_mip::{solve, SolveOptions};
//!
//! let vars = vec![Variable::integer("x")];
//! let mut program = LinearProgram::new("tiny", vars.clone());
//! program
//!     .add_objective(Sense::Maximize, Expression::new(vec![Term::new(1.0, &vars[0])]))
//!     .unwrap();
//! program
//!     .add_constraint(
//!         Expression::new(vec![Term::new(1.0, &vars[0])]),
//!         ConstraintOp::Le,
//!         7.5,
//!     )
//!     .unwrap();
//!
//! let solution = solve(&program, &SolveOptions::default()).unwrap();
//! assert_eq!(solution.objective_value, 7.0);
//! ```

#![warn(clippy::all)]

pub mod program;
pub mod search;
pub mod settings;
pub mod workers;

use nalgebra::DVector;

use milx_core::{simplex, ErrorKind, LinearProgram, SolveStatus, SolverError, StandardForm};

pub use program::{Incumbent, IntegerProgram};
pub use settings::SolveOptions;

/// Result of a solve, in the original problem sense.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Optimal objective value. For an integer program with no feasible
    /// point this is the seed infinity and the status says so.
    pub objective_value: f64,

    /// Primal values of the decision variables (slacks excluded). Integer
    /// programs report rounded components.
    pub primal: DVector<f64>,

    /// Final solve status.
    pub status: SolveStatus,
}

/// Solve a linear program, continuous or mixed-integer.
///
/// Options are validated first; a cancelled token returns before any work
/// starts. The program itself is not mutated.
pub fn solve(program: &LinearProgram, options: &SolveOptions) -> Result<Solution, SolverError> {
    options.validate()?;
    if options.solver.cancel.is_cancelled() {
        return Err(SolverError::new(ErrorKind::Unknown, "solve cancelled"));
    }

    let scf = StandardForm::from_program(program)?;
    let tolerance = options.solver.tolerance;

    if program.has_integer_vars() {
        workers::configure(options.threads);

        let mut ip = IntegerProgram::new(scf);
        ip.branch = options.branch.clone();
        ip.heuristic = options.heuristic.clone();
        ip.cut = options.cut.clone();

        search::branch_and_bound(&mut ip, options).map_err(|err| {
            SolverError::with_source(ErrorKind::Unknown, "integer solve failed", err)
        })?;

        let incumbent = ip.incumbent();
        let mut primal = DVector::zeros(ip.scf.num_primals);
        if let Some(best) = incumbent.solution.as_ref() {
            for i in 0..ip.scf.num_primals {
                let value = best[i];
                if value.abs() < tolerance {
                    continue;
                }
                primal[i] = value.round();
            }
        }

        return Ok(Solution {
            objective_value: incumbent.objective,
            primal,
            status: ip.scf.status,
        });
    }

    let mut scf = scf;
    simplex::solve(&mut scf, &options.solver)
        .map_err(|err| SolverError::with_source(ErrorKind::Unknown, "simplex failed", err))?;

    let objective_value = if scf.is_maximization {
        -scf.objective_value
    } else {
        scf.objective_value
    };

    let mut primal = DVector::zeros(scf.num_primals);
    if let Some(x) = scf.primal.as_ref() {
        for i in 0..scf.num_primals {
            let value = x[i];
            if value.abs() < tolerance {
                continue;
            }
            primal[i] = value;
        }
    }

    Ok(Solution {
        objective_value,
        primal,
        status: scf.status,
    })
}
