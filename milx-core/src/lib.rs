//! milx-core: dense linear programming kernel.
//!
//! This crate holds the pieces shared by every solve path:
//!
//! - a modeling layer ([`LinearProgram`]) that standardizes constraints as
//!   they are added,
//! - the equality standard form ([`StandardForm`]) the engine operates on,
//! - a two-phase revised simplex engine ([`simplex::solve`]),
//! - settings, cancellation, and the error taxonomy.
//!
//! Integer programs are handled one level up, in `milx-mip`, which drives
//! this engine once per branch-and-bound node.
//!
//! # Example
//!
//! ```
//! use milx_core::{
//!     simplex, ConstraintOp, Expression, LinearProgram, Sense, SolveStatus, SolverSettings,
//!     StandardForm, Term, Variable,
//! };
//!
//! // min x + y  s.t.  x + y >= 4
//! let vars = vec![Variable::new("x"), Variable::new("y")];
//! let mut program = LinearProgram::new("covering", vars.clone());
//! program
//!     .add_objective(
//!         Sense::Minimize,
//!         Expression::new(vec![Term::new(1.0, &vars[0]), Term::new(1.0, &vars[1])]),
//!     )
//!     .unwrap();
//! program
//!     .add_constraint(
//!         Expression::new(vec![Term::new(1.0, &vars[0]), Term::new(1.0, &vars[1])]),
//!         ConstraintOp::Ge,
//!         4.0,
//!     )
//!     .unwrap();
//!
//! let mut scf = StandardForm::from_program(&program).unwrap();
//! simplex::solve(&mut scf, &SolverSettings::default()).unwrap();
//! assert_eq!(scf.status, SolveStatus::Optimal);
//! assert!((scf.objective_value - 4.0).abs() < 1e-9);
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod problem;
pub mod settings;
pub mod simplex;
pub mod standard_form;

pub use error::{ErrorKind, SolverError};
pub use problem::{ConstraintOp, Expression, LinearProgram, Sense, Term, VarCategory, Variable};
pub use settings::{CancelToken, SolverSettings};
pub use standard_form::{BranchDirection, SolveStatus, StandardForm};
