//! Dense standard computational form shared by the simplex engine and the
//! branch-and-bound search.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;
use crate::problem::{LinearProgram, Sense};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStatus {
    /// No solve has completed yet.
    #[default]
    NotSolved,

    /// An optimal solution was found.
    Optimal,

    /// The problem admits no feasible point.
    Infeasible,

    /// The objective is unbounded over the feasible region.
    Unbounded,
}

impl SolveStatus {
    /// Whether this status carries a usable solution.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::NotSolved => "not solved",
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
        };
        f.write_str(name)
    }
}

/// Direction of a branching bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchDirection {
    /// Bound the variable above by the floor of its relaxation value.
    Down,

    /// Bound the variable below, encoded as `-x_i <= -v` so the right-hand
    /// side stays nonnegative.
    Up,
}

/// A minimization LP in equality standard form:
/// `min c'x  s.t.  A x = b, x >= 0`.
///
/// Slack and surplus columns have already been appended by the modeling
/// layer, and `b` is componentwise nonnegative. Maximization problems are
/// stored with a negated objective and `is_maximization` set, so callers can
/// flip reported values back to the original sense.
///
/// The struct owns all of its data; `clone` yields a fully independent copy,
/// which is what the branch-and-bound search relies on when it creates child
/// nodes.
#[derive(Debug, Clone)]
pub struct StandardForm {
    /// Objective cost vector `c`, minimization sense.
    pub objective: DVector<f64>,

    /// Constraint matrix `A`, including slack/surplus columns.
    pub constraints: DMatrix<f64>,

    /// Right-hand side `b`, componentwise nonnegative.
    pub rhs: DVector<f64>,

    /// Primal solution `x*`, populated on an optimal solve.
    pub primal: Option<DVector<f64>>,

    /// Objective value at `x*`, minimization sense.
    pub objective_value: f64,

    /// Solve outcome.
    pub status: SolveStatus,

    /// `true` for slack/surplus columns, `false` for decision variables.
    pub slack_mask: Vec<bool>,

    /// Number of decision (non-slack) variables.
    pub num_primals: usize,

    /// Whether the original problem was a maximization.
    pub is_maximization: bool,
}

impl StandardForm {
    /// Convert a fully built [`LinearProgram`] into standard form.
    ///
    /// The modeling layer has already appended slack columns and normalized
    /// the right-hand side, so this is mostly a copy: the objective is
    /// negated only when the program is a maximization whose stored
    /// objective has not been pre-negated.
    pub fn from_program(program: &LinearProgram) -> Result<Self, SolverError> {
        let Some(objective) = program.objective.as_ref() else {
            return Err(SolverError::invalid_input("program has no objective"));
        };
        let (Some(constraints), Some(rhs)) = (program.constraints.as_ref(), program.rhs.as_ref())
        else {
            return Err(SolverError::invalid_input("program has no constraints"));
        };

        let is_maximization = program.sense == Sense::Maximize;
        let mut objective = objective.clone();
        if is_maximization && !program.objective_is_negated() {
            objective.neg_mut();
        }

        let slack_mask: Vec<bool> = program.variables.iter().map(|v| v.is_slack).collect();
        let num_primals = slack_mask.iter().filter(|&&s| !s).count();

        Ok(Self {
            objective,
            constraints: constraints.clone(),
            rhs: rhs.clone(),
            primal: program.primal.clone(),
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask,
            num_primals,
            is_maximization,
        })
    }

    /// Number of constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.constraints.nrows()
    }

    /// Total number of columns, slacks included.
    pub fn num_variables(&self) -> usize {
        self.constraints.ncols()
    }

    /// Append one constraint row with the given coefficients and right-hand
    /// side. No slack column is introduced; the row joins the equality
    /// system as-is.
    pub fn append_row(&mut self, coefficients: &DVector<f64>, rhs: f64) {
        let m = self.constraints.nrows();
        let mut grown = self.constraints.clone().insert_row(m, 0.0);
        for j in 0..grown.ncols().min(coefficients.len()) {
            grown[(m, j)] = coefficients[j];
        }
        self.constraints = grown;
        self.rhs = self.rhs.clone().insert_row(m, rhs);
    }

    /// Append a branching bound on variable `var`.
    ///
    /// `Down` appends `+x_var` with right-hand side `bound`; `Up` appends
    /// `-x_var` with right-hand side `-bound`, keeping the nonnegative-RHS
    /// convention intact.
    pub fn add_branch(&mut self, var: usize, bound: f64, direction: BranchDirection) {
        let mut row = DVector::zeros(self.constraints.ncols());
        let (coefficient, rhs) = match direction {
            BranchDirection::Down => (1.0, bound),
            BranchDirection::Up => (-1.0, -bound),
        };
        row[var] = coefficient;
        self.append_row(&row, rhs);
    }
}
