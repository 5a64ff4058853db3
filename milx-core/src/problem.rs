//! Modeling layer: variables, expressions, and the [`LinearProgram`] builder.
//!
//! The builder standardizes the model as constraints are added: every
//! inequality gets exactly one slack (`<=`, coefficient +1) or surplus
//! (`>=`, coefficient -1) column, and rows with a negative right-hand side
//! are negated with their sense flipped. The solver core therefore always
//! sees an equality system with a nonnegative right-hand side.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// Constraint comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less-than-or-equal.
    Le,
    /// Greater-than-or-equal.
    Ge,
    /// Equality.
    Eq,
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "==",
        })
    }
}

/// Variable domain category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarCategory {
    /// Real-valued variable.
    #[default]
    Continuous,
    /// Integer-valued variable.
    Integer,
}

/// A named decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name, unique within a program.
    pub name: String,

    /// Domain category.
    pub category: VarCategory,

    /// Whether this column was introduced by standardization.
    pub is_slack: bool,
}

impl Variable {
    /// A continuous decision variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: VarCategory::Continuous,
            is_slack: false,
        }
    }

    /// An integer decision variable.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: VarCategory::Integer,
            is_slack: false,
        }
    }
}

/// A coefficient applied to a variable.
#[derive(Debug, Clone)]
pub struct Term {
    /// Scalar coefficient.
    pub coefficient: f64,

    /// The variable this term scales.
    pub variable: Variable,
}

impl Term {
    /// Build a term from a coefficient and a variable.
    pub fn new(coefficient: f64, variable: &Variable) -> Self {
        Self {
            coefficient,
            variable: variable.clone(),
        }
    }
}

/// A linear combination of terms.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    /// The terms of the sum.
    pub terms: Vec<Term>,
}

impl Expression {
    /// Build an expression from its terms.
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

/// A linear program under construction.
///
/// Matrices are stored in the solver's minimization form: a maximization
/// objective is negated on ingest and `objective_is_negated` records the
/// flip so downstream conversion does not negate a second time.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    /// Free-form description of the model.
    pub description: String,

    /// All columns, decision variables first, slacks appended in
    /// constraint order.
    pub variables: Vec<Variable>,

    /// Optimization direction of the original model.
    pub sense: Sense,

    /// Objective coefficients, one per column. `None` until
    /// [`add_objective`](Self::add_objective) runs.
    pub objective: Option<DVector<f64>>,

    /// Constraint rows, one column per variable.
    pub constraints: Option<DMatrix<f64>>,

    /// Right-hand sides, aligned with the constraint rows.
    pub rhs: Option<DVector<f64>>,

    /// Comparison operator of each row as entered (after any
    /// negative-RHS flip).
    pub constraint_ops: Vec<ConstraintOp>,

    /// Optional starting primal estimate, carried through to the solver.
    pub primal: Option<DVector<f64>>,

    objective_negated: bool,
}

impl LinearProgram {
    /// Create an empty program over the given decision variables.
    pub fn new(description: impl Into<String>, variables: Vec<Variable>) -> Self {
        Self {
            description: description.into(),
            variables,
            sense: Sense::Minimize,
            objective: None,
            constraints: None,
            rhs: None,
            constraint_ops: Vec::new(),
            primal: None,
            objective_negated: false,
        }
    }

    /// Whether the stored objective has already been negated to encode a
    /// maximization in minimization form.
    pub fn objective_is_negated(&self) -> bool {
        self.objective_negated
    }

    /// Whether any decision variable is integer-valued.
    pub fn has_integer_vars(&self) -> bool {
        self.variables
            .iter()
            .any(|v| !v.is_slack && v.category == VarCategory::Integer)
    }

    fn variable_index(&self, name: &str) -> Result<usize, SolverError> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| {
                SolverError::invalid_input(format!("variable not found in program: {name}"))
            })
    }

    /// Set the objective function.
    ///
    /// A maximization objective is stored negated; the flip is recorded so
    /// the solver conversion does not negate again.
    pub fn add_objective(&mut self, sense: Sense, expr: Expression) -> Result<(), SolverError> {
        self.sense = sense;

        let mut objective = DVector::zeros(self.variables.len());
        for term in &expr.terms {
            let index = self.variable_index(&term.variable.name)?;
            let mut coefficient = term.coefficient;
            if sense == Sense::Maximize {
                coefficient = -coefficient;
                self.objective_negated = true;
            }
            objective[index] = coefficient;
        }

        self.objective = Some(objective);
        Ok(())
    }

    /// Add a constraint row.
    ///
    /// A negative right-hand side is normalized away by negating the row and
    /// flipping the comparison. Inequalities then receive one slack or
    /// surplus column with a zero objective coefficient.
    pub fn add_constraint(
        &mut self,
        expr: Expression,
        mut op: ConstraintOp,
        mut rhs: f64,
    ) -> Result<(), SolverError> {
        let Some(objective) = self.objective.as_ref() else {
            return Err(SolverError::invalid_input(
                "objective must be defined before adding constraints",
            ));
        };
        let width = objective.len();

        let flipped = rhs < 0.0;
        if flipped {
            rhs = -rhs;
            op = match op {
                ConstraintOp::Le => ConstraintOp::Ge,
                ConstraintOp::Ge => ConstraintOp::Le,
                ConstraintOp::Eq => ConstraintOp::Eq,
            };
        }

        let mut row = DVector::zeros(width);
        for term in &expr.terms {
            let index = self.variable_index(&term.variable.name)?;
            row[index] = if flipped {
                -term.coefficient
            } else {
                term.coefficient
            };
        }

        let constraints = match self.constraints.take() {
            None => {
                let mut first = DMatrix::zeros(1, width);
                first.row_mut(0).copy_from(&row.transpose());
                first
            }
            Some(existing) => {
                let m = existing.nrows();
                let mut grown = existing.insert_row(m, 0.0);
                for j in 0..width {
                    grown[(m, j)] = row[j];
                }
                grown
            }
        };
        let current_row = constraints.nrows() - 1;
        self.constraints = Some(constraints);

        self.rhs = Some(match self.rhs.take() {
            None => DVector::from_vec(vec![rhs]),
            Some(existing) => {
                let len = existing.len();
                existing.insert_row(len, rhs)
            }
        });
        self.constraint_ops.push(op);

        if op != ConstraintOp::Eq {
            self.push_slack_column(op, current_row);
        }

        Ok(())
    }

    /// Append a slack (`<=`) or surplus (`>=`) column for the given row.
    fn push_slack_column(&mut self, op: ConstraintOp, row: usize) {
        self.variables.push(Variable {
            name: format!("s{}", self.variables.len() + 1),
            category: VarCategory::Continuous,
            is_slack: true,
        });

        if let Some(objective) = self.objective.take() {
            let len = objective.len();
            self.objective = Some(objective.insert_row(len, 0.0));
        }

        if let Some(constraints) = self.constraints.take() {
            let cols = constraints.ncols();
            let mut grown = constraints.insert_column(cols, 0.0);
            grown[(row, cols)] = match op {
                ConstraintOp::Le => 1.0,
                _ => -1.0,
            };
            self.constraints = Some(grown);
        }
    }

    /// Coefficient of variable `j` in the original objective sense.
    fn display_coefficient(&self, value: f64) -> f64 {
        if self.objective_negated {
            -value
        } else {
            value
        }
    }
}

fn write_terms(
    f: &mut fmt::Formatter<'_>,
    terms: impl Iterator<Item = (f64, String)>,
) -> fmt::Result {
    let mut first = true;
    for (coefficient, name) in terms {
        if first {
            if coefficient < 0.0 {
                write!(f, "-{:.2} * {}", -coefficient, name)?;
            } else {
                write!(f, "{coefficient:.2} * {name}")?;
            }
            first = false;
        } else if coefficient < 0.0 {
            write!(f, " - {:.2} * {}", -coefficient, name)?;
        } else {
            write!(f, " + {coefficient:.2} * {name}")?;
        }
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;

        let label = match self.sense {
            Sense::Minimize => "Minimize",
            Sense::Maximize => "Maximize",
        };
        write!(f, "{label}: ")?;
        if let Some(objective) = &self.objective {
            write_terms(
                f,
                self.variables
                    .iter()
                    .enumerate()
                    .filter(|(j, v)| !v.is_slack && objective[*j] != 0.0)
                    .map(|(j, v)| (self.display_coefficient(objective[j]), v.name.clone())),
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Subject to:")?;
        if let (Some(constraints), Some(rhs)) = (&self.constraints, &self.rhs) {
            for i in 0..constraints.nrows() {
                write!(f, "  C{}: ", i + 1)?;
                write_terms(
                    f,
                    self.variables
                        .iter()
                        .enumerate()
                        .filter(|(j, v)| !v.is_slack && constraints[(i, *j)] != 0.0)
                        .map(|(j, v)| (constraints[(i, j)], v.name.clone())),
                )?;
                writeln!(f, " {} {:.3}", self.constraint_ops[i], rhs[i])?;
            }
        }
        Ok(())
    }
}
