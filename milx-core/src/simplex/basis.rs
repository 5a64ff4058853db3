//! Basis bookkeeping for the revised simplex loop.

use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;

/// The current basis: column indices into the working tableau, the dense
/// m-by-m basis matrix those columns form, and their objective costs.
pub(super) struct Basis {
    /// Basis matrix `B`.
    pub matrix: DMatrix<f64>,

    /// Tableau column index held at each basic position.
    pub indices: Vec<usize>,

    /// Objective cost of each basic column.
    pub costs: DVector<f64>,
}

impl Basis {
    /// Assemble a basis from the given tableau columns.
    pub fn from_indices(tableau: &DMatrix<f64>, costs: &DVector<f64>, indices: Vec<usize>) -> Self {
        let m = tableau.nrows();
        let mut matrix = DMatrix::zeros(m, m);
        for (position, &column) in indices.iter().enumerate() {
            matrix.set_column(position, &tableau.column(column));
        }
        let costs = DVector::from_iterator(indices.len(), indices.iter().map(|&j| costs[j]));
        Self {
            matrix,
            indices,
            costs,
        }
    }

    /// Solve `B x = rhs`.
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, SolverError> {
        self.matrix
            .clone()
            .lu()
            .solve(rhs)
            .ok_or_else(|| SolverError::numerical("singular basis while solving B x = b"))
    }

    /// Solve `B' pi = c_B` for the dual variables.
    pub fn solve_duals(&self) -> Result<DVector<f64>, SolverError> {
        self.matrix
            .transpose()
            .lu()
            .solve(&self.costs)
            .ok_or_else(|| SolverError::numerical("singular basis while solving for duals"))
    }

    /// Replace basic position `row` with tableau column `entering`.
    pub fn replace(&mut self, row: usize, tableau: &DMatrix<f64>, entering: usize, cost: f64) {
        self.matrix.set_column(row, &tableau.column(entering));
        self.indices[row] = entering;
        self.costs[row] = cost;
    }
}
