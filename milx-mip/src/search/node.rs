//! Branch-and-bound node.

use milx_core::{BranchDirection, StandardForm};

/// A node of the search tree.
///
/// Each node owns its standard form outright: branching clones the parent's
/// form and appends one bound row, so siblings and ancestors never share
/// mutable state and can be solved on different threads.
#[derive(Debug, Clone)]
pub struct Node {
    /// The node's relaxation, solved in place.
    pub scf: StandardForm,

    /// Depth in the tree; the root is at zero.
    pub depth: usize,

    /// Whether the solved relaxation was integer-feasible.
    pub is_integer: bool,
}

impl Node {
    /// A root node over the given form.
    pub fn new(scf: StandardForm) -> Self {
        Self {
            scf,
            depth: 0,
            is_integer: false,
        }
    }

    /// A child with one extra branching bound. The caller assigns the
    /// child's depth when it schedules the work.
    pub fn branch_child(&self, var: usize, bound: f64, direction: BranchDirection) -> Self {
        let mut scf = self.scf.clone();
        scf.add_branch(var, bound, direction);
        Self {
            scf,
            depth: self.depth,
            is_integer: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milx_core::SolveStatus;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn test_branch_child_leaves_parent_untouched() {
        let parent = Node::new(StandardForm {
            objective: DVector::zeros(2),
            constraints: DMatrix::from_row_slice(1, 2, &[1.0, 1.0]),
            rhs: DVector::from_vec(vec![4.0]),
            primal: None,
            objective_value: 0.0,
            status: SolveStatus::NotSolved,
            slack_mask: vec![false, false],
            num_primals: 2,
            is_maximization: false,
        });

        let child = parent.branch_child(0, 2.0, BranchDirection::Down);
        assert_eq!(parent.scf.num_constraints(), 1);
        assert_eq!(child.scf.num_constraints(), 2);
        assert_eq!(child.scf.constraints[(1, 0)], 1.0);
        assert_eq!(child.scf.rhs[1], 2.0);
    }
}
