//! Branch-and-bound search: nodes, branching strategies, and the tree
//! driver.

mod branching;
mod node;
mod tree;

pub use branching::{
    first_fractional, no_cuts, no_heuristic, BranchHook, CutHook, CutRow, HeuristicHook, Hint,
};
pub use node::Node;
pub use tree::{branch_and_bound, is_integer_feasible};
