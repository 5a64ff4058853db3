//! Entering and leaving variable selection.

use nalgebra::{DMatrix, DVector};

/// Which simplex phase the loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    One,
    Two,
}

/// An entering column chosen by pricing.
pub(super) struct Entering {
    /// Tableau column index.
    pub index: usize,

    /// The column itself, `A_{.,s}`.
    pub column: DVector<f64>,

    /// Objective cost of the column.
    pub cost: f64,
}

/// Dantzig pricing: the non-basic column with the most negative reduced
/// cost, lowest index on ties. Returns `None` when every reduced cost is at
/// least `-tolerance`, i.e. the current basis is optimal.
pub(super) fn select_entering(
    tableau: &DMatrix<f64>,
    costs: &DVector<f64>,
    duals: &DVector<f64>,
    is_basic: &[bool],
    width: usize,
    tolerance: f64,
) -> Option<Entering> {
    let mut best: Option<(usize, f64)> = None;
    for j in 0..width {
        if is_basic[j] {
            continue;
        }
        let reduced_cost = costs[j] - duals.dot(&tableau.column(j));
        if best.map_or(true, |(_, current)| reduced_cost < current) {
            best = Some((j, reduced_cost));
        }
    }

    match best {
        Some((j, reduced_cost)) if reduced_cost < -tolerance => Some(Entering {
            index: j,
            column: tableau.column(j).into_owned(),
            cost: costs[j],
        }),
        _ => None,
    }
}

/// Ratio test: the basic row that leaves when the entering column comes in,
/// or `None` when no direction component is positive (unbounded ray).
///
/// In phase two a basic artificial (index at or beyond `width`) with a
/// non-zero direction component leaves immediately, forcing it out of the
/// basis ahead of any ratio comparison.
pub(super) fn select_leaving(
    direction: &DVector<f64>,
    basic_solution: &DVector<f64>,
    basic_indices: &[usize],
    phase: Phase,
    width: usize,
) -> Option<usize> {
    if phase == Phase::Two {
        for (row, &index) in basic_indices.iter().enumerate() {
            if index >= width && direction[row] != 0.0 {
                return Some(row);
            }
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for row in 0..direction.len() {
        if direction[row] > 0.0 {
            let ratio = basic_solution[row] / direction[row];
            if best.map_or(true, |(_, current)| ratio < current) {
                best = Some((row, ratio));
            }
        }
    }
    best.map(|(row, _)| row)
}
