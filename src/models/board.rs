use crate::models::plot::{Plot, PlotSnapshot};
use crate::models::Matrix;

/// The fixed-size, row-major grid of plots. Identity is positional: plots are
/// mutated in place and never relocated.
#[derive(Debug)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    plots: Matrix<Plot>,
}

impl Board {
    /// A fresh board with every plot empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        let plots = (0..rows)
            .map(|_| (0..cols).map(|_| Plot::default()).collect())
            .collect();
        Self { rows, cols, plots }
    }

    pub fn plot(&self, row: usize, col: usize) -> Option<&Plot> {
        self.plots.get(row).and_then(|r| r.get(col))
    }

    pub fn plot_mut(&mut self, row: usize, col: usize) -> Option<&mut Plot> {
        self.plots.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// The serializable projection of the whole board, timer handles omitted.
    pub fn snapshot(&self) -> Matrix<PlotSnapshot> {
        self.plots
            .iter()
            .map(|row| row.iter().map(Plot::snapshot).collect())
            .collect()
    }

    /// Rebuilds a board from its persisted form. The caller has already
    /// checked the geometry; timers are re-armed separately.
    pub fn restore(cells: Matrix<PlotSnapshot>) -> Self {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        let plots = cells
            .into_iter()
            .map(|row| row.into_iter().map(Plot::restore).collect())
            .collect();
        Self { rows, cols, plots }
    }
}
