// rules.rs - Neighbor counting and the generation transition

use crate::grid::Grid;

/// Moore neighborhood, visited in a fixed order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// Live neighbors of `(row, col)`. Offsets falling off the edge count as
/// dead; the grid does not wrap.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (rows, cols) = grid.dimensions();
    let mut count = 0;
    for &(dr, dc) in &NEIGHBOR_OFFSETS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if nr < rows && nc < cols && grid.alive_at(nr, nc) {
            count += 1;
        }
    }
    count
}

/// Applies the rule to one cell.
///
/// Under- and overpopulation kill unconditionally, which is a no-op for a
/// cell that is already dead. Exactly three neighbors bring a dead cell to
/// life. Everything else keeps its state.
pub fn next_cell_state(alive: bool, neighbors: u8) -> bool {
    if neighbors < 2 || neighbors > 3 {
        false
    } else if !alive && neighbors == 3 {
        true
    } else {
        alive
    }
}

/// Computes a single output row, reading only from `grid`.
pub fn next_row(grid: &Grid, row: usize) -> Vec<bool> {
    (0..grid.cols())
        .map(|col| {
            let neighbors = count_live_neighbors(grid, row, col);
            next_cell_state(grid.alive_at(row, col), neighbors)
        })
        .collect()
}

/// One generation of Conway's Game of Life.
///
/// Every count is taken against `grid` as it was on entry; results go into a
/// fresh buffer, so the input is never touched.
pub fn step_generation(grid: &Grid) -> Grid {
    let rows = (0..grid.rows()).map(|row| next_row(grid, row)).collect();
    Grid::from_rows(grid.rows(), grid.cols(), rows)
}

impl Grid {
    pub fn next_generation(&self) -> Grid {
        step_generation(self)
    }
}
