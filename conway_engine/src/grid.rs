// grid.rs - Grid types for Conway's Game of Life

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::error::{GridError, Result};

/// Chance that a cell starts alive in a randomized grid.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.2;

/// Immutable `rows x cols` field of cells, stored row-major.
///
/// Clones share the same cell buffer. Every transformation (toggle, step,
/// randomize, clear) builds a new buffer, so a `Grid` held elsewhere never
/// changes underneath its owner.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Arc<[bool]>,
}

impl Grid {
    /// All-dead grid of the given size.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; len].into(),
        })
    }

    /// Each cell is independently alive with probability `alive_probability`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(GridError::InvalidProbability(alive_probability));
        }
        let cells: Vec<bool> = (0..len)
            .map(|_| rng.gen_bool(alive_probability))
            .collect();
        Ok(Self {
            rows,
            cols,
            cells: cells.into(),
        })
    }

    /// Grid with exactly the listed `(row, col)` cells alive.
    pub fn with_live_cells(rows: usize, cols: usize, live: &[(usize, usize)]) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        let mut cells = vec![false; len];
        for &(row, col) in live {
            if row >= rows || col >= cols {
                return Err(GridError::IndexOutOfRange { row, col, rows, cols });
            }
            cells[row * cols + col] = true;
        }
        Ok(Self {
            rows,
            cols,
            cells: cells.into(),
        })
    }

    /// Builds a grid from rows already computed elsewhere. Callers guarantee
    /// every row is `cols` wide.
    pub(crate) fn from_rows(rows: usize, cols: usize, data: Vec<Vec<bool>>) -> Self {
        debug_assert_eq!(data.len(), rows);
        debug_assert!(data.iter().all(|row| row.len() == cols));
        let cells: Vec<bool> = data.into_iter().flatten().collect();
        Self {
            rows,
            cols,
            cells: cells.into(),
        }
    }

    /// Copy of this grid with the cell at `(row, col)` flipped.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self> {
        let index = self.index(row, col)?;
        let mut cells = self.cells.to_vec();
        cells[index] = !cells[index];
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: cells.into(),
        })
    }

    /// All-dead grid with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; self.cells.len()].into(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool> {
        self.index(row, col).map(|index| self.cells[index])
    }

    /// Cell value as 0 (dead) or 1 (alive).
    pub fn value(&self, row: usize, col: usize) -> Result<u8> {
        self.is_alive(row, col).map(u8::from)
    }

    /// Unchecked read used by the neighbor counter, which bounds-checks first.
    pub(crate) fn alive_at(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Iterates rows top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// Cell count for a `rows x cols` grid, rejecting empty and overflowing sizes.
fn check_dimensions(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(len) if len > 0 => Ok(len),
        _ => Err(GridError::InvalidDimensions { rows, cols }),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.dimensions(), (3, 4));
        assert!(grid.is_empty());
        assert_eq!(grid.rows_iter().count(), 3);
        assert!(grid.rows_iter().all(|row| row.len() == 4));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimensions { rows: 5, cols: 0 })
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(0, 0, 0.5, &mut rng),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions { rows: usize::MAX, cols: 2 })
        );
        assert!(matches!(
            Grid::with_live_cells(2, usize::MAX, &[]),
            Err(GridError::InvalidDimensions { .. })
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(usize::MAX / 2 + 1, 2, 0.5, &mut rng),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn toggle_flips_only_the_target_and_leaves_original_alone() {
        let grid = Grid::new(4, 4).unwrap();
        let toggled = grid.toggled(1, 2).unwrap();

        assert!(toggled.is_alive(1, 2).unwrap());
        assert_eq!(toggled.population(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn toggle_twice_restores_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(6, 5, 0.5, &mut rng).unwrap();
        for row in 0..6 {
            for col in 0..5 {
                let back = grid.toggled(row, col).unwrap().toggled(row, col).unwrap();
                assert_eq!(back, grid);
            }
        }
    }

    #[test]
    fn toggle_out_of_range_fails() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.toggled(3, 0),
            Err(GridError::IndexOutOfRange { row: 3, col: 0, rows: 3, cols: 3 })
        );
        assert!(grid.toggled(0, 3).is_err());
        assert!(grid.value(9, 9).is_err());
    }

    #[test]
    fn random_respects_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(Grid::random(10, 10, 0.0, &mut rng).unwrap().is_empty());
        assert_eq!(Grid::random(10, 10, 1.0, &mut rng).unwrap().population(), 100);
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let a = Grid::random(25, 25, DEFAULT_ALIVE_PROBABILITY, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Grid::random(25, 25, DEFAULT_ALIVE_PROBABILITY, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);

        // 625 cells at 20% should land well away from the extremes
        let population = a.population();
        assert!(population > 60 && population < 200, "population {population}");
    }

    #[test]
    fn random_rejects_bad_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Grid::random(2, 2, 1.5, &mut rng),
            Err(GridError::InvalidProbability(1.5))
        );
        assert!(Grid::random(2, 2, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn live_cells_and_values() {
        let grid = Grid::with_live_cells(2, 3, &[(0, 0), (1, 2)]).unwrap();
        assert_eq!(grid.value(0, 0).unwrap(), 1);
        assert_eq!(grid.value(0, 1).unwrap(), 0);
        assert_eq!(grid.value(1, 2).unwrap(), 1);
        assert_eq!(grid.to_string(), "#..\n..#\n");

        assert!(matches!(
            Grid::with_live_cells(2, 3, &[(2, 0)]),
            Err(GridError::IndexOutOfRange { .. })
        ));
    }
}
