//! Conway's Game of Life engine.
//!
//! `Grid` is an immutable field of cells; `step_generation` computes the next
//! one. `Simulation` holds the shared state a driver works with and runs the
//! automatic step loop on a tokio runtime.
//!
//! ```
//! use conway_engine::{Grid, step_generation};
//!
//! let blinker = Grid::with_live_cells(5, 5, &[(1, 0), (1, 1), (1, 2)]).unwrap();
//! let next = step_generation(&blinker);
//! assert!(next.is_alive(0, 1).unwrap());
//! assert_eq!(step_generation(&next), blinker);
//! ```

mod error;      // Error types
mod grid;       // Grid model
mod params;     // Presets, speeds and parameters
mod rules;      // Neighbor counting and transition
mod simulation; // Shared state and step loop

pub use error::{GridError, Result};
pub use grid::{DEFAULT_ALIVE_PROBABILITY, Grid};
pub use params::{SimulationConfig, SimulationParameters, SizePreset, Speed};
pub use rules::{NEIGHBOR_OFFSETS, count_live_neighbors, next_cell_state, next_row, step_generation};
pub use simulation::{GenerationReport, MIN_STEP_DELAY, Simulation};
