// simulation.rs - Shared simulation state and the self-rescheduling step loop

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{GridError, Result};
use crate::grid::{DEFAULT_ALIVE_PROBABILITY, Grid};
use crate::params::{SimulationConfig, SimulationParameters, SizePreset, Speed};
use crate::rules::step_generation;

/// Shortest delay accepted between automatic generations.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(1);

/// Handed to the loop callback after every computed generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generation: u64,
    pub population: usize,
    pub grid: Grid,
}

struct Shared {
    grid: Mutex<Grid>,
    running: AtomicBool,
    delay_ms: AtomicU64,
    generation: AtomicU64,
    // Bumped on every start and stop; a loop whose epoch is stale stops
    // rescheduling.
    chain: AtomicU64,
    alive_probability: f64,
}

/// Handle to one simulation instance.
///
/// Clones refer to the same state: the current grid, the running flag, the
/// step delay and the generation counter. The loop reads the flag and the
/// delay fresh on every tick, so changes made through any clone apply from
/// the next tick on.
#[derive(Clone)]
pub struct Simulation {
    shared: Arc<Shared>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&config.alive_probability) {
            return Err(GridError::InvalidProbability(config.alive_probability));
        }
        let (rows, cols) = config.preset.dimensions();
        let grid = Grid::new(rows, cols)?;
        Ok(Self::build(grid, config.speed.delay(), config.alive_probability))
    }

    /// Starts stopped at generation 0 with the given grid.
    pub fn with_grid(grid: Grid, delay: Duration) -> Self {
        Self::build(grid, delay, DEFAULT_ALIVE_PROBABILITY)
    }

    fn build(grid: Grid, delay: Duration, alive_probability: f64) -> Self {
        Self {
            shared: Arc::new(Shared {
                grid: Mutex::new(grid),
                running: AtomicBool::new(false),
                delay_ms: AtomicU64::new(delay_to_ms(delay)),
                generation: AtomicU64::new(0),
                chain: AtomicU64::new(0),
                alive_probability,
            }),
        }
    }

    fn lock_grid(&self) -> MutexGuard<'_, Grid> {
        // Grid swaps cannot leave a half-written value behind, so a poisoned
        // lock still guards a valid grid.
        self.shared.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current grid.
    pub fn grid(&self) -> Grid {
        self.lock_grid().clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.shared.delay_ms.load(Ordering::SeqCst))
    }

    pub fn set_delay(&self, delay: Duration) {
        let ms = delay_to_ms(delay);
        self.shared.delay_ms.store(ms, Ordering::SeqCst);
        debug!("step delay set to {ms}ms");
    }

    pub fn set_speed(&self, speed: Speed) {
        self.set_delay(speed.delay());
    }

    pub fn parameters(&self) -> SimulationParameters {
        let (rows, cols) = self.lock_grid().dimensions();
        SimulationParameters {
            rows,
            cols,
            step_delay: self.delay(),
            running: self.is_running(),
            generation: self.generation(),
        }
    }

    /// Computes and publishes one generation.
    ///
    /// The read, the swap and the counter increment happen under one lock, so
    /// a manual step racing the loop still advances exactly one generation
    /// each.
    fn advance(&self) -> GenerationReport {
        let mut current = self.lock_grid();
        let next = step_generation(&current);
        *current = next.clone();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        drop(current);

        let population = next.population();
        debug!("generation {generation}: {population} alive");
        GenerationReport {
            generation,
            population,
            grid: next,
        }
    }

    /// Single "Next" step. Ignores the running flag.
    pub fn step_once(&self) -> Grid {
        self.advance().grid
    }

    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<Grid> {
        let mut current = self.lock_grid();
        let next = current.toggled(row, col)?;
        *current = next.clone();
        Ok(next)
    }

    /// All cells dead and the generation count back to 0.
    pub fn clear(&self) -> Grid {
        let mut current = self.lock_grid();
        let next = current.cleared();
        *current = next.clone();
        self.shared.generation.store(0, Ordering::SeqCst);
        info!("grid cleared");
        next
    }

    /// Randomizes at the configured density.
    pub fn randomize(&self) -> Result<Grid> {
        self.randomize_with(self.shared.alive_probability, &mut rand::thread_rng())
    }

    pub fn randomize_with<R: Rng + ?Sized>(&self, alive_probability: f64, rng: &mut R) -> Result<Grid> {
        let mut current = self.lock_grid();
        let (rows, cols) = current.dimensions();
        let next = Grid::random(rows, cols, alive_probability, rng)?;
        *current = next.clone();
        Ok(next)
    }

    /// Replaces the grid with an all-dead one of the new size. The generation
    /// count is left alone; drivers that want a reset call `clear`.
    pub fn resize(&self, rows: usize, cols: usize) -> Result<Grid> {
        let next = Grid::new(rows, cols)?;
        *self.lock_grid() = next.clone();
        info!("grid resized to {rows}x{cols}");
        Ok(next)
    }

    pub fn apply_preset(&self, preset: SizePreset) -> Result<Grid> {
        let (rows, cols) = preset.dimensions();
        self.resize(rows, cols)
    }

    /// Starts the automatic loop on `runtime`.
    ///
    /// Returns `None` without spawning when the loop is already running, so at
    /// most one loop steps this simulation at a time. The first generation is
    /// computed as soon as the task runs; each later one follows after the
    /// delay current at the moment it is scheduled.
    pub fn start_loop<F>(&self, runtime: &Handle, on_generation: F) -> Option<JoinHandle<()>>
    where
        F: Fn(&GenerationReport) + Send + 'static,
    {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            warn!("start requested while already running, ignoring");
            return None;
        }
        let chain = self.shared.chain.fetch_add(1, Ordering::SeqCst) + 1;
        info!("simulation started (loop {chain}, {}ms delay)", self.delay().as_millis());
        Some(runtime.spawn(run_loop(self.clone(), chain, on_generation)))
    }

    /// Clears the running flag. A loop mid-delay notices on its next tick and
    /// ends without stepping. Returns whether the loop was running.
    pub fn stop_loop(&self) -> bool {
        let was_running = self.shared.running.swap(false, Ordering::SeqCst);
        if was_running {
            self.shared.chain.fetch_add(1, Ordering::SeqCst);
            info!("simulation stopped at generation {}", self.generation());
        }
        was_running
    }

    fn should_continue(&self, chain: u64) -> bool {
        self.shared.running.load(Ordering::SeqCst) && self.shared.chain.load(Ordering::SeqCst) == chain
    }
}

async fn run_loop<F>(simulation: Simulation, chain: u64, on_generation: F)
where
    F: Fn(&GenerationReport) + Send + 'static,
{
    while simulation.should_continue(chain) {
        let report = simulation.advance();
        on_generation(&report);
        tokio::time::sleep(simulation.delay()).await;
    }
    debug!("loop {chain} finished");
}

fn delay_to_ms(delay: Duration) -> u64 {
    let delay = delay.max(MIN_STEP_DELAY);
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
