// params.rs - Size presets, speed settings and simulation parameters

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::GridError;
use crate::grid::DEFAULT_ALIVE_PROBABILITY;

/// Selectable grid sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizePreset {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizePreset {
    pub const ALL: [SizePreset; 3] = [SizePreset::Small, SizePreset::Medium, SizePreset::Large];

    pub fn dimensions(self) -> (usize, usize) {
        match self {
            SizePreset::Small => (25, 25),
            SizePreset::Medium => (35, 35),
            SizePreset::Large => (45, 45),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizePreset::Small => "25x25",
            SizePreset::Medium => "35x35",
            SizePreset::Large => "45x45",
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizePreset {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizePreset::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownPreset(s.to_string()))
    }
}

/// Selectable delays between automatic generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Speed::Slow => 1000,
            Speed::Normal => 500,
            Speed::Fast => 100,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }

    /// The setting whose delay matches exactly, if any.
    pub fn from_delay(delay: Duration) -> Option<Speed> {
        Speed::ALL.into_iter().find(|speed| speed.delay() == delay)
    }
}

/// Starting configuration of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub preset: SizePreset,
    pub speed: Speed,
    pub alive_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            preset: SizePreset::default(),
            speed: Speed::default(),
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
        }
    }
}

/// Point-in-time view of the values that govern the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParameters {
    pub rows: usize,
    pub cols: usize,
    pub step_delay: Duration,
    pub running: bool,
    pub generation: u64,
}
