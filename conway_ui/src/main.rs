// main.rs - Desktop driver for the Conway engine
// Owns the simulation and the tokio runtime its step loop runs on; ui.rs draws it.

use eframe::egui;
use egui::Color32;

use conway_engine::{SimulationConfig, Simulation, SizePreset};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let runtime = tokio::runtime::Runtime::new()?;
    let simulation = Simulation::new(SimulationConfig::default())?;
    log::info!("starting with a {} grid", SizePreset::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 1050.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(runtime, simulation))),
    )?;
    Ok(())
}

pub struct GameOfLife {
    simulation       : Simulation,
    runtime          : tokio::runtime::Runtime,
    pub selected_size: SizePreset,
    pub live_color   : Color32,
    pub dead_color   : Color32,
}

impl GameOfLife {
    fn new(runtime: tokio::runtime::Runtime, simulation: Simulation) -> Self {
        Self {
            simulation,
            runtime,
            selected_size: SizePreset::default(),
            live_color: Color32::from_rgb(0x86, 0xaf, 0x49),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }

    /// Start/Stop button. The loop asks for a repaint after every generation.
    fn toggle_running(&mut self, ctx: &egui::Context) {
        if self.simulation.is_running() {
            self.simulation.stop_loop();
        } else {
            let ctx = ctx.clone();
            self.simulation
                .start_loop(self.runtime.handle(), move |_| ctx.request_repaint());
        }
    }

    fn select_size(&mut self, preset: SizePreset) {
        self.selected_size = preset;
        if let Err(err) = self.simulation.apply_preset(preset) {
            log::error!("could not resize grid: {err}");
        }
    }

    fn randomize(&mut self) {
        if let Err(err) = self.simulation.randomize() {
            log::error!("could not randomize grid: {err}");
        }
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        if let Err(err) = self.simulation.toggle_cell(row, col) {
            log::warn!("ignoring click: {err}");
        }
    }
}

impl Drop for GameOfLife {
    fn drop(&mut self) {
        self.simulation.stop_loop();
    }
}
