// ui.rs - Controls and grid drawing for the desktop driver

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use conway_engine::{SizePreset, Speed};

use crate::GameOfLife;

const BOX_SIZE: f32 = 18.0;
const SPACING: f32 = 1.0;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let mut selected = self.selected_size;
                egui::ComboBox::from_id_source("size_selector")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for preset in SizePreset::ALL {
                            ui.selectable_value(&mut selected, preset, preset.label());
                        }
                    });
                if selected != self.selected_size {
                    self.select_size(selected);
                }

                let button_text = if self.simulation.is_running() { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_running(ctx);
                }

                if ui.button("⏭ Next").clicked() {
                    self.simulation.step_once();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.simulation.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                ui.separator();

                let current = Speed::from_delay(self.simulation.delay());
                for speed in Speed::ALL {
                    if ui.selectable_label(current == Some(speed), speed.label()).clicked() {
                        self.simulation.set_speed(speed);
                    }
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.simulation.generation()));
            });

            ui.horizontal(|ui| {
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            // One snapshot per frame; the loop may publish a newer grid meanwhile
            let grid = self.simulation.grid();
            let (rows, cols) = grid.dimensions();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (BOX_SIZE + SPACING) * cols as f32 - SPACING,
                (BOX_SIZE + SPACING) * rows as f32 - SPACING,
            );
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (row, cells) in grid.rows_iter().enumerate() {
                for (col, &alive) in cells.iter().enumerate() {
                    let x = start_pos.x + col as f32 * (BOX_SIZE + SPACING);
                    let y = start_pos.y + row as f32 * (BOX_SIZE + SPACING);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(BOX_SIZE));

                    let cell_color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - start_pos;
                    let row = (offset.y / (BOX_SIZE + SPACING)) as usize;
                    let col = (offset.x / (BOX_SIZE + SPACING)) as usize;
                    self.toggle_cell(row, col);
                }
            }

            ui.separator();

            let live_cells = grid.population();
            let total = rows * cols;
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });
    }
}
