// ui.rs - egui presentation shell

use eframe::egui;
use egui::{Color32, Rect, Sense, Vec2};
use std::sync::{Arc, Mutex};

use crate::driver::{DriverConfig, GameCore, TickReport, TickSink};
use crate::grid::Cell;
use crate::lifecycle::State;
use crate::patterns;
use crate::touch::{self, DEFAULT_SCALE};

/// The last tick's output, written by the simulation thread and read by
/// the paint code.
#[derive(Default)]
struct FrameState {
    alive: Vec<Cell>,
    generation: u32,
}

pub struct LifeApp {
    core: GameCore,
    frame: Arc<Mutex<FrameState>>,
    ctx: egui::Context,
    live_color: Color32,
    preview_color: Color32,
    bg_color: Color32,
    selected_pattern: usize,
}

impl LifeApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let frame = Arc::new(Mutex::new(FrameState::default()));
        let core = start_session(&frame, ctx);

        Self {
            core,
            frame,
            ctx: ctx.clone(),
            live_color: Color32::BLACK,
            preview_color: Color32::from_rgb(0, 160, 0),
            bg_color: Color32::WHITE,
            selected_pattern: 0,
        }
    }
}

/// Builds a fresh session whose tick sink stores the report for the paint
/// code and wakes the UI thread.
fn start_session(frame: &Arc<Mutex<FrameState>>, ctx: &egui::Context) -> GameCore {
    let sink_frame = Arc::clone(frame);
    let repaint_ctx = ctx.clone();
    let sink: TickSink = Box::new(move |report: TickReport| {
        *sink_frame.lock().unwrap() = FrameState {
            alive: report.alive,
            generation: report.generation,
        };
        repaint_ctx.request_repaint();
    });
    GameCore::start(DEFAULT_SCALE, DriverConfig::default(), sink)
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game of Life");

            // Controls
            ui.horizontal(|ui| {
                match self.core.state() {
                    State::Running => {
                        if ui.button("⏸ Pause").clicked() {
                            self.core.set_state(State::Paused);
                        }
                        if ui.button("⏹ Stop").clicked() {
                            self.core.set_state(State::Stopped);
                        }
                    }
                    State::Paused => {
                        if ui.button("▶ Resume").clicked() {
                            self.core.set_state(State::Running);
                        }
                        if ui.button("⏹ Stop").clicked() {
                            self.core.set_state(State::Stopped);
                        }
                    }
                    State::Stopped => {
                        // A stopped session never resumes; start a new one.
                        if ui.button("▶ Start").clicked() {
                            *self.frame.lock().unwrap() = FrameState::default();
                            self.core = start_session(&self.frame, &self.ctx);
                        }
                    }
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                ui.separator();

                // Show current colors
                ui.label("Cells:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Preview:");
                ui.color_edit_button_srgba(&mut self.preview_color);
            });

            ui.separator();

            ui.label("Draw with the pointer; releasing feeds the stroke into the next tick.");
            ui.label("Double-click to stamp the selected pattern there.");

            ui.separator();

            let (alive, generation) = {
                let frame = self.frame.lock().unwrap();
                (frame.alive.clone(), frame.generation)
            };

            // Draw the board
            let origin = ui.cursor().min;
            // Leave room under the board for the statistics row.
            let stats_height =
                ui.text_style_height(&egui::TextStyle::Body) + 2.0 * ui.spacing().item_spacing.y;
            let board_size =
                (ui.available_size() - Vec2::new(0.0, stats_height)).max(Vec2::ZERO);
            let (response, painter) =
                ui.allocate_painter(board_size, Sense::click_and_drag());

            let board = Rect::from_min_size(origin, board_size);
            painter.rect_filled(board, 0.0, self.bg_color);
            draw_cells(&painter, board, &alive, self.live_color);
            draw_cells(&painter, board, &self.core.preview(), self.preview_color);

            // Forward pointer input to the core. Coordinates are relative
            // to the board origin; the core quantizes them.
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = (pos.x - origin.x, pos.y - origin.y);
                if response.double_clicked() {
                    let center = touch::quantize(DEFAULT_SCALE, x, y);
                    self.core.stamp(patterns::place(
                        &patterns::PATTERNS[self.selected_pattern],
                        center,
                    ));
                } else if response.clicked() || response.dragged() {
                    self.core.pointer_moved(x, y);
                }
            }
            if response.clicked() || response.drag_released() {
                self.core.pointer_released();
            }

            // Statistics
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", generation));
                ui.label(format!("Live cells: {}", alive.len()));
            });
        });
    }
}

/// Draws each cell as a scaled square, skipping anything outside the
/// board. The simulation is unbounded; the view is not.
fn draw_cells(painter: &egui::Painter, board: Rect, cells: &[Cell], color: Color32) {
    for &(col, row) in cells {
        let rect = Rect::from_min_size(
            egui::pos2(
                board.min.x + col as f32 * DEFAULT_SCALE,
                board.min.y + row as f32 * DEFAULT_SCALE,
            ),
            Vec2::splat(DEFAULT_SCALE),
        );
        if board.intersects(rect) {
            painter.rect_filled(rect, 1.0, color);
        }
    }
}
