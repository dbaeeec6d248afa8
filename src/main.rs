// main.rs - Touch-driven Game of Life on an unbounded sparse grid
//
// The simulation runs on its own thread at a fixed tick; the egui shell
// only forwards pointer input and repaints on tick reports.

use eframe::egui;

mod driver;
mod grid;
mod lifecycle;
mod patterns;
mod touch;
mod ui;

use ui::LifeApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(|cc| Box::new(LifeApp::new(&cc.egui_ctx))),
    )
}
