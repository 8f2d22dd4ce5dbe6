mod app;
mod chart;
mod color;
mod config;
mod data;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use app::SpaghettiApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let data_path = PathBuf::from(config::DATA_FILE);
    log::info!("Reading measurements from {}", data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SpaghettiApp::new(data_path)))),
    )
}
