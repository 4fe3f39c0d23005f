//! ISA Report - Agricultural Sustainability Index per Brazilian state, 2023
//!
//! Loads the ISA table and the state boundaries, joins them and shows a
//! table, a ranking chart, summary metrics and a choropleth map.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use config::ReportConfig;
use eframe::egui;
use gui::IsaApp;

fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let config = ReportConfig::default();
    log::info!(
        "Reading {} and {}",
        config.csv_path.display(),
        config.geojson_path.display()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Índice de Sustentabilidade Agrícola - Brasil 2023"),
        ..Default::default()
    };

    eframe::run_native(
        "ISA Report",
        options,
        Box::new(|cc| Ok(Box::new(IsaApp::new(cc, config)))),
    )
}
