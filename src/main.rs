// SlotLog application
// Main entry point

use anyhow::{anyhow, Result};
use slotlog::services::settings::ConfigService;
use slotlog::ui_egui::SlotLogApp;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting SlotLog {}", env!("CARGO_PKG_VERSION"));

    let config = ConfigService::load()?;
    let db_path = ConfigService::resolve_database_path(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SlotLog")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SlotLog",
        options,
        Box::new(move |cc| {
            let app = SlotLogApp::new(cc, config, &db_path)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("Window failed: {}", err))
}
