// Party Timeline Application
// Main entry point

use party_timeline::services::config;
use party_timeline::ui_egui::PartyPlannerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Party Timeline");

    let settings = config::default_config_path()
        .map(|path| config::load_or_default(&path))
        .unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Party Timeline",
        options,
        Box::new(|_cc| Ok(Box::new(PartyPlannerApp::new(settings)))),
    )
}
