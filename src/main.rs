use std::path::PathBuf;

use eframe::egui;
use panda_dash::app::PandaDashApp;
use panda_dash::config::DashboardConfig;
use panda_dash::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let (mut config, config_error) = match DashboardConfig::discover() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{e}; using default settings");
            (DashboardConfig::default(), Some(e))
        }
    };

    // `panda-dash [DATA_FILE]` overrides the configured data file.
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_file = Some(PathBuf::from(path));
    }

    let mut state = AppState::from_config(config);
    if let Some(e) = config_error {
        state.status_message.get_or_insert_with(|| format!("Config error: {e}"));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "panda-dash",
        options,
        Box::new(|_cc| Ok(Box::new(PandaDashApp::new(state)))),
    )
}
