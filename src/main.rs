use anyhow::{anyhow, Context, Result};
use eframe::egui;
use hospital_insights::app::HospitalInsightsApp;
use hospital_insights::config::DashboardConfig;
use hospital_insights::data;
use hospital_insights::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("loading configuration")?;
    log::info!("Configuration: {config:?}");

    // The dataset is loaded once; a failure here aborts startup.
    let dataset = data::loader::load_file(&config.data.path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data.path.display()))
        .with_context(|| format!("loading hospital data from {}", config.data.path.display()))?;

    let state = AppState::new(dataset, config.display);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hospital Insights",
        options,
        Box::new(|_cc| Ok(Box::new(HospitalInsightsApp::new(state)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
