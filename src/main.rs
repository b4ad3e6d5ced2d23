mod app;
mod check;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::FightSongApp;
use clap::Parser;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = AppConfig::parse();

    if config.check {
        return check::run(&config);
    }

    // Fatal load errors abort here, before any window opens.
    let state = AppState::startup(&config)
        .with_context(|| format!("loading {}", config.data.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "College Fight Song DNA",
        options,
        Box::new(move |_cc| Ok(Box::new(FightSongApp::new(state)))),
    )
    .map_err(|e| anyhow!("dashboard exited with an error: {e}"))
}
