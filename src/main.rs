mod app;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashboardApp;
use clap::Parser;
use cli::CliArgs;
use config::{DASHBOARD_TITLE, PAYLOAD_SLIDER_MIN, payload_slider_max};
use data::filter::derive_views;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(args: &CliArgs) -> Result<()> {
    // The dataset is loaded once, before anything is shown, and never changes.
    let dataset = data::loader::load_file(&args.data, args.variant)
        .with_context(|| format!("loading launch dataset {}", args.data.display()))?;
    log::info!(
        "Loaded {} launches from {} sites ({} layout): {:?}",
        dataset.len(),
        dataset.sites.len(),
        dataset.variant,
        dataset.sites
    );
    if dataset.is_empty() {
        log::warn!("{} contains no launches", args.data.display());
    }
    let dataset = Arc::new(dataset);

    if args.headless {
        let selection = args.selection(PAYLOAD_SLIDER_MIN, payload_slider_max(&dataset));
        let views = derive_views(&dataset.records, &selection);
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("serializing views")?
        );
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(DASHBOARD_TITLE)
            .with_inner_size([1300.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
