use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{load_settings, Route};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::CompaniesApp;

const APP_NAME: &str = "Companies";

#[derive(Debug, Parser)]
#[command(about = "Desktop front end for the companies service")]
struct Args {
    /// Backend base url; overrides config file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Config file to load instead of ./companies.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Screen to open first, e.g. "/", "/register" or "/edit/7".
    #[arg(long, default_value = "/")]
    route: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_deref(), args.api_url.as_deref())?;
    let start = Route::parse(&args.route)
        .with_context(|| format!("unknown route '{}'", args.route))?;
    tracing::info!(api = %settings.api_base_url, route = %start, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.api_base_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    let timing = settings.timing;
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(CompaniesApp::new(timing, start, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
