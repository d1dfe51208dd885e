mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use inventory_dashboard::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "inventory-dashboard", version, about = "Inventory spreadsheet dashboard")]
struct Cli {
    /// Config file (defaults to $INVENTORY_DASHBOARD_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Spreadsheet path or http(s) URL, overriding the config
    #[arg(long)]
    source: Option<String>,
    /// Worksheet name inside the workbook
    #[arg(long)]
    sheet: Option<String>,
    /// Logo image path or URL
    #[arg(long)]
    logo: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source.data = source;
    }
    if let Some(sheet) = cli.sheet {
        config.source.sheet = sheet;
    }
    if let Some(logo) = cli.logo {
        config.source.logo = Some(logo);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("{} – Inventory", config.display.title);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let mut state = AppState::new(config);
            state.load_configured();
            Ok(Box::new(DashboardApp { state }))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
