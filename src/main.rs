//! SkyChart - render a saved forecast into PNG chart panels.
//!
//! Usage: `skychart <forecast.json> [out_dir]`

use anyhow::{bail, Context, Result};
use skychart::charts::RasterSurface;
use skychart::config::load_settings;
use skychart::{Dashboard, Forecast};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: skychart <forecast.json> [out_dir]");
    };

    let mut settings = load_settings().context("Failed to load settings")?;
    if let Some(out_dir) = args.next() {
        settings.output_dir = PathBuf::from(out_dir);
    }

    let forecast = Forecast::from_path(&input)
        .with_context(|| format!("Failed to load forecast from {}", input.display()))?;

    let font = match &settings.font_path {
        Some(path) => Some(
            RasterSurface::load_font(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?,
        ),
        None => {
            tracing::warn!("No font_path configured, charts will have no text");
            None
        }
    };

    let now = chrono::Local::now().naive_local();
    let dashboard = Dashboard::build(&forecast, &settings, now);
    if let Some(summary) = &dashboard.summary {
        tracing::info!("{}", summary);
    }
    for day in &dashboard.outlook {
        tracing::info!("{}", day);
    }

    let paths = dashboard
        .write_to_dir(&settings, font.as_ref())
        .with_context(|| format!("Failed to write charts to {}", settings.output_dir.display()))?;
    tracing::info!("Rendered {} chart(s) into {}", paths.len(), settings.output_dir.display());

    Ok(())
}
