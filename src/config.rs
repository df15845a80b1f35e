//! Settings Module
//! Layered settings: built-in defaults, then an optional `config/skychart.toml`,
//! then `SKYCHART__*` environment variables (`SKYCHART__LINE__TITLE=...`).

use crate::charts::{ChartOptions, Color};
use crate::forecast::{TemperatureUnit, HOURS_PER_DAY};
use config::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "config/skychart";
pub const ENV_PREFIX: &str = "SKYCHART";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixel size of every panel.
    pub width: u32,
    pub height: u32,
    /// Unit temperatures are plotted in.
    pub unit: TemperatureUnit,
    pub background: Color,
    /// TrueType font for titles and labels; text is skipped without one.
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Length of the hourly window, starting at the current hour.
    pub hours: usize,
    pub line: ChartOptions,
    pub bar: ChartOptions,
    pub area: ChartOptions,
    pub heatmap: ChartOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 200,
            unit: TemperatureUnit::Celsius,
            background: Color::WHITE,
            font_path: None,
            output_dir: PathBuf::from("charts"),
            hours: HOURS_PER_DAY,
            line: ChartOptions::default(),
            bar: ChartOptions::default(),
            area: ChartOptions::default(),
            heatmap: ChartOptions::default(),
        }
    }
}

/// Load settings from the default file location and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(DEFAULT_CONFIG_FILE)
}

/// Load settings from `name` (extension optional, file optional) and the environment.
pub fn load_settings_from(name: &str) -> Result<Settings, ConfigError> {
    load_settings_with(name, ENV_PREFIX)
}

/// Load settings from `name`, then variables named `<prefix>__<KEY>`.
pub fn load_settings_with(name: &str, prefix: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
