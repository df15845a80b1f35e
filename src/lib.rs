//! SkyChart - retained-state chart rendering for weather forecast dashboards.
//!
//! `charts` is the renderer proper: line, bar, area and heatmap handles that
//! draw onto any [`charts::Surface`]. The other modules turn an Open-Meteo
//! forecast into a set of rendered PNG panels.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod forecast;

pub use charts::{
    create_area_chart, create_bar_chart, create_heatmap, create_line_chart, Chart, ChartError,
    ChartOptions, GridData, SeriesData,
};
pub use config::Settings;
pub use dashboard::Dashboard;
pub use forecast::Forecast;
