//! Charts module - Chart rendering

mod area;
mod bar;
mod data;
mod display_list;
mod error;
mod handle;
mod heatmap;
mod line;
mod options;
mod raster;
pub mod scale;
mod surface;

pub use area::{create_area_chart, AreaChart, AREA_FILL, AREA_STROKE};
pub use bar::{create_bar_chart, BarChart, BAR_FILL};
pub(crate) use data::lenient_samples;
pub use data::{GridData, Label, SeriesData};
pub use display_list::{DisplayList, DrawOp};
pub use error::ChartError;
pub use handle::{Chart, ChartState};
pub use heatmap::{create_heatmap, Heatmap};
pub use line::{create_line_chart, LineChart, LINE_STROKE};
pub use options::ChartOptions;
pub use raster::RasterSurface;
pub use surface::{Color, ColorParseError, Point, Surface, TextStyle};
