//! Forecast module - Open-Meteo forecast documents and the small amount of
//! weather logic the dashboard needs (codes, units, themes, hourly lookup).

mod hourly;
mod model;
mod theme;
mod units;
mod wmo;

pub use hourly::{hour_label, parse_timestamp, HOURS_PER_DAY};
pub use model::{CurrentConditions, DailyBlock, Forecast, ForecastError, HourlyBlock};
pub use theme::Theme;
pub use units::TemperatureUnit;
pub use wmo::WeatherCode;
