//! Dashboard Module
//! Builds the chart panels for one forecast and renders them to PNG.
//!
//! Each panel gets its own surface and chart handle, so panels render in
//! parallel with no shared state.

use crate::charts::{
    create_area_chart, create_bar_chart, create_heatmap, create_line_chart, Chart, ChartError,
    ChartOptions, GridData, RasterSurface, SeriesData, Surface,
};
use crate::config::Settings;
use crate::forecast::{hour_label, DailyBlock, Forecast, TemperatureUnit, Theme, WeatherCode, HOURS_PER_DAY};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use rusttype::Font;
use std::fmt;
use std::path::PathBuf;

/// What a panel plots, tagged with the chart type that plots it.
#[derive(Debug, Clone)]
pub enum PanelData {
    Line(SeriesData),
    Bar(SeriesData),
    Area(SeriesData),
    Heatmap(GridData),
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub name: &'static str,
    pub options: ChartOptions,
    pub data: PanelData,
}

impl Panel {
    /// Draw the panel onto `surface` and hand the surface back.
    pub fn render<S: Surface>(&self, surface: S) -> Result<S, ChartError> {
        let options = self.options.clone();
        let surface = match &self.data {
            PanelData::Line(data) => {
                let mut chart = create_line_chart(surface, options)?;
                chart.update(data);
                chart.into_surface()
            }
            PanelData::Bar(data) => {
                let mut chart = create_bar_chart(surface, options)?;
                chart.update(data);
                chart.into_surface()
            }
            PanelData::Area(data) => {
                let mut chart = create_area_chart(surface, options)?;
                chart.update(data);
                chart.into_surface()
            }
            PanelData::Heatmap(data) => {
                let mut chart = create_heatmap(surface, options)?;
                chart.update(data);
                chart.into_surface()
            }
        };
        Ok(surface)
    }
}

/// One-line description of current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub location: String,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub unit: TemperatureUnit,
    pub condition: Option<WeatherCode>,
    /// Ionicons name for the condition, `help-outline` when unknown.
    pub icon: &'static str,
    pub theme: Theme,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_unit: String,
    pub precipitation: Option<f64>,
    pub precipitation_unit: String,
    pub pressure: Option<f64>,
    /// Today's maximum UV index.
    pub uv_index_max: Option<f64>,
}

impl Summary {
    fn from_forecast(forecast: &Forecast, target: TemperatureUnit) -> Option<Self> {
        let current = forecast.current.as_ref()?;
        let source = forecast.temperature_unit();
        let unit_of = |key: &str, default: &str| {
            forecast
                .current_units
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };
        let condition = current.weather_code();

        Some(Self {
            location: forecast.location(),
            temperature: current.temperature_2m.map(|t| source.convert(t, target)),
            apparent_temperature: current.apparent_temperature.map(|t| source.convert(t, target)),
            unit: target,
            condition,
            icon: condition.map(|c| c.icon_name()).unwrap_or(UNKNOWN_ICON),
            theme: current.theme(),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_unit: unit_of("wind_speed_10m", "km/h"),
            precipitation: current.precipitation,
            precipitation_unit: unit_of("precipitation", "mm"),
            pressure: current.surface_pressure,
            uv_index_max: forecast
                .daily
                .as_ref()
                .and_then(|daily| daily.uv_index_max.first().copied().flatten()),
        })
    }
}

const UNKNOWN_ICON: &str = "help-outline";

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        write!(f, "{}: ", self.location)?;
        match self.temperature {
            Some(t) => write!(f, "{}{}", t.round(), symbol)?,
            None => write!(f, "--{}", symbol)?,
        }
        if let Some(t) = self.apparent_temperature {
            write!(f, " (feels like {}{})", t.round(), symbol)?;
        }
        let condition = self.condition.map(|c| c.description()).unwrap_or("Unknown");
        write!(f, ", {} [{}, {}]", condition, self.theme, self.icon)?;

        if let Some(h) = self.humidity {
            write!(f, ", humidity {}%", h)?;
        }
        if let Some(w) = self.wind_speed {
            write!(f, ", wind {} {}", w, self.wind_unit)?;
        }
        if let Some(p) = self.precipitation {
            write!(f, ", precipitation {} {}", p, self.precipitation_unit)?;
        }
        if let Some(p) = self.pressure {
            write!(f, ", pressure {} hPa", p.round())?;
        }
        if let Some(uv) = self.uv_index_max {
            write!(f, ", UV {}", uv)?;
        }
        Ok(())
    }
}

/// One day of the daily outlook: temperature range, condition, daylight.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutlook {
    pub date: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: TemperatureUnit,
    pub condition: Option<WeatherCode>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl DayOutlook {
    fn from_daily(daily: &DailyBlock, source: TemperatureUnit, target: TemperatureUnit) -> Vec<Self> {
        let temp = |column: &[Option<f64>], i: usize| {
            column
                .get(i)
                .copied()
                .flatten()
                .map(|t| source.convert(t, target))
        };
        let clock = |column: &[String], i: usize| column.get(i).map(|t| hour_label(t).to_string());

        daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| Self {
                date: date.clone(),
                min: temp(&daily.temperature_2m_min, i),
                max: temp(&daily.temperature_2m_max, i),
                unit: target,
                condition: WeatherCode::from_sample(daily.weather_code.get(i).copied().flatten()),
                sunrise: clock(&daily.sunrise, i),
                sunset: clock(&daily.sunset, i),
            })
            .collect()
    }
}

impl fmt::Display for DayOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = |t: Option<f64>| t.map_or_else(|| "--".to_string(), |t| t.round().to_string());
        write!(
            f,
            "{}: {} / {}{}",
            self.date,
            reading(self.min),
            reading(self.max),
            self.unit.symbol()
        )?;
        if let Some(code) = self.condition {
            write!(f, ", {}", code.description())?;
        }
        if let Some(sunrise) = &self.sunrise {
            write!(f, ", sunrise {}", sunrise)?;
        }
        if let Some(sunset) = &self.sunset {
            write!(f, ", sunset {}", sunset)?;
        }
        Ok(())
    }
}

fn titled(options: &ChartOptions, title: String) -> ChartOptions {
    let mut options = options.clone();
    if options.title.is_none() {
        options.title = Some(title);
    }
    options
}

pub struct Dashboard {
    pub summary: Option<Summary>,
    pub outlook: Vec<DayOutlook>,
    pub panels: Vec<Panel>,
}

impl Dashboard {
    /// Build every panel the forecast has data for. Missing columns skip
    /// their panel with a warning rather than failing the whole dashboard.
    pub fn build(forecast: &Forecast, settings: &Settings, now: NaiveDateTime) -> Self {
        let source = forecast.temperature_unit();
        let target = settings.unit;
        let convert = |column: &[Option<f64>]| -> Vec<Option<f64>> {
            column
                .iter()
                .map(|v| v.map(|t| source.convert(t, target)))
                .collect()
        };

        let mut panels = Vec::new();

        match &forecast.hourly {
            Some(hourly) if !hourly.is_empty() => {
                let start = hourly.nearest_index(now).unwrap_or(0);
                let window = hourly.window(start, settings.hours);

                if hourly.temperature_2m.is_empty() {
                    tracing::warn!("Forecast has no hourly temperature, skipping temperature panels");
                } else {
                    let temps = convert(&hourly.temperature_2m);
                    panels.push(Panel {
                        name: "hourly_temperature",
                        options: titled(&settings.line, format!("Temperature ({})", target.symbol())),
                        data: PanelData::Line(hourly.series(&temps, window.clone())),
                    });

                    let days = hourly.full_days();
                    if days > 0 {
                        let grid = (0..days)
                            .map(|day| {
                                hourly
                                    .day_range(day)
                                    .map(|i| temps.get(i).copied().flatten())
                                    .collect()
                            })
                            .collect();
                        let hours: Vec<String> = (0..HOURS_PER_DAY).map(|h| format!("{:02}", h)).collect();
                        let dates: Vec<String> = (0..days)
                            .filter_map(|day| hourly.day_label(day).map(str::to_string))
                            .collect();
                        panels.push(Panel {
                            name: "temperature_heatmap",
                            options: titled(&settings.heatmap, format!("Temperature by hour ({})", target.symbol())),
                            data: PanelData::Heatmap(GridData::new(grid).with_labels(hours, dates)),
                        });
                    }
                }

                if hourly.precipitation_probability.is_empty() {
                    tracing::warn!("Forecast has no precipitation probability, skipping its panel");
                } else {
                    panels.push(Panel {
                        name: "precipitation_probability",
                        options: titled(&settings.bar, "Precipitation probability (%)".to_string()),
                        data: PanelData::Bar(hourly.series(&hourly.precipitation_probability, window)),
                    });
                }
            }
            _ => tracing::warn!("Forecast has no hourly data, skipping hourly panels"),
        }

        let mut outlook = Vec::new();
        match &forecast.daily {
            Some(daily) if !daily.time.is_empty() => {
                let labels = || daily.time.iter().map(String::as_str);
                let daily_panels = [
                    (
                        "daily_temperature",
                        &daily.temperature_2m_max,
                        titled(&settings.area, format!("Daily maximum ({})", target.symbol())),
                        true,
                    ),
                    (
                        "daily_temperature_min",
                        &daily.temperature_2m_min,
                        titled(&settings.area, format!("Daily minimum ({})", target.symbol())),
                        true,
                    ),
                    (
                        "daily_precipitation",
                        &daily.precipitation_sum,
                        titled(
                            &settings.bar,
                            format!(
                                "Daily precipitation ({})",
                                forecast
                                    .daily_units
                                    .get("precipitation_sum")
                                    .map(String::as_str)
                                    .unwrap_or("mm")
                            ),
                        ),
                        false,
                    ),
                ];
                for (name, column, options, is_temperature) in daily_panels {
                    if column.is_empty() {
                        tracing::warn!("Forecast has no data for {}, skipping its panel", name);
                        continue;
                    }
                    let data = if is_temperature {
                        PanelData::Area(SeriesData::new(labels(), convert(column)))
                    } else {
                        PanelData::Bar(SeriesData::new(labels(), column.iter().copied()))
                    };
                    panels.push(Panel { name, options, data });
                }
                outlook = DayOutlook::from_daily(daily, source, target);
            }
            _ => tracing::warn!("Forecast has no daily data, skipping daily panels"),
        }

        let summary = Summary::from_forecast(forecast, target);

        tracing::debug!(panels = panels.len(), "Dashboard built");
        Self {
            summary,
            outlook,
            panels,
        }
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name == name)
    }

    /// Render every panel to PNG bytes, in panel order.
    pub fn render_png(
        &self,
        settings: &Settings,
        font: Option<&Font<'static>>,
    ) -> Result<Vec<(String, Vec<u8>)>, ChartError> {
        self.panels
            .par_iter()
            .map(|panel| {
                let mut surface =
                    RasterSurface::new(settings.width, settings.height).with_background(settings.background);
                if let Some(font) = font {
                    surface = surface.with_font(font.clone());
                }
                let surface = panel.render(surface)?;
                Ok((panel.name.to_string(), surface.encode_png()?))
            })
            .collect()
    }

    /// Render and write `<output_dir>/<panel>.png` for every panel.
    pub fn write_to_dir(
        &self,
        settings: &Settings,
        font: Option<&Font<'static>>,
    ) -> Result<Vec<PathBuf>, ChartError> {
        std::fs::create_dir_all(&settings.output_dir)?;
        self.render_png(settings, font)?
            .into_iter()
            .map(|(name, bytes)| {
                let path = settings.output_dir.join(format!("{}.png", name));
                std::fs::write(&path, bytes)?;
                tracing::info!("Wrote {}", path.display());
                Ok(path)
            })
            .collect()
    }
}
