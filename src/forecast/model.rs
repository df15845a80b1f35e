//! Forecast Document Module
//! Typed view of an Open-Meteo `/v1/forecast` response saved to disk.

use crate::charts::lenient_samples;
use crate::forecast::{TemperatureUnit, Theme, WeatherCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Failed to read forecast: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse forecast: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub current_units: HashMap<String, String>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    #[serde(default)]
    pub hourly_units: HashMap<String, String>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
    #[serde(default)]
    pub daily_units: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub surface_pressure: Option<f64>,
    #[serde(default)]
    pub is_day: Option<f64>,
}

impl CurrentConditions {
    pub fn weather_code(&self) -> Option<WeatherCode> {
        WeatherCode::from_sample(self.weather_code)
    }

    /// Missing `is_day` counts as daytime.
    pub fn is_day(&self) -> bool {
        self.is_day != Some(0.0)
    }

    pub fn theme(&self) -> Theme {
        Theme::select(self.weather_code(), self.is_day())
    }
}

/// Hourly columns; `time[i]` pairs with every other column's `[i]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub weather_code: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
}

impl Forecast {
    pub fn from_json_str(json: &str) -> Result<Self, ForecastError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ForecastError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ForecastError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Unit the document's temperatures are expressed in (Celsius unless
    /// the units blocks say otherwise).
    pub fn temperature_unit(&self) -> TemperatureUnit {
        [&self.hourly_units, &self.daily_units, &self.current_units]
            .into_iter()
            .flat_map(|units| {
                ["temperature_2m", "temperature_2m_max"]
                    .into_iter()
                    .filter_map(move |key| units.get(key))
            })
            .find_map(|symbol| TemperatureUnit::from_symbol(symbol))
            .unwrap_or_default()
    }

    /// Human-readable place description from the coordinates.
    pub fn location(&self) -> String {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => match &self.timezone {
                Some(tz) => format!("{:.2}, {:.2} ({})", lat, lon, tz),
                None => format!("{:.2}, {:.2}", lat, lon),
            },
            _ => "unknown location".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "latitude": 52.52,
        "longitude": 13.41,
        "timezone": "Europe/Berlin",
        "current_units": {"temperature_2m": "°F"},
        "current": {"temperature_2m": 68.0, "weather_code": 61, "is_day": 1},
        "hourly": {
            "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
            "temperature_2m": [60.1, null],
            "precipitation_probability": [10, "20"]
        },
        "daily": {"time": ["2024-05-01"], "temperature_2m_max": [70.2]}
    }"#;

    #[test]
    fn test_parse_sample() {
        let forecast = Forecast::from_json_str(SAMPLE).unwrap();
        let hourly = forecast.hourly.as_ref().unwrap();
        assert_eq!(hourly.time.len(), 2);
        assert_eq!(hourly.temperature_2m, vec![Some(60.1), None]);
        assert_eq!(hourly.precipitation_probability, vec![Some(10.0), Some(20.0)]);

        let current = forecast.current.as_ref().unwrap();
        assert_eq!(current.weather_code(), Some(WeatherCode(61)));
        assert_eq!(current.theme(), Theme::Rainy);
        assert_eq!(forecast.location(), "52.52, 13.41 (Europe/Berlin)");
    }

    #[test]
    fn test_temperature_unit_detection() {
        let forecast = Forecast::from_json_str(SAMPLE).unwrap();
        assert_eq!(forecast.temperature_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(Forecast::default().temperature_unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_empty_document_is_valid() {
        let forecast = Forecast::from_json_str("{}").unwrap();
        assert!(forecast.hourly.is_none());
        assert_eq!(forecast.location(), "unknown location");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Forecast::from_json_str("{"),
            Err(ForecastError::Parse(_))
        ));
        assert!(matches!(
            Forecast::from_path("/no/such/forecast.json"),
            Err(ForecastError::Io(_))
        ));
    }

    #[test]
    fn test_night_time_current_conditions() {
        let current = CurrentConditions {
            weather_code: Some(0.0),
            is_day: Some(0.0),
            ..Default::default()
        };
        assert_eq!(current.theme(), Theme::Night);
    }
}
