//! WMO weather interpretation codes.

use std::fmt;

/// A World Meteorological Organization weather code as reported by Open-Meteo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeatherCode(pub u16);

impl WeatherCode {
    /// Interpret a raw forecast sample; fractional or negative values are rejected.
    pub fn from_sample(sample: Option<f64>) -> Option<Self> {
        let v = sample?;
        (v.is_finite() && v >= 0.0 && v <= u16::MAX as f64 && v.fract() == 0.0)
            .then(|| WeatherCode(v as u16))
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with hail",
            99 => "Heavy thunderstorm with hail",
            _ => "Unknown",
        }
    }

    /// Ionicons name for the condition.
    pub fn icon_name(&self) -> &'static str {
        match self.0 {
            0 => "sunny-outline",
            1..=3 => "partly-sunny-outline",
            45 | 48 => "cloud-outline",
            51..=57 | 61..=67 | 80..=82 => "rainy-outline",
            71..=77 | 85 | 86 => "snow-outline",
            95.. => "thunderstorm-outline",
            _ => "help-outline",
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
