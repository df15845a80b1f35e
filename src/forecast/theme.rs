use crate::forecast::WeatherCode;
use std::fmt;

/// Dashboard background theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Night,
}

impl Theme {
    /// Night wins over any condition; otherwise clear skies are sunny,
    /// codes up to fog are cloudy and precipitation (51+) is rainy.
    pub fn select(code: Option<WeatherCode>, is_day: bool) -> Self {
        if !is_day {
            return Theme::Night;
        }
        match code.map(|c| c.0) {
            Some(0 | 1) => Theme::Sunny,
            Some(2..=48) => Theme::Cloudy,
            Some(51..) => Theme::Rainy,
            _ => Theme::Cloudy,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Sunny => "bg-sunny",
            Theme::Cloudy => "bg-cloudy",
            Theme::Rainy => "bg-rainy",
            Theme::Night => "bg-night",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
