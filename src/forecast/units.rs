use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Recognize the unit strings Open-Meteo puts in `*_units` blocks.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "°C" | "C" | "celsius" => Some(TemperatureUnit::Celsius),
            "°F" | "F" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }

    /// Express a Celsius reading in this unit.
    pub fn celsius_in(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Convert `value` expressed in `self` into `target`.
    pub fn convert(self, value: f64, target: TemperatureUnit) -> f64 {
        if self == target {
            value
        } else {
            target.celsius_in(self.to_celsius(value))
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let f = TemperatureUnit::Fahrenheit;
        assert_eq!(f.celsius_in(100.0), 212.0);
        assert_eq!(f.celsius_in(-40.0), -40.0);
        assert_eq!(f.to_celsius(32.0), 0.0);
        assert_eq!(TemperatureUnit::Celsius.convert(20.0, f), 68.0);
        assert_eq!(f.convert(68.0, TemperatureUnit::Celsius), 20.0);
        assert_eq!(f.convert(68.0, f), 68.0);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(TemperatureUnit::from_symbol("°F"), Some(TemperatureUnit::Fahrenheit));
        assert_eq!(TemperatureUnit::from_symbol(" °C "), Some(TemperatureUnit::Celsius));
        assert_eq!(TemperatureUnit::from_symbol("K"), None);
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "°F");
    }

    #[test]
    fn test_deserializes_lowercase() {
        let unit: TemperatureUnit = serde_json::from_str("\"fahrenheit\"").unwrap();
        assert_eq!(unit, TemperatureUnit::Fahrenheit);
    }
}
