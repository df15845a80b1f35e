//! Chart Input Module
//! Series and grid payloads accepted by `update`, with lenient deserialization.
//!
//! Upstream forecast feeds routinely contain nulls, strings and absent
//! arrays. None of that is an error here: every malformed sample becomes a
//! missing value and every absent array becomes empty.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// An x-axis label: a timestamp/category string or a plain number.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl Label {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Label::Text(String::new()),
            Value::String(s) => Label::Text(s),
            Value::Number(n) => n
                .as_f64()
                .map(Label::Number)
                .unwrap_or_else(|| Label::Text(n.to_string())),
            other => Label::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{}", n),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<f64> for Label {
    fn from(n: f64) -> Self {
        Label::Number(n)
    }
}

/// Interpret one raw sample. Numbers and numeric strings are kept; anything
/// else (null, booleans, objects, NaN/inf) is missing.
fn sample_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub(crate) fn lenient_samples<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(sample_from_value)
        .collect())
}

fn lenient_labels<'de, D>(deserializer: D) -> Result<Vec<Label>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Label::from_value)
        .collect())
}

fn lenient_grid<'de, D>(deserializer: D) -> Result<Vec<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|row| match row {
            Value::Array(cells) => cells.iter().map(sample_from_value).collect(),
            _ => Vec::new(),
        })
        .collect())
}

/// Input for line, bar and area charts.
///
/// `labels[i]` pairs with `series[i]`; the two may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeriesData {
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub series: Vec<Option<f64>>,
}

impl SeriesData {
    pub fn new<L, I, V>(labels: I, series: V) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
        V: IntoIterator<Item = Option<f64>>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            series: series.into_iter().collect(),
        }
    }

    /// Build from fully-present values.
    pub fn from_values<L, I, V>(labels: I, values: V) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
        V: IntoIterator<Item = f64>,
    {
        Self::new(labels, values.into_iter().map(Some))
    }

    pub fn len(&self) -> usize {
        self.labels.len().max(self.series.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Input for the heatmap: rows of cells plus optional axis labels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GridData {
    #[serde(default, deserialize_with = "lenient_grid")]
    pub grid: Vec<Vec<Option<f64>>>,
    #[serde(default, rename = "xLabels", alias = "x_labels", deserialize_with = "lenient_labels")]
    pub x_labels: Vec<Label>,
    #[serde(default, rename = "yLabels", alias = "y_labels", deserialize_with = "lenient_labels")]
    pub y_labels: Vec<Label>,
}

impl GridData {
    pub fn new(grid: Vec<Vec<Option<f64>>>) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Build from fully-present cells.
    pub fn from_values(grid: Vec<Vec<f64>>) -> Self {
        Self::new(
            grid.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    pub fn with_labels<X, Y>(mut self, x_labels: Vec<X>, y_labels: Vec<Y>) -> Self
    where
        X: Into<Label>,
        Y: Into<Label>,
    {
        self.x_labels = x_labels.into_iter().map(Into::into).collect();
        self.y_labels = y_labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Column count, taken from the first row.
    pub fn cols(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_tolerates_nulls_strings_and_junk() {
        let data: SeriesData = serde_json::from_str(
            r#"{"labels": ["00:00", 1, null], "series": [1.5, null, "2.5", "abc", true, {"x": 1}]}"#,
        )
        .unwrap();

        assert_eq!(
            data.labels,
            vec![Label::from("00:00"), Label::Number(1.0), Label::from("")]
        );
        assert_eq!(
            data.series,
            vec![Some(1.5), None, Some(2.5), None, None, None]
        );
        assert_eq!(data.len(), 6);
    }

    #[test]
    fn test_series_absent_or_null_arrays_are_empty() {
        let data: SeriesData = serde_json::from_str(r#"{"series": null}"#).unwrap();
        assert!(data.is_empty());

        let data: SeriesData = serde_json::from_str("{}").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_grid_uses_camel_case_labels() {
        let data: GridData = serde_json::from_str(
            r#"{"grid": [[1, 2], [3, null]], "xLabels": ["a", "b"], "yLabels": ["r1", "r2"]}"#,
        )
        .unwrap();

        assert_eq!(data.rows(), 2);
        assert_eq!(data.cols(), 2);
        assert_eq!(data.grid[1][1], None);
        assert_eq!(data.x_labels.len(), 2);
        assert_eq!(data.y_labels[1].to_string(), "r2");
    }

    #[test]
    fn test_grid_non_array_rows_become_empty() {
        let data: GridData = serde_json::from_str(r#"{"grid": [5, [1]]}"#).unwrap();
        assert_eq!(data.rows(), 2);
        assert_eq!(data.cols(), 0);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Number(3.0).to_string(), "3");
        assert_eq!(Label::Number(2.5).to_string(), "2.5");
        assert_eq!(Label::from("01:00").to_string(), "01:00");
    }
}
