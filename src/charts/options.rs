//! Per-chart configuration.

use crate::charts::scale::{DEFAULT_MAX_POINTS, DEFAULT_PADDING};
use crate::charts::Color;
use serde::Deserialize;

/// Options shared by every chart type.
///
/// Colors left unset fall back to the chart type's own palette, so a
/// partial override (say, just a title) never recolors a bar chart with
/// line defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Cap on plotted points before fixed-step downsampling kicks in.
    pub max_points: usize,
    /// Vertical inset in pixels above the maximum and below the minimum.
    pub padding: f64,
    /// Horizontal guide lines (line chart only).
    pub grid: bool,
    /// Always plot the final sample when downsampling.
    pub keep_last: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            stroke: None,
            fill: None,
            title: None,
            x_label: None,
            y_label: None,
            max_points: DEFAULT_MAX_POINTS,
            padding: DEFAULT_PADDING,
            grid: true,
            keep_last: true,
        }
    }
}

impl ChartOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_keep_last(mut self, keep_last: bool) -> Self {
        self.keep_last = keep_last;
        self
    }

    /// Padding clamped so the plot band never inverts on tiny surfaces.
    pub(crate) fn effective_padding(&self, height: f64) -> f64 {
        let padding = if self.padding.is_finite() {
            self.padding.max(0.0)
        } else {
            DEFAULT_PADDING
        };
        padding.min(height / 2.0)
    }

    /// Title, x label and y label with empty strings treated as absent.
    pub(crate) fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn x_label_text(&self) -> Option<&str> {
        self.x_label.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn y_label_text(&self) -> Option<&str> {
        self.y_label.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts: ChartOptions =
            serde_json::from_str(r##"{"title": "Rain", "fill": "#123456"}"##).unwrap();

        assert_eq!(opts.title.as_deref(), Some("Rain"));
        assert_eq!(opts.fill, Some(Color::rgb(0x12, 0x34, 0x56)));
        assert_eq!(opts.stroke, None);
        assert_eq!(opts.max_points, DEFAULT_MAX_POINTS);
        assert_eq!(opts.padding, DEFAULT_PADDING);
        assert!(opts.keep_last);
    }

    #[test]
    fn test_effective_padding_is_clamped() {
        let opts = ChartOptions::default();
        assert_eq!(opts.effective_padding(150.0), 20.0);
        assert_eq!(opts.effective_padding(30.0), 15.0);
        assert_eq!(opts.with_padding(-5.0).effective_padding(100.0), 0.0);
    }

    #[test]
    fn test_empty_title_is_absent() {
        let opts = ChartOptions::default().with_title("");
        assert_eq!(opts.title_text(), None);
    }
}
