//! Bar Chart
//! Bars grow up from a zero baseline at `height - padding`, scaled against
//! the series maximum.

use crate::charts::handle::{draw_decorations, validate_surface, Chart, ChartState};
use crate::charts::scale::{downsample, value_range};
use crate::charts::surface::{Color, Surface};
use crate::charts::{ChartError, ChartOptions, SeriesData};

pub const BAR_FILL: Color = Color::rgb(0x2e, 0xcc, 0x71);
/// Horizontal gap on each side of a bar.
const BAR_GAP: f64 = 2.0;

pub struct BarChart<S: Surface> {
    surface: S,
    options: ChartOptions,
    state: ChartState,
}

impl<S: Surface> BarChart<S> {
    pub fn new(surface: S, options: ChartOptions) -> Result<Self, ChartError> {
        validate_surface(&surface)?;
        Ok(Self {
            surface,
            options,
            state: ChartState::Cleared,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}

impl<S: Surface> Chart for BarChart<S> {
    type Data = SeriesData;

    fn update(&mut self, data: &SeriesData) {
        self.surface.clear();
        let norm = downsample(data, self.options.max_points, self.options.keep_last);
        if norm.is_empty() {
            self.state = ChartState::Cleared;
            return;
        }

        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        let padding = self.options.effective_padding(h);
        let band = h - padding * 2.0;
        let bar_w = w / norm.len() as f64;
        let max = value_range(&norm.values)
            .map(|(_, max)| max)
            .filter(|max| *max > 0.0)
            .unwrap_or(1.0);

        draw_decorations(&mut self.surface, &self.options);

        let fill = self.options.fill.unwrap_or(BAR_FILL);
        for (i, &v) in norm.values.iter().enumerate() {
            if v <= 0.0 {
                continue;
            }
            let bar_h = v / max * band;
            self.surface.fill_rect(
                i as f64 * bar_w + BAR_GAP,
                h - bar_h - padding,
                (bar_w - BAR_GAP * 2.0).max(1.0),
                bar_h,
                fill,
            );
        }

        tracing::debug!(bars = norm.len(), "Bar chart rendered");
        self.state = ChartState::Rendered;
    }

    fn destroy(&mut self) {
        self.surface.clear();
        self.state = ChartState::Cleared;
    }

    fn state(&self) -> ChartState {
        self.state
    }
}

pub fn create_bar_chart<S: Surface>(
    surface: S,
    options: ChartOptions,
) -> Result<BarChart<S>, ChartError> {
    BarChart::new(surface, options)
}
