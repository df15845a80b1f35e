//! Area Chart
//! A line chart whose region down to the baseline is filled.

use crate::charts::handle::{draw_decorations, validate_surface, Chart, ChartState};
use crate::charts::scale::{downsample, scale, x_positions};
use crate::charts::surface::{Color, Point, Surface};
use crate::charts::{ChartError, ChartOptions, SeriesData};

pub const AREA_FILL: Color = Color::rgba(52, 152, 219, 77);
pub const AREA_STROKE: Color = Color::rgb(0x29, 0x80, 0xb9);

pub struct AreaChart<S: Surface> {
    surface: S,
    options: ChartOptions,
    state: ChartState,
}

impl<S: Surface> AreaChart<S> {
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

impl<S: Surface> Chart for AreaChart<S> {
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

        draw_decorations(&mut self.surface, &self.options);

        let line: Vec<Point> = x_positions(norm.len(), w)
            .into_iter()
            .zip(scale(&norm.values, h, padding))
            .collect();

        // A lone point has no extent to fill
        if line.len() >= 2 {
            let baseline = h - padding;
            let mut region = line.clone();
            region.push((w, baseline));
            region.push((0.0, baseline));
            self.surface
                .fill_path(&region, self.options.fill.unwrap_or(AREA_FILL));
            self.surface
                .stroke_path(&line, self.options.stroke.unwrap_or(AREA_STROKE), 2.0);
        }

        tracing::debug!(points = line.len(), "Area chart rendered");
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

pub fn create_area_chart<S: Surface>(
    surface: S,
    options: ChartOptions,
) -> Result<AreaChart<S>, ChartError> {
    AreaChart::new(surface, options)
}
