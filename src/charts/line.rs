//! Line Chart

use crate::charts::handle::{draw_decorations, validate_surface, Chart, ChartState};
use crate::charts::scale::{downsample, scale, x_positions};
use crate::charts::surface::{Color, Point, Surface};
use crate::charts::{ChartError, ChartOptions, SeriesData};

pub const LINE_STROKE: Color = Color::rgb(0x34, 0x98, 0xdb);
const GRID_LINES: usize = 5;

pub struct LineChart<S: Surface> {
    surface: S,
    options: ChartOptions,
    state: ChartState,
}

impl<S: Surface> LineChart<S> {
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

    fn draw_grid(&mut self) {
        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        for i in 0..GRID_LINES {
            let y = h / GRID_LINES as f64 * i as f64;
            self.surface.stroke_path(&[(0.0, y), (w, y)], Color::GRID, 1.0);
        }
    }
}

impl<S: Surface> Chart for LineChart<S> {
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

        if self.options.grid {
            self.draw_grid();
        }
        draw_decorations(&mut self.surface, &self.options);

        let points: Vec<Point> = x_positions(norm.len(), w)
            .into_iter()
            .zip(scale(&norm.values, h, padding))
            .collect();
        let stroke = self.options.stroke.unwrap_or(LINE_STROKE);
        self.surface.stroke_path(&points, stroke, 2.0);

        tracing::debug!(points = points.len(), "Line chart rendered");
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

pub fn create_line_chart<S: Surface>(
    surface: S,
    options: ChartOptions,
) -> Result<LineChart<S>, ChartError> {
    LineChart::new(surface, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{DisplayList, RasterSurface};

    fn data_line(chart: &LineChart<DisplayList>) -> Vec<Point> {
        chart
            .surface()
            .strokes()
            .into_iter()
            .last()
            .map(|points| points.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_hourly_scenario_peak_is_highest() {
        let mut chart = LineChart::new(DisplayList::new(300, 150), ChartOptions::default()).unwrap();
        chart.update(&SeriesData::from_values(
            ["00:00", "01:00", "02:00"],
            [10.0, 15.0, 5.0],
        ));

        let points = data_line(&chart);
        assert_eq!(points.len(), 3);
        assert!(points[1].1 < points[0].1);
        assert!(points[1].1 < points[2].1);
        assert_eq!(points[1], (150.0, 20.0));
        assert_eq!(points[2], (300.0, 130.0));
        assert_eq!(chart.state(), ChartState::Rendered);
    }

    #[test]
    fn test_extremes_map_to_extreme_rows() {
        let values = [3.0, -2.0, 8.5, 0.0, 8.5, 1.0];
        let mut chart = LineChart::new(DisplayList::new(200, 100), ChartOptions::default()).unwrap();
        chart.update(&SeriesData::from_values(Vec::<&str>::new(), values));

        let ys: Vec<f64> = data_line(&chart).iter().map(|p| p.1).collect();
        let top = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let bottom = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(ys[2], top);
        assert_eq!(ys[4], top);
        assert_eq!(ys[1], bottom);
    }

    #[test]
    fn test_update_is_idempotent() {
        let data = SeriesData::new(["a", "b", "c", "d"], [Some(1.0), None, Some(4.0), Some(2.0)]);
        let opts = ChartOptions::default().with_title("Temp").with_y_label("°C");

        let mut chart = LineChart::new(DisplayList::new(120, 80), opts.clone()).unwrap();
        chart.update(&data);
        let first = chart.surface().clone();
        chart.update(&data);
        assert_eq!(chart.surface(), &first);

        let mut raster = LineChart::new(RasterSurface::new(120, 80), opts).unwrap();
        raster.update(&data);
        let first = raster.surface().encode_png().unwrap();
        raster.update(&data);
        assert_eq!(raster.surface().encode_png().unwrap(), first);
    }

    #[test]
    fn test_empty_series_clears() {
        let mut chart = LineChart::new(DisplayList::new(100, 100), ChartOptions::default()).unwrap();
        chart.update(&SeriesData::from_values(["a", "b"], [1.0, 2.0]));
        assert!(!chart.surface().is_blank());

        chart.update(&SeriesData::default());
        assert!(chart.surface().is_blank());
        assert_eq!(chart.state(), ChartState::Cleared);
    }

    #[test]
    fn test_single_point_draws_no_segment() {
        let mut chart = LineChart::new(DisplayList::new(100, 100), ChartOptions::default()).unwrap();
        chart.update(&SeriesData::from_values(["now"], [21.0]));

        // Only the grid lines remain
        assert_eq!(chart.surface().strokes().len(), GRID_LINES);
        assert_eq!(chart.state(), ChartState::Rendered);
    }

    #[test]
    fn test_flat_series_shares_one_row() {
        let mut chart =
            LineChart::new(DisplayList::new(100, 100), ChartOptions::default().with_grid(false)).unwrap();
        chart.update(&SeriesData::from_values(["a", "b", "c"], [4.0, 4.0, 4.0]));

        let points = data_line(&chart);
        assert!(points.iter().all(|p| p.1 == points[0].1));
    }

    #[test]
    fn test_long_series_is_downsampled() {
        let mut chart = LineChart::new(
            DisplayList::new(400, 100),
            ChartOptions::default().with_max_points(50),
        )
        .unwrap();
        let values: Vec<f64> = (0..1234).map(|i| (i as f64 / 10.0).sin()).collect();
        chart.update(&SeriesData::from_values(Vec::<String>::new(), values));

        let points = data_line(&chart);
        assert!(!points.is_empty() && points.len() <= 50);
    }

    #[test]
    fn test_destroy_then_update_acts_fresh() {
        let data = SeriesData::from_values(["a", "b"], [1.0, 3.0]);
        let mut chart = LineChart::new(DisplayList::new(50, 50), ChartOptions::default()).unwrap();
        chart.update(&data);
        let rendered = chart.surface().clone();

        chart.destroy();
        assert!(chart.surface().is_blank());
        assert_eq!(chart.state(), ChartState::Cleared);

        chart.update(&data);
        assert_eq!(chart.surface(), &rendered);
    }

    #[test]
    fn test_invalid_surface_is_rejected() {
        let result = create_line_chart(DisplayList::new(0, 0), ChartOptions::default());
        assert!(matches!(result, Err(ChartError::InvalidSurface { .. })));
    }

    #[test]
    fn test_custom_stroke_is_used() {
        let red = Color::rgb(255, 0, 0);
        let mut chart = LineChart::new(
            DisplayList::new(50, 50),
            ChartOptions::default().with_grid(false).with_stroke(red),
        )
        .unwrap();
        chart.update(&SeriesData::from_values(["a", "b"], [1.0, 2.0]));

        assert!(matches!(
            chart.surface().ops().last(),
            Some(crate::charts::DrawOp::StrokePath { color, .. }) if *color == red
        ));
    }
}
