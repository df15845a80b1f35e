//! Heatmap
//! Fills the surface with one cell per grid value, colored along a
//! red-to-green ramp between the grid minimum and maximum.

use crate::charts::handle::{draw_decorations_inset, validate_surface, Chart, ChartState};
use crate::charts::scale::{coerce, heat_color, normalize, value_range};
use crate::charts::surface::{Color, Surface, TextStyle};
use crate::charts::{ChartError, ChartOptions, GridData};

const AXIS_STYLE: TextStyle = TextStyle::new(10.0, Color::TEXT);

pub struct Heatmap<S: Surface> {
    surface: S,
    options: ChartOptions,
    state: ChartState,
}

impl<S: Surface> Heatmap<S> {
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

    fn draw_axis_labels(&mut self, data: &GridData, cell_w: f64, cell_h: f64, rows: usize, cols: usize) {
        let h = self.surface.height() as f64;
        for (c, label) in data.x_labels.iter().take(cols).enumerate() {
            let text = label.to_string();
            if !text.is_empty() {
                self.surface
                    .fill_text(&text, c as f64 * cell_w + 2.0, h - 2.0, AXIS_STYLE);
            }
        }
        for (r, label) in data.y_labels.iter().take(rows).enumerate() {
            let text = label.to_string();
            if !text.is_empty() {
                self.surface
                    .fill_text(&text, 2.0, r as f64 * cell_h + cell_h / 2.0, AXIS_STYLE);
            }
        }
    }
}

impl<S: Surface> Chart for Heatmap<S> {
    type Data = GridData;

    fn update(&mut self, data: &GridData) {
        self.surface.clear();
        let (rows, cols) = (data.rows(), data.cols());
        if rows == 0 || cols == 0 {
            self.state = ChartState::Cleared;
            return;
        }

        // Ragged rows: short rows read as zeros, long rows are cut to the first row's width
        let cells: Vec<f64> = data
            .grid
            .iter()
            .flat_map(|row| (0..cols).map(move |c| coerce(row.get(c).copied().flatten())))
            .collect();
        let Some((min, max)) = value_range(&cells) else {
            self.state = ChartState::Cleared;
            return;
        };

        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        let (cell_w, cell_h) = (w / cols as f64, h / rows as f64);

        for (i, &v) in cells.iter().enumerate() {
            let (r, c) = (i / cols, i % cols);
            self.surface.fill_rect(
                c as f64 * cell_w,
                r as f64 * cell_h,
                cell_w,
                cell_h,
                heat_color(normalize(v, min, max)),
            );
        }

        self.draw_axis_labels(data, cell_w, cell_h, rows, cols);
        // Column labels own the bottom row of text
        let inset = if data.x_labels.iter().take(cols).any(|l| !l.to_string().is_empty()) {
            AXIS_STYLE.size as f64 + 2.0
        } else {
            0.0
        };
        draw_decorations_inset(&mut self.surface, &self.options, inset);

        tracing::debug!(rows, cols, "Heatmap rendered");
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

pub fn create_heatmap<S: Surface>(
    surface: S,
    options: ChartOptions,
) -> Result<Heatmap<S>, ChartError> {
    Heatmap::new(surface, options)
}
