//! Chart Handle Module
//! Lifecycle shared by every chart type plus the decorations they all draw.

use crate::charts::surface::{Color, Surface, TextStyle};
use crate::charts::{ChartError, ChartOptions};

const TITLE_STYLE: TextStyle = TextStyle::new(14.0, Color::TEXT);
const LABEL_STYLE: TextStyle = TextStyle::new(12.0, Color::TEXT);

/// The two observable states of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// Nothing plotted: fresh, destroyed, or last updated with an empty series.
    Cleared,
    /// The surface shows the most recent non-empty update.
    Rendered,
}

/// A chart bound to one drawing surface.
///
/// `update` always clears and redraws from scratch, so calling it twice with
/// the same data leaves the surface identical. Malformed data never fails;
/// it degrades to a cleared surface.
pub trait Chart {
    type Data;

    fn update(&mut self, data: &Self::Data);

    /// Clear the surface. A later `update` behaves like a fresh chart.
    fn destroy(&mut self);

    fn state(&self) -> ChartState;
}

/// A surface is drawable only if it has pixels in both directions.
pub(crate) fn validate_surface<S: Surface>(surface: &S) -> Result<(), ChartError> {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return Err(ChartError::InvalidSurface { width, height });
    }
    Ok(())
}

/// Title top-left, y label rotated along the left edge, x label along the
/// bottom. Each is drawn only when set.
pub(crate) fn draw_decorations<S: Surface>(surface: &mut S, options: &ChartOptions) {
    draw_decorations_inset(surface, options, 0.0);
}

/// Like [`draw_decorations`], with the x label lifted `bottom_inset` pixels
/// to clear anything the chart draws along the bottom edge.
pub(crate) fn draw_decorations_inset<S: Surface>(surface: &mut S, options: &ChartOptions, bottom_inset: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);

    if let Some(title) = options.title_text() {
        surface.fill_text(title, 10.0, 16.0, TITLE_STYLE);
    }
    if let Some(label) = options.y_label_text() {
        surface.fill_text_rotated(label, 10.0, h / 2.0, LABEL_STYLE);
    }
    if let Some(label) = options.x_label_text() {
        surface.fill_text(label, w / 2.0, h - 4.0 - bottom_inset, LABEL_STYLE);
    }
}
