//! Display List Surface
//! Records drawing operations instead of rasterizing them.
//!
//! A full-surface clear resets the list, so the recorded operations always
//! describe exactly what is currently visible. This makes it the surface of
//! choice for inspecting plotted coordinates and for dumping a chart as JSON.

use crate::charts::surface::{Color, Point, Surface, TextStyle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    ClearRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    StrokePath {
        points: Vec<Point>,
        color: Color,
        line_width: f64,
    },
    FillPath {
        points: Vec<Point>,
        color: Color,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
        rotated: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayList {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Nothing visible since the last full clear.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Every stroked polyline, in drawing order.
    pub fn strokes(&self) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokePath { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Every filled rectangle as `(x, y, w, h, color)`.
    pub fn rects(&self) -> Vec<(f64, f64, f64, f64, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillRect { x, y, w, h, color } => Some((x, y, w, h, color)),
                _ => None,
            })
            .collect()
    }

    /// Every piece of text drawn, rotated or not.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn covers_surface(&self, x: f64, y: f64, w: f64, h: f64) -> bool {
        x <= 0.0 && y <= 0.0 && x + w >= self.width as f64 && y + h >= self.height as f64
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if self.covers_surface(x, y, w, h) {
            self.ops.clear();
        } else {
            self.ops.push(DrawOp::ClearRect { x, y, w, h });
        }
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        if points.len() < 2 {
            return;
        }
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.ops.push(DrawOp::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            style,
            rotated: false,
        });
    }

    fn fill_text_rotated(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            style,
            rotated: true,
        });
    }
}
