//! Raster Surface
//! Draws charts into an RGBA pixel buffer and encodes them as PNG.
//!
//! Shapes go through `imageproc` with alpha blending; text is rasterized
//! glyph by glyph with `rusttype` when a TrueType font has been supplied.

use crate::charts::surface::{Color, Point, Surface, TextStyle};
use crate::charts::ChartError;
use image::{ImageBuffer, ImageFormat, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point as PixelPoint;
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::io::Cursor;
use std::path::Path;

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Round a 1-D extent to whole pixels and clip it to `0..limit`.
/// Returns `(start, length)`, or `None` when nothing remains.
fn pixel_span(start: f64, len: f64, limit: u32) -> Option<(u32, u32)> {
    let (a, b) = if len >= 0.0 {
        (start, start + len)
    } else {
        (start + len, start)
    };
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let clip = |v: f64| v.round().clamp(0.0, limit as f64) as u32;
    let (a, b) = (clip(a), clip(b));
    (b > a).then_some((a, b - a))
}

/// Integer polygon with consecutive duplicates and a closing repeat removed.
fn to_polygon(points: &[Point]) -> Option<Vec<PixelPoint<i32>>> {
    let mut poly: Vec<PixelPoint<i32>> = Vec::with_capacity(points.len());
    for &(x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let p = PixelPoint::new(x.round() as i32, y.round() as i32);
        if poly.last() != Some(&p) {
            poly.push(p);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    (poly.len() >= 3).then_some(poly)
}

pub struct RasterSurface {
    image: RgbaImage,
    background: Color,
    font: Option<Font<'static>>,
}

impl RasterSurface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, rgba(Color::TRANSPARENT)),
            background: Color::TRANSPARENT,
            font: None,
        }
    }

    /// Set the color `clear_rect` resets to, and fill with it now.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        for pixel in self.image.pixels_mut() {
            *pixel = rgba(background);
        }
        self
    }

    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    /// Read a TrueType font file for text rendering.
    pub fn load_font(path: impl AsRef<Path>) -> Result<Font<'static>, ChartError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Font::try_from_vec(bytes).ok_or_else(|| ChartError::InvalidFont(path.display().to_string()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ChartError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ChartError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Run imageproc drawing through an alpha-blending canvas.
    fn blended<F: FnOnce(&mut Blend<RgbaImage>)>(&mut self, draw: F) {
        let mut canvas = Blend(std::mem::take(&mut self.image));
        draw(&mut canvas);
        self.image = canvas.0;
    }

    /// Composite `color` at `coverage` (0..1) over the pixel at (x, y).
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        let alpha = (coverage.clamp(0.0, 1.0) * color.a as f32) as u8;
        if alpha == 0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        pixel.blend(&Rgba([color.r, color.g, color.b, alpha]));
    }

    fn thick_segment(from: Point, to: Point, line_width: f64) -> Option<Vec<PixelPoint<i32>>> {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        let (nx, ny) = (-dy / len * line_width / 2.0, dx / len * line_width / 2.0);
        to_polygon(&[
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ])
    }

    fn glyphs(font: &Font<'static>, text: &str, size: f32) -> Vec<rusttype::PositionedGlyph<'static>> {
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        font.layout(text, scale, rusttype::point(0.0, v_metrics.ascent))
            .collect()
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (Some((x0, w)), Some((y0, h))) = (
            pixel_span(x, w, self.image.width()),
            pixel_span(y, h, self.image.height()),
        ) else {
            return;
        };
        let background = rgba(self.background);
        for py in y0..y0 + h {
            for px in x0..x0 + w {
                self.image.put_pixel(px, py, background);
            }
        }
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        if points.len() < 2 {
            return;
        }
        let pixel = rgba(color);
        self.blended(|canvas| {
            for pair in points.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
                    continue;
                }
                match Self::thick_segment(from, to, line_width).filter(|_| line_width > 1.5) {
                    Some(quad) => draw_polygon_mut(canvas, &quad, pixel),
                    None => draw_line_segment_mut(
                        canvas,
                        (from.0 as f32, from.1 as f32),
                        (to.0 as f32, to.1 as f32),
                        pixel,
                    ),
                }
            }
        });
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        let Some(poly) = to_polygon(points) else {
            return;
        };
        let pixel = rgba(color);
        self.blended(|canvas| draw_polygon_mut(canvas, &poly, pixel));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let (Some((x0, w)), Some((y0, h))) = (
            pixel_span(x, w, self.image.width()),
            pixel_span(y, h, self.image.height()),
        ) else {
            return;
        };
        let rect = Rect::at(x0 as i32, y0 as i32).of_size(w, h);
        let pixel = rgba(color);
        if color.is_opaque() {
            draw_filled_rect_mut(&mut self.image, rect, pixel);
        } else {
            self.blended(|canvas| draw_filled_rect_mut(canvas, rect, pixel));
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let Some(font) = self.font.clone() else {
            tracing::debug!("No font loaded, skipping text {:?}", text);
            return;
        };
        let ascent = font.v_metrics(Scale::uniform(style.size)).ascent;
        let (ox, oy) = (x.round() as i32, y.round() as i32 - ascent.round() as i32);

        for glyph in Self::glyphs(&font, text, style.size) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    self.blend_pixel(
                        ox + bb.min.x + gx as i32,
                        oy + bb.min.y + gy as i32,
                        style.color,
                        v,
                    );
                });
            }
        }
    }

    fn fill_text_rotated(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let Some(font) = self.font.clone() else {
            tracing::debug!("No font loaded, skipping rotated text {:?}", text);
            return;
        };
        let ascent = font.v_metrics(Scale::uniform(style.size)).ascent.round() as i32;
        let glyphs = Self::glyphs(&font, text, style.size);

        // Render upright into a coverage mask first
        let mut max_x = 0;
        let mut max_y = 0;
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                max_x = max_x.max(bb.max.x);
                max_y = max_y.max(bb.max.y);
            }
        }
        if max_x <= 0 || max_y <= 0 {
            return;
        }
        let (mask_w, mask_h) = (max_x as usize, max_y as usize);
        let mut mask = vec![0f32; mask_w * mask_h];
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px >= 0 && py >= 0 && (px as usize) < mask_w && (py as usize) < mask_h {
                        mask[py as usize * mask_w + px as usize] = v;
                    }
                });
            }
        }

        // Rotate 90 degrees counter-clockwise: (tx, ty) -> (ty, mask_w - tx - 1),
        // placed so the baseline start sits on (x, y).
        let left = x.round() as i32 - ascent;
        let top = y.round() as i32 - mask_w as i32;
        for ty in 0..mask_h {
            for tx in 0..mask_w {
                let coverage = mask[ty * mask_w + tx];
                if coverage > 0.0 {
                    self.blend_pixel(
                        left + ty as i32,
                        top + (mask_w - tx - 1) as i32,
                        style.color,
                        coverage,
                    );
                }
            }
        }
    }
}
