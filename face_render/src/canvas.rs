//! Software rasterizer: strokes paths into an ARGB `u32` framebuffer.
//!
//! The buffer layout (`row * width + col`, `0xAARRGGBB`) is what `minifb`
//! expects, so a `Canvas` can be presented directly.

use kurbo::{BezPath, PathEl, Point, Rect};

use crate::color::Color;
use crate::surface::Surface;

/// Curve flattening tolerance in pixels.
const FLATTEN_TOLERANCE: f64 = 0.2;

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
    color:  Color,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Canvas {
            width,
            height,
            buf: vec![background.to_argb(); width * height],
            color: Color::RED,
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    /// Resize and clear.  Returns true if the size actually changed.
    pub fn resize(&mut self, width: usize, height: usize, background: Color) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.buf = vec![background.to_argb(); width * height];
        true
    }

    pub fn clear(&mut self, background: Color) {
        self.buf.fill(background.to_argb());
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Color) -> usize {
        let argb = color.to_argb();
        self.buf.iter().filter(|&&p| p == argb).count()
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn blend_pixel(&mut self, x: usize, y: usize) {
        let i = y * self.width + x;
        self.buf[i] = self.color.over(self.buf[i]);
    }

    /// Thick segment: every pixel whose center lies within `half` of the
    /// segment is painted.  An end is butt-capped unless `round` allows a
    /// disc there, which is how interior joins of a polyline are filled.
    fn stroke_segment(
        &mut self,
        a: Point,
        b: Point,
        half: f64,
        round: (bool, bool),
        painted: &mut [bool],
    ) {
        let x0 = (a.x.min(b.x) - half).floor().max(0.0);
        let y0 = (a.y.min(b.y) - half).floor().max(0.0);
        let x1 = (a.x.max(b.x) + half).ceil().min(self.width as f64 - 1.0);
        let y1 = (a.y.max(b.y) + half).ceil().min(self.height as f64 - 1.0);
        if x1 < x0 || y1 < y0 { return; }

        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len2 = dx * dx + dy * dy;
        if len2 <= 0.0 { return; }
        let half2 = half * half;

        for row in y0 as usize..=y1 as usize {
            for col in x0 as usize..=x1 as usize {
                let px = col as f64 + 0.5;
                let py = row as f64 + 0.5;
                let t = ((px - a.x) * dx + (py - a.y) * dy) / len2;
                if (t < 0.0 && !round.0) || (t > 1.0 && !round.1) {
                    continue;
                }
                let t = t.clamp(0.0, 1.0);
                let cx = a.x + dx * t - px;
                let cy = a.y + dy * t - py;
                if cx * cx + cy * cy <= half2 {
                    let i = row * self.width + col;
                    // Overlapping segments of one stroke blend once.
                    if !painted[i] {
                        painted[i] = true;
                        self.blend_pixel(col, row);
                    }
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn stroke_path(&mut self, path: &BezPath, line_width: f64) {
        if self.buf.is_empty() { return; }
        let half = (line_width / 2.0).max(0.5);
        let mut painted = vec![false; self.buf.len()];

        for line in polylines(path) {
            let n = line.len().saturating_sub(1);
            let closed = n > 1 && line[0].distance(line[n]) < 1e-6;
            for (i, w) in line.windows(2).enumerate() {
                let round = (closed || i > 0, closed || i + 1 < n);
                self.stroke_segment(w[0], w[1], half, round, &mut painted);
            }
        }
    }
}

/// One polyline per subpath, curves flattened to within `FLATTEN_TOLERANCE`.
/// Non-finite points are dropped.
fn polylines(path: &BezPath) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => lines.push(vec![p]),
        PathEl::LineTo(p) => {
            if let Some(line) = lines.last_mut() {
                line.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut() {
                if let Some(&first) = line.first() {
                    line.push(first);
                }
            }
        }
        _ => {}
    });
    for line in &mut lines {
        line.retain(|p| p.is_finite());
    }
    lines
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{FaceView, RenderParameters, ScaleBounds};

    fn line(from: (f64, f64), to: (f64, f64)) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(from);
        p.line_to(to);
        p
    }

    #[test]
    fn horizontal_line_paints_band() {
        let mut c = Canvas::new(20, 20, Color::WHITE);
        c.set_color(Color::BLACK);
        c.stroke_path(&line((2.0, 10.0), (17.0, 10.0)), 2.0);

        assert_eq!(c.pixel(10, 10), Some(Color::BLACK.to_argb()));
        assert_eq!(c.pixel(10, 9), Some(Color::BLACK.to_argb()));
        assert_eq!(c.pixel(10, 3), Some(Color::WHITE.to_argb()));
        assert_eq!(c.pixel(0, 10), Some(Color::WHITE.to_argb()));
    }

    #[test]
    fn open_line_ends_are_butt_capped() {
        let mut c = Canvas::new(20, 20, Color::WHITE);
        c.set_color(Color::BLACK);
        c.stroke_path(&line((2.0, 10.0), (17.0, 10.0)), 4.0);

        // Pixel centers 1.5 and 17.5 lie past the ends.
        assert_eq!(c.pixel(1, 10), Some(Color::WHITE.to_argb()));
        assert_eq!(c.pixel(2, 10), Some(Color::BLACK.to_argb()));
        assert_eq!(c.pixel(16, 10), Some(Color::BLACK.to_argb()));
        assert_eq!(c.pixel(17, 10), Some(Color::WHITE.to_argb()));
    }

    #[test]
    fn closed_eye_spans_exactly_its_diameter() {
        // 200x100 at scale 1: the right eye line runs 111.67..121.67 on row 33.
        let params = RenderParameters { scale: 1.0, ..RenderParameters::default() };
        let mut view = FaceView::new(params, ScaleBounds::default());
        let mut c = Canvas::new(200, 100, Color::WHITE);
        view.draw(&mut c);

        let red = Color::RED.to_argb();
        let cols: Vec<usize> = (100..140).filter(|&x| c.pixel(x, 33) == Some(red)).collect();
        assert_eq!(cols.first(), Some(&112));
        assert_eq!(cols.last(), Some(&121));
        assert_eq!(cols.len(), 10);
    }

    #[test]
    fn strokes_are_clipped() {
        let mut c = Canvas::new(10, 10, Color::WHITE);
        c.set_color(Color::BLACK);
        c.stroke_path(&line((-50.0, 5.0), (50.0, 5.0)), 3.0);
        assert_eq!(c.pixel(0, 5), Some(Color::BLACK.to_argb()));
        assert_eq!(c.pixel(9, 5), Some(Color::BLACK.to_argb()));
    }

    #[test]
    fn zero_length_stroke_leaves_no_mark() {
        let mut c = Canvas::new(10, 10, Color::WHITE);
        c.set_color(Color::BLACK);
        c.stroke_path(&line((5.0, 5.0), (5.0, 5.0)), 5.0);
        assert_eq!(c.count(Color::BLACK), 0);
    }

    #[test]
    fn face_draws_red_pixels() {
        let mut c = Canvas::new(200, 200, Color::WHITE);
        let mut view = FaceView::default();
        view.draw(&mut c);
        assert!(c.count(Color::RED) > 0);
        // skull center is not on any stroke
        assert_eq!(c.pixel(100, 100), Some(Color::WHITE.to_argb()));
        // skull ring passes through (100, 100 - 90)
        assert_eq!(c.pixel(100, 10), Some(Color::RED.to_argb()));
    }

    #[test]
    fn empty_canvas_draws_nothing() {
        let mut c = Canvas::new(0, 0, Color::WHITE);
        FaceView::default().draw(&mut c);
        assert!(c.pixels().is_empty());
    }

    #[test]
    fn resize_reports_change() {
        let mut c = Canvas::new(4, 4, Color::WHITE);
        assert!(!c.resize(4, 4, Color::WHITE));
        assert!(c.resize(8, 2, Color::BLACK));
        assert_eq!(c.pixels().len(), 16);
        assert_eq!(c.count(Color::BLACK), 16);
    }
}
