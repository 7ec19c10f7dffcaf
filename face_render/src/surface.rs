//! The drawing surface a face is stroked onto.

use kurbo::{BezPath, Rect};

use crate::color::Color;

/// A 2D vector target that can stroke paths in one color at a time.
pub trait Surface {
    /// Current drawable area.
    fn bounds(&self) -> Rect;

    /// Color for subsequent strokes.
    fn set_color(&mut self, color: Color);

    /// Stroke `path` with the current color.  Never fills.
    fn stroke_path(&mut self, path: &BezPath, line_width: f64);
}
