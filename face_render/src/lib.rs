//! # face_render
//!
//! Draws a cartoon face from a handful of numbers.
//!
//! Everything is derived from one quantity, the skull radius:
//!
//! ```text
//! skull_radius = min(width, height) / 2 * scale
//! ```
//!
//! and the face is four stroked [`kurbo::BezPath`]s: the skull circle, two
//! eyes (circles when open, flat lines when shut) and a cubic mouth whose bend
//! follows the mouth curvature (-1 frown … +1 smile).
//!
//! A [`FaceView`] owns the [`RenderParameters`].  Each setter marks the view
//! as needing display; [`FaceView::draw`] recomputes all geometry from the
//! surface's current bounds, strokes it, and clears the flag.
//!
//! Two [`Surface`]s ship with the crate:
//!
//! * [`Canvas`] — ARGB `u32` framebuffer, ready for `minifb`.
//! * [`SvgSurface`] — a standalone SVG document.
//!
//! ```rust
//! use face_render::{FaceView, SvgSurface};
//!
//! let mut view = FaceView::default();
//! view.set_eyes_open(true);
//! view.set_mouth_curvature(1.0);
//!
//! let mut svg = SvgSurface::new(200.0, 200.0);
//! view.draw(&mut svg);
//! assert!(!view.needs_display());
//! assert_eq!(svg.path_count(), 4);
//! ```

pub mod canvas;
pub mod color;
pub mod face;
pub mod surface;
pub mod svg;

pub use canvas::Canvas;
pub use color::{Color, ColorParseError};
pub use face::{Eye, FaceGeometry, FaceView, RenderParameters, ScaleBounds};
pub use kurbo::{BezPath, Point, Rect};
pub use surface::Surface;
pub use svg::SvgSurface;
