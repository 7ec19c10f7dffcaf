//! Face geometry and the view that owns its render parameters.
//!
//! ```text
//!            ┌───────── skull (radius R) ─────────┐
//!            │      ○  ← R/3 →  ○     eyes r=R/10 │
//!            │          (center)                  │
//!            │   ┌── mouth box: R wide, R/3 tall ─┐│
//!            │   └────────────────────────────────┘│
//!            └─────────────────────────────────────┘
//! ```

use std::f64::consts::TAU;

use face_expression::FacialExpression;
use kurbo::{Arc, BezPath, Point, Rect, Shape, Vec2};
use tracing::{debug, trace};

use crate::color::Color;
use crate::surface::Surface;

// Ratios of the skull radius to each feature dimension.
const SKULL_RADIUS_TO_EYE_OFFSET:   f64 = 3.0;
const SKULL_RADIUS_TO_EYE_RADIUS:   f64 = 10.0;
const SKULL_RADIUS_TO_MOUTH_WIDTH:  f64 = 1.0;
const SKULL_RADIUS_TO_MOUTH_HEIGHT: f64 = 3.0;
const SKULL_RADIUS_TO_MOUTH_OFFSET: f64 = 3.0;

pub const DEFAULT_SCALE:      f64 = 0.9;
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;
pub const DEFAULT_CURVATURE:  f64 = -0.5;
pub const MIN_SCALE:          f64 = 0.1;
pub const MAX_SCALE:          f64 = 3.0;

/// Accuracy of the cubic approximation of circles, in surface units.
const ARC_TOLERANCE: f64 = 0.1;

// ════════════════════════════════════════════════════════════════════════════
// RenderParameters
// ════════════════════════════════════════════════════════════════════════════

/// Everything the renderer needs besides the surface bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParameters {
    pub scale:           f64,
    pub eyes_open:       bool,
    /// 1.0 is a full smile, -1.0 a full frown.
    pub mouth_curvature: f64,
    pub line_width:      f64,
    pub stroke_color:    Color,
}

impl Default for RenderParameters {
    fn default() -> Self {
        RenderParameters {
            scale:           DEFAULT_SCALE,
            eyes_open:       false,
            mouth_curvature: DEFAULT_CURVATURE,
            line_width:      DEFAULT_LINE_WIDTH,
            stroke_color:    Color::RED,
        }
    }
}

impl RenderParameters {
    /// Overwrite the expression-derived fields.
    pub fn apply_expression(&mut self, e: FacialExpression) {
        self.eyes_open = e.eyes.is_open();
        self.mouth_curvature = e.mouth.curvature();
    }
}

/// Inclusive range the accumulated pinch scale is held to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        ScaleBounds { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleBounds {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FaceGeometry
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eye {
    Left,
    Right,
}

/// Every derived quantity for one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub skull_center: Point,
    pub skull_radius: f64,
    pub eye_radius:   f64,
    pub eye_offset:   f64,
    pub eyes_open:    bool,
    pub mouth_rect:   Rect,
    /// Vertical displacement of the mouth control points; positive is down.
    pub smile_offset: f64,
}

impl FaceGeometry {
    pub fn compute(bounds: Rect, params: &RenderParameters) -> Self {
        let skull_radius = bounds.width().min(bounds.height()).max(0.0) / 2.0 * params.scale;
        let skull_center = bounds.center();

        let mouth_width  = skull_radius / SKULL_RADIUS_TO_MOUTH_WIDTH;
        let mouth_height = skull_radius / SKULL_RADIUS_TO_MOUTH_HEIGHT;
        let mouth_offset = skull_radius / SKULL_RADIUS_TO_MOUTH_OFFSET;
        let mouth_rect = Rect::from_origin_size(
            (skull_center.x - mouth_width / 2.0, skull_center.y + mouth_offset),
            (mouth_width, mouth_height),
        );

        let curvature = if params.mouth_curvature.is_nan() {
            0.0
        } else {
            params.mouth_curvature.clamp(-1.0, 1.0)
        };

        FaceGeometry {
            skull_center,
            skull_radius,
            eye_radius:   skull_radius / SKULL_RADIUS_TO_EYE_RADIUS,
            eye_offset:   skull_radius / SKULL_RADIUS_TO_EYE_OFFSET,
            eyes_open:    params.eyes_open,
            mouth_rect,
            smile_offset: curvature * mouth_rect.height(),
        }
    }

    pub fn eye_center(&self, eye: Eye) -> Point {
        let dx = match eye {
            Eye::Left  => -self.eye_offset,
            Eye::Right =>  self.eye_offset,
        };
        Point::new(self.skull_center.x + dx, self.skull_center.y - self.eye_offset)
    }

    /// Counterclockwise on screen.
    pub fn skull_path(&self) -> BezPath {
        circle_path(self.skull_center, self.skull_radius, false)
    }

    /// Clockwise circle when open, a flat line across the eye when shut.
    pub fn eye_path(&self, eye: Eye) -> BezPath {
        let c = self.eye_center(eye);
        let r = self.eye_radius;
        if self.eyes_open {
            circle_path(c, r, true)
        } else {
            let mut p = BezPath::new();
            p.move_to((c.x - r, c.y));
            p.line_to((c.x + r, c.y));
            p
        }
    }

    /// `(start, control1, control2, end)` of the mouth curve.
    pub fn mouth_points(&self) -> (Point, Point, Point, Point) {
        let m = &self.mouth_rect;
        let mid_y = m.center().y;
        let start = Point::new(m.min_x(), mid_y);
        let end   = Point::new(m.max_x(), mid_y);
        let control1 = Point::new(start.x + m.width() / 3.0, start.y + self.smile_offset);
        let control2 = Point::new(end.x - m.width() / 3.0, end.y + self.smile_offset);
        (start, control1, control2, end)
    }

    pub fn mouth_path(&self) -> BezPath {
        let (start, c1, c2, end) = self.mouth_points();
        let mut p = BezPath::new();
        p.move_to(start);
        p.curve_to(c1, c2, end);
        p
    }

    /// Skull, left eye, right eye, mouth, in stroke order.
    pub fn paths(&self) -> [BezPath; 4] {
        [
            self.skull_path(),
            self.eye_path(Eye::Left),
            self.eye_path(Eye::Right),
            self.mouth_path(),
        ]
    }
}

/// Full turn starting at angle 0 (the rightmost point).  Angles grow from +x
/// toward +y, so a positive sweep runs clockwise on a y-down surface.
fn circle_path(center: Point, radius: f64, clockwise: bool) -> BezPath {
    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: 0.0,
        sweep_angle: if clockwise { TAU } else { -TAU },
        x_rotation: 0.0,
    };
    arc.to_path(ARC_TOLERANCE)
}

// ════════════════════════════════════════════════════════════════════════════
// FaceView
// ════════════════════════════════════════════════════════════════════════════

/// Owner of the render parameters.
///
/// Every setter raises `needs_display`; [`FaceView::draw`] lowers it.  The
/// host checks the flag once per frame and only redraws when it is set.
#[derive(Clone, Debug)]
pub struct FaceView {
    params:        RenderParameters,
    scale_bounds:  ScaleBounds,
    needs_display: bool,
}

impl Default for FaceView {
    fn default() -> Self {
        FaceView::new(RenderParameters::default(), ScaleBounds::default())
    }
}

impl FaceView {
    pub fn new(params: RenderParameters, scale_bounds: ScaleBounds) -> Self {
        let mut view = FaceView { params, scale_bounds, needs_display: true };
        view.params.scale = view.sanitize_scale(params.scale).unwrap_or(DEFAULT_SCALE);
        view
    }

    pub fn scale(&self) -> f64 { self.params.scale }
    pub fn eyes_open(&self) -> bool { self.params.eyes_open }
    pub fn mouth_curvature(&self) -> f64 { self.params.mouth_curvature }

    pub fn needs_display(&self) -> bool { self.needs_display }

    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    fn sanitize_scale(&self, scale: f64) -> Option<f64> {
        (scale.is_finite() && scale > 0.0).then(|| self.scale_bounds.clamp(scale))
    }

    /// Set the scale, held to the view's bounds.  Non-finite or
    /// non-positive values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if let Some(s) = self.sanitize_scale(scale) {
            self.params.scale = s;
            self.set_needs_display();
        }
    }

    /// Multiply the scale by a pinch factor.
    pub fn pinch(&mut self, factor: f64) {
        self.set_scale(self.params.scale * factor);
    }

    pub fn set_eyes_open(&mut self, open: bool) {
        self.params.eyes_open = open;
        self.set_needs_display();
    }

    pub fn set_mouth_curvature(&mut self, curvature: f64) {
        self.params.mouth_curvature = curvature;
        self.set_needs_display();
    }

    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.params.line_width = width;
            self.set_needs_display();
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.params.stroke_color = color;
        self.set_needs_display();
    }

    pub fn set_expression(&mut self, e: FacialExpression) {
        self.params.apply_expression(e);
        self.set_needs_display();
    }

    pub fn geometry(&self, bounds: Rect) -> FaceGeometry {
        FaceGeometry::compute(bounds, &self.params)
    }

    /// Recompute the face for the surface's current bounds and stroke it.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let bounds = surface.bounds();
        let geometry = self.geometry(bounds);
        debug!(
            width = bounds.width(),
            height = bounds.height(),
            skull_radius = geometry.skull_radius,
            "drawing face"
        );

        surface.set_color(self.params.stroke_color);
        for path in geometry.paths() {
            trace!(elements = path.elements().len(), "stroke");
            surface.stroke_path(&path, self.params.line_width);
        }
        self.needs_display = false;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
