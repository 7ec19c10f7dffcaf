//! The controller between gestures and the face.
//!
//! `FaceController` owns the current [`FacialExpression`] and the
//! [`FaceView`].  Every gesture replaces the expression wholesale and pushes
//! the derived render parameters into the view, which marks itself for
//! redraw.

use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};

use face_expression::{happier, sadder, toggle_eyes, FacialExpression};
use face_render::{Canvas, Color, FaceView, SvgSurface};
use tracing::info;

use crate::config::FaceItConfig;
use crate::error::AppError;
use crate::gesture::{spawn_gesture_source, GestureEvent, SimGestureSource, SimInput};
use crate::visualizer::{Visualizer, KEY_LEGEND};

// ════════════════════════════════════════════════════════════════════════════
// FaceController
// ════════════════════════════════════════════════════════════════════════════

pub struct FaceController {
    expression: FacialExpression,
    view:       FaceView,
}

impl FaceController {
    pub fn new(cfg: &FaceItConfig) -> Self {
        let params = cfg.face.parameters(cfg.expression);
        let mut controller = FaceController {
            expression: cfg.expression,
            view: FaceView::new(params, cfg.face.scale_bounds()),
        };
        controller.update_ui();
        controller
    }

    pub fn expression(&self) -> FacialExpression { self.expression }
    pub fn view(&self) -> &FaceView { &self.view }
    pub fn view_mut(&mut self) -> &mut FaceView { &mut self.view }

    // ── process one GestureEvent ─────────────────────────────────────────

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Pinch { factor } => {
                self.view.pinch(factor);
                info!(factor, scale = self.view.scale(), "pinch");
            }
            GestureEvent::Tap => {
                self.set_expression(toggle_eyes(self.expression));
                info!(eyes = %self.expression.eyes, "tap");
            }
            GestureEvent::SwipeUp => {
                self.set_expression(happier(self.expression));
                info!(mouth = %self.expression.mouth, "happier");
            }
            GestureEvent::SwipeDown => {
                self.set_expression(sadder(self.expression));
                info!(mouth = %self.expression.mouth, "sadder");
            }
            GestureEvent::Quit => { /* handled in run loop */ }
        }
    }

    fn set_expression(&mut self, expression: FacialExpression) {
        self.expression = expression;
        self.update_ui();
    }

    fn update_ui(&mut self) {
        self.view.set_expression(self.expression);
    }

    /// Repaint `canvas` if the view is dirty or the canvas was just resized.
    /// Returns whether anything was drawn.
    pub fn refresh(&mut self, canvas: &mut Canvas, background: Color, resized: bool) -> bool {
        if resized {
            self.view.set_needs_display();
        }
        if !self.view.needs_display() {
            return false;
        }
        canvas.clear(background);
        self.view.draw(canvas);
        true
    }

    pub fn title(&self) -> String {
        format!("FaceIt — {}  (scale {:.2})", self.expression, self.view.scale())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// render_svg() — one frame without a window
// ════════════════════════════════════════════════════════════════════════════

/// Draw the configured face at `width`×`height` and return the SVG text.
pub fn render_svg(cfg: &FaceItConfig, width: f64, height: f64) -> String {
    let mut controller = FaceController::new(cfg);
    let mut svg = SvgSurface::new(width, height).with_background(cfg.window.background);
    controller.view_mut().draw(&mut svg);
    svg.document()
}

pub fn write_svg(cfg: &FaceItConfig, width: f64, height: f64, out: &Path) -> Result<(), AppError> {
    std::fs::write(out, render_svg(cfg, width, height))
        .map_err(|source| AppError::Write { path: out.to_path_buf(), source })?;
    info!(path = %out.display(), width, height, "wrote svg");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and drive the event / redraw loop until quit.
pub fn run(cfg: FaceItConfig) -> Result<(), AppError> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let gesture_rx = spawn_gesture_source(SimGestureSource::new(sim_rx));

    let mut vis = Visualizer::new(&cfg.window, sim_tx)?;
    let mut face = FaceController::new(&cfg);
    info!(expression = %face.expression(), "{}", KEY_LEGEND);

    while vis.is_open() {
        if !vis.poll_input() { break; }

        loop {
            match gesture_rx.try_recv() {
                Ok(GestureEvent::Quit)          => return Ok(()),
                Ok(evt)                         => face.handle_gesture(evt),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        let resized = vis.sync_size();
        let background = vis.background();
        if face.refresh(vis.canvas_mut(), background, resized) {
            vis.set_title(&face.title());
        }
        vis.present()?;
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
