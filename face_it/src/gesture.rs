//! Gesture recognition from window input.
//!
//! The public interface is [`GestureEvent`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether a swipe came from an arrow key or a
//! mouse drag.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, trace};

/// Pinch factor for one wheel notch or one `+` key press.
pub const PINCH_STEP: f64 = 1.1;

/// A press and release closer than this (pixels) is a tap.
pub const TAP_SLOP: f32 = 10.0;

/// Shortest vertical drag (pixels) that counts as a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 40.0;

// ════════════════════════════════════════════════════════════════════════════
// GestureEvent
// ════════════════════════════════════════════════════════════════════════════

/// A discrete gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// Multiply the face scale by `factor` (> 1 grows).
    Pinch { factor: f64 },

    /// Single tap: toggle the eyes.
    Tap,

    /// Swipe up: happier.
    SwipeUp,

    /// Swipe down: sadder.
    SwipeDown,

    /// Quit the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`GestureEvent`]s over a channel.
pub trait GestureSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<GestureEvent>);
}

/// Spawn a gesture source on its own thread and return the receiving end.
pub fn spawn_gesture_source<G: GestureSource>(source: G) -> Receiver<GestureEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// Raw input
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    Key(SimKey),
    /// Vertical scroll-wheel delta; positive scrolls up.
    Wheel(f32),
    PointerDown { x: f32, y: f32 },
    PointerUp   { x: f32, y: f32 },
}

/// Keyboard shortcuts, already mapped from window key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Tap,        // Space / T
    SwipeUp,    // Up
    SwipeDown,  // Down
    PinchOut,   // + / =
    PinchIn,    // -
    Quit,       // Q / Escape
}

// ════════════════════════════════════════════════════════════════════════════
// DragTracker — tap vs. swipe from pointer press/release
// ════════════════════════════════════════════════════════════════════════════

/// Remembers where the pointer went down and classifies the release.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<(f32, f32)>,
}

impl DragTracker {
    pub fn press(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Classify the drag that ends at `(x, y)`.
    ///
    /// * within [`TAP_SLOP`] of the press → `Tap`
    /// * mostly vertical and at least [`SWIPE_MIN_DISTANCE`] → swipe
    ///   (screen y grows downward, so negative dy is up)
    /// * anything else → nothing
    pub fn release(&mut self, x: f32, y: f32) -> Option<GestureEvent> {
        let (x0, y0) = self.origin.take()?;
        let (dx, dy) = (x - x0, y - y0);

        if dx.hypot(dy) <= TAP_SLOP {
            return Some(GestureEvent::Tap);
        }
        if dy.abs() >= SWIPE_MIN_DISTANCE && dy.abs() > dx.abs() {
            return Some(if dy < 0.0 { GestureEvent::SwipeUp } else { GestureEvent::SwipeDown });
        }
        None
    }
}

/// Pinch factor for a wheel delta.  Non-finite or zero deltas give `None`.
pub fn wheel_pinch(delta: f32) -> Option<f64> {
    if !delta.is_finite() || delta == 0.0 {
        return None;
    }
    let factor = PINCH_STEP.powf(delta as f64);
    (factor.is_finite() && factor > 0.0).then_some(factor)
}

// ════════════════════════════════════════════════════════════════════════════
// SimGestureSource
// ════════════════════════════════════════════════════════════════════════════

/// Gesture source driven by [`SimInput`] events from the visualizer window.
pub struct SimGestureSource {
    rx:   Receiver<SimInput>,
    drag: DragTracker,
}

impl SimGestureSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimGestureSource { rx, drag: DragTracker::default() }
    }

    /// Translate one raw input, updating drag state.
    pub fn translate(&mut self, input: SimInput) -> Option<GestureEvent> {
        match input {
            SimInput::Key(SimKey::Tap)       => Some(GestureEvent::Tap),
            SimInput::Key(SimKey::SwipeUp)   => Some(GestureEvent::SwipeUp),
            SimInput::Key(SimKey::SwipeDown) => Some(GestureEvent::SwipeDown),
            SimInput::Key(SimKey::PinchOut)  => Some(GestureEvent::Pinch { factor: PINCH_STEP }),
            SimInput::Key(SimKey::PinchIn)   => Some(GestureEvent::Pinch { factor: 1.0 / PINCH_STEP }),
            SimInput::Key(SimKey::Quit)      => Some(GestureEvent::Quit),
            SimInput::Wheel(delta) => wheel_pinch(delta).map(|factor| GestureEvent::Pinch { factor }),
            SimInput::PointerDown { x, y } => {
                self.drag.press(x, y);
                None
            }
            SimInput::PointerUp { x, y } => self.drag.release(x, y),
        }
    }
}

impl GestureSource for SimGestureSource {
    fn run(mut self: Box<Self>, tx: Sender<GestureEvent>) {
        while let Ok(input) = self.rx.recv() {
            trace!(?input, "raw input");
            let Some(event) = self.translate(input) else { continue };
            debug!(?event, "gesture recognised");
            let quit = event == GestureEvent::Quit;
            if tx.send(event).is_err() || quit {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
