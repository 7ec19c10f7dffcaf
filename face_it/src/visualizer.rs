//! Software-rendered window using `minifb`.
//!
//! Owns the window and a [`Canvas`] kept at the window's size.  Input is
//! forwarded as [`SimInput`]; the controller decides when to repaint the
//! canvas.

use std::sync::mpsc::Sender;
use std::time::Duration;

use face_render::{Canvas, Color};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::debug;

use crate::config::WindowConfig;
use crate::error::AppError;
use crate::gesture::{SimInput, SimKey};

pub const KEY_LEGEND: &str =
    "Space/T=tap  Up/Down=swipe  +/-/wheel=pinch  drag=tap or swipe  Q/Esc=quit";

pub struct Visualizer {
    window:     Window,
    canvas:     Canvas,
    background: Color,
    sim_tx:     Sender<SimInput>,
    mouse_down: bool,
    last_mouse: (f32, f32),
}

impl Visualizer {
    pub fn new(cfg: &WindowConfig, sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "FaceIt",
            cfg.width, cfg.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            canvas: Canvas::new(cfg.width, cfg.height, cfg.background),
            background: cfg.background,
            sim_tx,
            mouse_down: false,
            last_mouse: (0.0, 0.0),
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse and forward them.  Returns false on quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let mut keys = Vec::new();

        if pressed(Key::Q) || pressed(Key::Escape) {
            let _ = self.sim_tx.send(SimInput::Key(SimKey::Quit));
            return false;
        }
        if pressed(Key::Space) || pressed(Key::T) { keys.push(SimKey::Tap); }
        if pressed(Key::Up)                       { keys.push(SimKey::SwipeUp); }
        if pressed(Key::Down)                     { keys.push(SimKey::SwipeDown); }
        if pressed(Key::Equal) || pressed(Key::NumPadPlus) { keys.push(SimKey::PinchOut); }
        if pressed(Key::Minus) || pressed(Key::NumPadMinus) { keys.push(SimKey::PinchIn); }

        for key in keys {
            let _ = self.sim_tx.send(SimInput::Key(key));
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            let _ = self.sim_tx.send(SimInput::Wheel(dy));
        }

        if let Some(pos) = self.window.get_mouse_pos(MouseMode::Clamp) {
            self.last_mouse = pos;
        }
        let down = self.window.get_mouse_down(MouseButton::Left);
        let (x, y) = self.last_mouse;
        if down && !self.mouse_down {
            let _ = self.sim_tx.send(SimInput::PointerDown { x, y });
        } else if !down && self.mouse_down {
            let _ = self.sim_tx.send(SimInput::PointerUp { x, y });
        }
        self.mouse_down = down;

        true
    }

    /// Match the canvas to the window.  True if the size changed.
    pub fn sync_size(&mut self) -> bool {
        let (w, h) = self.window.get_size();
        let changed = self.canvas.resize(w, h, self.background);
        if changed {
            debug!(width = w, height = h, "window resized");
        }
        changed
    }

    pub fn background(&self) -> Color { self.background }
    pub fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Present the canvas (or just pump events while minimised).
    pub fn present(&mut self) -> Result<(), AppError> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if w == 0 || h == 0 {
            self.window.update();
            return Ok(());
        }
        self.window
            .update_with_buffer(self.canvas.pixels(), w, h)
            .map_err(|e| AppError::Window(e.to_string()))
    }
}
