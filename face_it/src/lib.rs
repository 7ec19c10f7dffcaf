//! # face_it
//!
//! A cartoon face that reacts to gestures, drawn by [`face_render`] from the
//! state held in a [`face_expression::FacialExpression`].
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Pinch | Scale the face (multiplicative, clamped to the configured range) |
//! | Tap | Toggle eyes open / closed |
//! | Swipe up | Happier: mouth one step toward a smile |
//! | Swipe down | Sadder: mouth one step toward a frown |
//!
//! ## Window input
//!
//! | Input | Gesture |
//! |---|---|
//! | `Space` / `T` / click | Tap |
//! | `Up` / drag up | Swipe up |
//! | `Down` / drag down | Swipe down |
//! | `+` / `-` / scroll wheel | Pinch |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod config;
pub mod error;
pub mod gesture;
pub mod visualizer;

pub use app::{render_svg, run, write_svg, FaceController};
pub use config::{ConfigError, FaceItConfig};
pub use error::AppError;
