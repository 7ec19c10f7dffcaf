//! TOML configuration.  Every key is optional.
//!
//! ```toml
//! [window]
//! width = 600
//! height = 600
//! background = "#FFFFFF"
//!
//! [face]
//! scale = 0.9
//! line_width = 5.0
//! color = "#FF0000"
//! min_scale = 0.1
//! max_scale = 3.0
//!
//! [expression]
//! eyes = "closed"
//! mouth = "frown"
//! ```

use std::path::{Path, PathBuf};

use face_expression::FacialExpression;
use face_render::face::{DEFAULT_LINE_WIDTH, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use face_render::{Color, RenderParameters, ScaleBounds};
use serde::Deserialize;
use thiserror::Error;

/// Largest accepted window side, in pixels.  The canvas allocates
/// `width * height` pixels up front.
pub const MAX_WINDOW_SIDE: usize = 8192;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width:      usize,
    pub height:     usize,
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 600, height: 600, background: Color::WHITE }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    pub scale:      f64,
    pub line_width: f64,
    pub color:      Color,
    pub min_scale:  f64,
    pub max_scale:  f64,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            scale:      DEFAULT_SCALE,
            line_width: DEFAULT_LINE_WIDTH,
            color:      Color::RED,
            min_scale:  MIN_SCALE,
            max_scale:  MAX_SCALE,
        }
    }
}

impl FaceConfig {
    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds { min: self.min_scale, max: self.max_scale }
    }

    /// Render parameters for `expression` with this face's styling.
    pub fn parameters(&self, expression: FacialExpression) -> RenderParameters {
        let mut p = RenderParameters {
            scale:        self.scale,
            line_width:   self.line_width,
            stroke_color: self.color,
            ..RenderParameters::default()
        };
        p.apply_expression(expression);
        p
    }
}

/// Configuration for the full application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceItConfig {
    pub window:     WindowConfig,
    pub face:       FaceConfig,
    pub expression: FacialExpression,
}

impl FaceItConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: FaceItConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };
        let f = &self.face;

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            ));
        }
        if self.window.width > MAX_WINDOW_SIDE || self.window.height > MAX_WINDOW_SIDE {
            return invalid(format!(
                "window size {}x{} exceeds {} per side",
                self.window.width, self.window.height, MAX_WINDOW_SIDE
            ));
        }
        for (name, v) in [
            ("face.scale", f.scale),
            ("face.line_width", f.line_width),
            ("face.min_scale", f.min_scale),
            ("face.max_scale", f.max_scale),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return invalid(format!("{} = {} must be a positive number", name, v));
            }
        }
        if f.min_scale > f.max_scale {
            return invalid(format!(
                "face.min_scale {} exceeds face.max_scale {}",
                f.min_scale, f.max_scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_expression::{Eyes, Mouth};
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = FaceItConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FaceItConfig::default());
        assert_eq!(cfg.face.scale, 0.9);
        assert_eq!(cfg.face.color, Color::RED);
        assert_eq!(cfg.expression, FacialExpression::new(Eyes::Closed, Mouth::Frown));
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = FaceItConfig::from_toml_str(
            r##"
            [face]
            color = "#0000FF"
            line_width = 3.0

            [expression]
            mouth = "grin"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.face.color, Color::rgb(0, 0, 0xFF));
        assert_eq!(cfg.face.line_width, 3.0);
        assert_eq!(cfg.face.scale, 0.9);
        assert_eq!(cfg.expression.mouth, Mouth::Grin);
        assert_eq!(cfg.expression.eyes, Eyes::Closed);
        assert_eq!(cfg.window.width, 600);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            FaceItConfig::from_toml_str("[face]\nmin_scale = 2.0\nmax_scale = 1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FaceItConfig::from_toml_str("[face]\nline_width = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FaceItConfig::from_toml_str("[window]\nwidth = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_oversized_window() {
        let at_limit = format!("[window]\nwidth = {0}\nheight = {0}", MAX_WINDOW_SIDE);
        assert!(FaceItConfig::from_toml_str(&at_limit).is_ok());

        for text in [
            "[window]\nwidth = 8193",
            "[window]\nheight = 1000000",
            "[window]\nwidth = 4294967296\nheight = 4294967296",
        ] {
            assert!(
                matches!(FaceItConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            FaceItConfig::from_toml_str("[expression]\nmouth = \"grimace\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            FaceItConfig::from_toml_str("[face]\ncolor = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            FaceItConfig::from_toml_str("[face]\nwobble = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 320\nheight = 240").unwrap();
        let cfg = FaceItConfig::load(file.path()).unwrap();
        assert_eq!((cfg.window.width, cfg.window.height), (320, 240));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FaceItConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn parameters_follow_expression() {
        let face = FaceConfig::default();
        let p = face.parameters(FacialExpression::new(Eyes::Open, Mouth::Smile));
        assert!(p.eyes_open);
        assert_eq!(p.mouth_curvature, 1.0);
        assert_eq!(p.line_width, 5.0);
    }
}
