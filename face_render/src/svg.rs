//! SVG output, for rendering a face without a window.

use std::fmt::Write;

use kurbo::{BezPath, Rect};

use crate::color::Color;
use crate::surface::Surface;

/// Accumulates stroked paths and renders them as one SVG document.
pub struct SvgSurface {
    width:      f64,
    height:     f64,
    background: Option<Color>,
    color:      Color,
    elements:   Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width: width.max(0.0),
            height: height.max(0.0),
            background: None,
            color: Color::RED,
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn path_count(&self) -> usize {
        self.elements.len()
    }

    /// The complete SVG document.
    pub fn document(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        if let Some(bg) = self.background {
            let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.hex_rgb());
        }
        for e in &self.elements {
            let _ = writeln!(out, "  {}", e);
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn stroke_path(&mut self, path: &BezPath, line_width: f64) {
        let mut el = format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
            path.to_svg(),
            self.color.hex_rgb(),
            fmt_num(line_width),
        );
        if self.color.a != 0xFF {
            let _ = write!(el, r#" stroke-opacity="{:.3}""#, self.color.opacity());
        }
        el.push_str("/>");
        self.elements.push(el);
    }
}

/// Up to three decimals, trailing zeros dropped.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceView;

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(5.0), "5");
        assert_eq!(fmt_num(16.666666), "16.667");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(2.5), "2.5");
    }

    #[test]
    fn stroke_writes_path_data_and_style() {
        let mut p = BezPath::new();
        p.move_to((0.0, 1.0));
        p.line_to((2.0, 1.0));
        p.curve_to((4.0, 3.0), (6.0, 3.0), (9.0, 1.0));

        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.set_color(Color::rgba(0, 0, 255, 0x80));
        svg.stroke_path(&p, 1.5);

        let doc = svg.document();
        assert!(doc.contains(&format!(r#"d="{}""#, p.to_svg())));
        assert!(doc.contains(r##"stroke="#0000ff""##));
        assert!(doc.contains(r#"stroke-width="1.5""#));
        assert!(doc.contains(r#"stroke-opacity="0.502""#));
    }

    #[test]
    fn circles_are_written_as_cubics() {
        let mut view = FaceView::default();
        view.set_eyes_open(true);
        let mut svg = SvgSurface::new(100.0, 100.0);
        view.draw(&mut svg);
        let skull = &svg.elements[0];
        assert!(skull.contains('C'));
        assert!(!skull.contains('A'));
    }

    #[test]
    fn face_document_has_four_paths() {
        let mut svg = SvgSurface::new(300.0, 200.0).with_background(Color::WHITE);
        let mut view = FaceView::default();
        view.draw(&mut svg);
        let doc = svg.document();
        assert_eq!(doc.matches("<path ").count(), 4);
        assert!(doc.contains(r##"stroke="#ff0000""##));
        assert!(doc.contains(r#"stroke-width="5""#));
        assert!(doc.contains(r##"fill="#ffffff""##));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
