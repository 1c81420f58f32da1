use std::fs;
use std::path::Path as FsPath;

use super::{Path, Surface};
use crate::config::StyleConfig;
use crate::domain::PlanePoint;
use crate::error::{MapError, Result};
use crate::viewport::ViewportTransform;

/// Renders the map into an SVG document
///
/// The projected map sits inside a group carrying the viewport transform,
/// so the `viewBox` always matches the logical canvas. Paths use the
/// even-odd fill rule so inner rings show as holes.
#[derive(Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    transform: ViewportTransform,
    style: StyleConfig,
    shapes: String,
    labels: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, transform: ViewportTransform, style: StyleConfig) -> Self {
        Self {
            width,
            height,
            transform,
            style,
            shapes: String::new(),
            labels: String::new(),
        }
    }

    /// Assemble the final document
    pub fn finish(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            self.width,
            self.height,
            escape(&self.style.background)
        ));
        svg.push_str(&format!(
            "<g transform=\"{}\">\n",
            self.transform.to_svg()
        ));
        svg.push_str(&self.shapes);
        if !self.labels.is_empty() {
            svg.push_str(
                r##"<g font-family="sans-serif" text-anchor="middle" dominant-baseline="middle" fill="#222">"##,
            );
            svg.push('\n');
            svg.push_str(&self.labels);
            svg.push_str("</g>\n");
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn draw_path(&mut self, id: &str, path: &Path, fill: &str, stroke_width: f64) {
        self.shapes.push_str(&format!(
            r#"<path id="{}" d="{}" fill="{}" fill-rule="evenodd" stroke="{}" stroke-width="{:.4}"/>"#,
            escape(id),
            path,
            escape(fill),
            escape(&self.style.stroke),
            stroke_width
        ));
        self.shapes.push('\n');
    }

    fn draw_label(&mut self, text: &str, at: PlanePoint, font_size: f64) {
        self.labels.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.4}">{}</text>"#,
            at.x,
            at.y,
            font_size,
            escape(text)
        ));
        self.labels.push('\n');
    }
}

/// Write an SVG document to disk
pub fn write_svg(path: &FsPath, svg: &str) -> Result<()> {
    fs::write(path, svg).map_err(|e| MapError::io(path, e))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feature, FeatureSet, GeoPoint, Geometry, HighlightSet, Ring};
    use crate::geometry::Projector;
    use crate::render::render_map;
    use tempfile::tempdir;

    fn sample() -> FeatureSet {
        FeatureSet::new(vec![Feature::new(
            "TTO",
            "Trinidad & Tobago",
            Geometry::Polygon(vec![Ring::new(vec![
                GeoPoint::new(-61.9, 10.0),
                GeoPoint::new(-60.9, 10.0),
                GeoPoint::new(-60.9, 11.0),
            ])]),
        )])
    }

    #[test]
    fn test_svg_document() {
        let transform = ViewportTransform::default().zoom_by(2.0, PlanePoint::default());
        let style = StyleConfig::default();
        let mut surface = SvgSurface::new(1000.0, 500.0, transform, style.clone());
        let visited: HighlightSet = ["TTO"].into_iter().collect();

        render_map(
            &mut surface,
            &sample(),
            &visited,
            &transform,
            &Projector::default(),
            &style,
        );
        let svg = surface.finish();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 1000 500""#));
        assert!(svg.contains("scale(2.0000)"));
        assert!(svg.contains(r#"id="TTO""#));
        assert!(svg.contains(&format!(r#"fill="{}""#, style.highlight_fill)));
        assert!(svg.contains("Trinidad &amp; Tobago"));
        assert!(svg.contains(r#"stroke-width="0.2500""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_write_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.svg");
        let surface = SvgSurface::new(
            1000.0,
            500.0,
            ViewportTransform::default(),
            StyleConfig::default(),
        );

        write_svg(&path, &surface.finish()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<rect"));
    }

    #[test]
    fn test_one_element_per_line() {
        let mut surface = SvgSurface::new(
            1000.0,
            500.0,
            ViewportTransform::default(),
            StyleConfig::default(),
        );
        surface.draw_path("A", &Path::default(), "#fff", 0.5);
        surface.draw_path("B", &Path::default(), "#fff", 0.5);
        surface.draw_label("Alpha", PlanePoint::new(10.0, 20.0), 12.0);

        let svg = surface.finish();
        let lines: Vec<&str> = svg.lines().collect();
        assert!(lines[0].starts_with("<svg "));
        assert!(lines[1].starts_with("<rect "));
        assert!(lines[2].starts_with("<g transform="));
        assert!(lines[3].starts_with(r#"<path id="A""#));
        assert!(lines[4].starts_with(r#"<path id="B""#));
        assert!(lines[6].starts_with("<text "));
        assert_eq!(lines.len(), 10);
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
