pub mod hit;
pub mod label;
pub mod path;
pub mod svg;

pub use hit::HitTester;
pub use label::anchor_point;
pub use path::{Path, PathCommand, build_path};
pub use svg::{SvgSurface, write_svg};

use log::debug;

use crate::config::StyleConfig;
use crate::domain::{FeatureSet, HighlightSet, PlanePoint};
use crate::geometry::Projector;
use crate::viewport::ViewportTransform;

/// Something the map can be drawn onto
///
/// Sizes passed here are already in plane units, i.e. divided by the zoom
/// scale so they look constant on screen.
pub trait Surface {
    fn draw_path(&mut self, id: &str, path: &Path, fill: &str, stroke_width: f64);
    fn draw_label(&mut self, text: &str, at: PlanePoint, font_size: f64);
}

/// Summary of one render pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
    pub highlighted: usize,
    pub labels: usize,
}

/// Draw every feature, then every label on top
///
/// Features whose path is empty are skipped silently.
pub fn render_map<S: Surface>(
    surface: &mut S,
    features: &FeatureSet,
    highlights: &HighlightSet,
    transform: &ViewportTransform,
    projector: &Projector,
    style: &StyleConfig,
) -> RenderStats {
    let mut stats = RenderStats::default();
    let stroke_width = transform.scaled(style.stroke_width);

    for feature in features.iter() {
        let path = build_path(feature, projector);
        if path.is_empty() {
            debug!("Nothing to draw for {}", feature.id);
            stats.skipped += 1;
            continue;
        }

        let fill = if highlights.contains(&feature.id) {
            stats.highlighted += 1;
            &style.highlight_fill
        } else {
            &style.fill
        };
        surface.draw_path(&feature.id, &path, fill, stroke_width);
        stats.drawn += 1;
    }

    if style.labels {
        let font_size = transform.scaled(style.font_size);
        for feature in features.iter() {
            if let Some(anchor) = anchor_point(feature, projector) {
                surface.draw_label(&feature.name, anchor, font_size);
                stats.labels += 1;
            }
        }
    }

    stats
}
