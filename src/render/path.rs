use std::fmt;

use crate::domain::{Feature, PlanePoint, Ring};
use crate::geometry::Projector;

/// A single drawing instruction in plane units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(PlanePoint),
    LineTo(PlanePoint),
    Close,
}

/// A drawable boundary made of closed subpaths, one per ring
///
/// An empty path means there is nothing to draw for the feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of closed subpaths
    pub fn subpaths(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Close))
            .count()
    }

    fn trace(&mut self, points: &[PlanePoint]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.commands.push(PathCommand::MoveTo(*first));
        self.commands
            .extend(rest.iter().map(|&p| PathCommand::LineTo(p)));
        self.commands.push(PathCommand::Close);
    }
}

/// Formats as SVG path data, e.g. `M10 20L30 40L10 40Z`
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => write!(f, "M{}", format_point(p))?,
                PathCommand::LineTo(p) => write!(f, "L{}", format_point(p))?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

fn format_point(p: &PlanePoint) -> String {
    format!("{} {}", format_coord(p.x), format_coord(p.y))
}

/// Two decimals, without trailing zeros
fn format_coord(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Build the boundary path of a feature
///
/// Rings are traced in the order given (outer ring first, then holes,
/// polygon by polygon); hole rendering is left to the fill rule of the
/// surface. Malformed points are skipped, rings left with fewer than three
/// points are dropped, and a feature without geometry yields an empty path.
pub fn build_path(feature: &Feature, projector: &Projector) -> Path {
    let mut path = Path::default();

    let Some(geometry) = &feature.geometry else {
        return path;
    };

    for ring in geometry.rings() {
        trace_ring(&mut path, ring, projector);
    }

    path
}

fn trace_ring(path: &mut Path, ring: &Ring, projector: &Projector) {
    let projected = projector.project_ring(ring);
    if projected.len() < crate::domain::feature::MIN_RING_POINTS {
        return;
    }
    path.trace(&projected);
}
