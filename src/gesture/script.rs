use std::path::Path;

use log::debug;

use super::{GestureController, InputEvent, MapEvent};
use crate::error::{MapError, Result};
use crate::render::HitTester;

/// Parse a recorded gesture script (a JSON array of input events)
pub fn parse_script(json: &str) -> Result<Vec<InputEvent>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> Result<Vec<InputEvent>> {
    let contents = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
    parse_script(&contents)
}

/// Feed recorded events through a controller
///
/// Release events that carry no target are resolved against `hits` at the
/// release position, standing in for the surface's own hit testing.
pub fn replay(
    controller: &mut GestureController,
    events: &[InputEvent],
    hits: Option<&HitTester>,
) -> Vec<MapEvent> {
    let mut output = Vec::new();

    for event in events {
        let resolved = match (event, hits) {
            (InputEvent::PointerUp { x, y, target: None }, Some(hits)) => {
                let canvas = controller.to_canvas(super::ScreenPoint::new(*x, *y));
                InputEvent::PointerUp {
                    x: *x,
                    y: *y,
                    target: hits
                        .hit_test(canvas, &controller.transform())
                        .map(str::to_string),
                }
            }
            (
                InputEvent::TouchEnd {
                    touches,
                    target: None,
                },
                Some(hits),
            ) if touches.is_empty() => {
                let target = controller.state().last.and_then(|last| {
                    hits.hit_test(controller.to_canvas(last), &controller.transform())
                        .map(str::to_string)
                });
                InputEvent::TouchEnd {
                    touches: Vec::new(),
                    target,
                }
            }
            _ => event.clone(),
        };

        let produced = controller.handle(&resolved);
        debug!("{:?} -> {} map event(s)", resolved, produced.len());
        output.extend(produced);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasConfig, GestureConfig};
    use crate::domain::{Feature, FeatureSet, GeoPoint, Geometry, Ring};
    use crate::geometry::Projector;
    use std::fs;
    use tempfile::tempdir;

    fn hits() -> HitTester {
        // Covers canvas x 500..750, y 125..250 at identity
        let features = FeatureSet::new(vec![Feature::new(
            "NE",
            "North-East",
            Geometry::Polygon(vec![Ring::new(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(90.0, 0.0),
                GeoPoint::new(90.0, 45.0),
                GeoPoint::new(0.0, 45.0),
            ])]),
        )]);
        HitTester::new(&features, &Projector::default())
    }

    fn controller() -> GestureController {
        GestureController::new(GestureConfig::default(), CanvasConfig::default())
    }

    #[test]
    fn test_replay_resolves_targets() {
        let events = parse_script(
            r#"[
                {"type": "pointer_down", "x": 600, "y": 200},
                {"type": "pointer_up", "x": 600, "y": 200},
                {"type": "pointer_down", "x": 100, "y": 100},
                {"type": "pointer_up", "x": 100, "y": 100}
            ]"#,
        )
        .unwrap();

        let hits = hits();
        let mut c = controller();
        let output = replay(&mut c, &events, Some(&hits));
        assert_eq!(
            output,
            vec![MapEvent::FeatureClicked {
                id: "NE".to_string()
            }]
        );
    }

    #[test]
    fn test_replay_touch_tap() {
        let events = parse_script(
            r#"[
                {"type": "touch_start", "touches": [{"x": 700, "y": 150}]},
                {"type": "touch_end", "touches": []}
            ]"#,
        )
        .unwrap();

        let hits = hits();
        let output = replay(&mut controller(), &events, Some(&hits));
        assert_eq!(
            output,
            vec![MapEvent::FeatureClicked {
                id: "NE".to_string()
            }]
        );
    }

    #[test]
    fn test_replay_keeps_explicit_target() {
        let events = vec![
            InputEvent::PointerDown { x: 1.0, y: 1.0 },
            InputEvent::PointerUp {
                x: 1.0,
                y: 1.0,
                target: Some("ATA".to_string()),
            },
        ];
        let hits = hits();
        let output = replay(&mut controller(), &events, Some(&hits));
        assert_eq!(
            output,
            vec![MapEvent::FeatureClicked {
                id: "ATA".to_string()
            }]
        );
    }

    #[test]
    fn test_load_script() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, r#"[{"type": "zoom_in"}, {"type": "reset"}]"#).unwrap();

        let events = load_script(&path).unwrap();
        assert_eq!(events, vec![InputEvent::ZoomIn, InputEvent::Reset]);

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_script(&path), Err(MapError::Json(_))));
    }
}
