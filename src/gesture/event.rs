use serde::{Deserialize, Serialize};

use crate::viewport::ViewportTransform;

/// A position in screen pixels, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Screen rectangle of the interactive element
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Raw input from the host surface
///
/// Touch events carry the touches still on the surface after the event,
/// like the DOM's `TouchEvent.touches`. Release events carry the id of the
/// feature the surface found under the pointer, if any.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        target: Option<String>,
    },
    PointerLeave,
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    TouchStart {
        touches: Vec<ScreenPoint>,
    },
    TouchMove {
        touches: Vec<ScreenPoint>,
    },
    TouchEnd {
        #[serde(default)]
        touches: Vec<ScreenPoint>,
        #[serde(default)]
        target: Option<String>,
    },
    TouchCancel,
    Resize {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    ZoomIn,
    ZoomOut,
    Reset,
}

/// Output of the controller for the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    FeatureClicked { id: String },
    TransformChanged { transform: ViewportTransform },
}

/// Callback-style consumer of [`MapEvent`]s
pub trait MapListener {
    fn on_feature_clicked(&mut self, _id: &str) {}
    fn on_transform_changed(&mut self, _transform: &ViewportTransform) {}
}

impl MapEvent {
    pub fn dispatch<L: MapListener + ?Sized>(&self, listener: &mut L) {
        match self {
            MapEvent::FeatureClicked { id } => listener.on_feature_clicked(id),
            MapEvent::TransformChanged { transform } => listener.on_transform_changed(transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_events() {
        let json = r#"[
            {"type": "pointer_down", "x": 10, "y": 20},
            {"type": "pointer_up", "x": 10, "y": 20, "target": "FRA"},
            {"type": "wheel", "x": 5, "y": 5, "delta_y": -120},
            {"type": "touch_start", "touches": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]},
            {"type": "touch_end"},
            {"type": "zoom_in"}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events.len(), 6);
        assert_eq!(
            events[1],
            InputEvent::PointerUp {
                x: 10.0,
                y: 20.0,
                target: Some("FRA".to_string())
            }
        );
        assert_eq!(
            events[4],
            InputEvent::TouchEnd {
                touches: vec![],
                target: None
            }
        );
        assert_eq!(events[5], InputEvent::ZoomIn);
    }

    #[test]
    fn test_dispatch() {
        #[derive(Default)]
        struct Clicks(Vec<String>);
        impl MapListener for Clicks {
            fn on_feature_clicked(&mut self, id: &str) {
                self.0.push(id.to_string());
            }
        }

        let mut clicks = Clicks::default();
        MapEvent::FeatureClicked {
            id: "JPN".to_string(),
        }
        .dispatch(&mut clicks);
        MapEvent::TransformChanged {
            transform: ViewportTransform::default(),
        }
        .dispatch(&mut clicks);
        assert_eq!(clicks.0, vec!["JPN".to_string()]);
    }

    #[test]
    fn test_screen_point_math() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(30.0, 40.0);
        assert_eq!(a.distance(&b), 50.0);
        assert_eq!(a.midpoint(&b), ScreenPoint::new(15.0, 20.0));
    }
}
