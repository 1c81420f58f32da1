use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{MapError, Result};
use crate::geometry::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

fn default_width() -> f64 {
    DEFAULT_WIDTH
}
fn default_height() -> f64 {
    DEFAULT_HEIGHT
}
fn default_drag_threshold() -> f64 {
    2.0
}
fn default_wheel_zoom_in() -> f64 {
    1.1
}
fn default_wheel_zoom_out() -> f64 {
    0.9
}
fn default_button_zoom_factor() -> f64 {
    1.5
}
fn default_fill() -> String {
    "#d8dee9".to_string()
}
fn default_highlight_fill() -> String {
    "#4c9a6a".to_string()
}
fn default_stroke() -> String {
    "#ffffff".to_string()
}
fn default_stroke_width() -> f64 {
    0.5
}
fn default_font_size() -> f64 {
    4.0
}
fn default_background() -> String {
    "#a9cce3".to_string()
}
fn default_labels() -> bool {
    true
}
fn default_name_property() -> String {
    "name".to_string()
}

/// Logical canvas size in plane units
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl CanvasConfig {
    /// Both sides are finite and positive
    pub fn is_valid(&self) -> bool {
        let usable = |side: f64| side > 0.0 && side.is_finite();
        usable(self.width) && usable(self.height)
    }
}

/// Gesture tuning
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Movement in screen pixels (either axis) that turns a press into a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    #[serde(default = "default_wheel_zoom_in")]
    pub wheel_zoom_in: f64,
    #[serde(default = "default_wheel_zoom_out")]
    pub wheel_zoom_out: f64,
    /// Factor applied by the zoom-in button (zoom-out uses its inverse)
    #[serde(default = "default_button_zoom_factor")]
    pub button_zoom_factor: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: default_drag_threshold(),
            wheel_zoom_in: default_wheel_zoom_in(),
            wheel_zoom_out: default_wheel_zoom_out(),
            button_zoom_factor: default_button_zoom_factor(),
        }
    }
}

/// Colors and screen-constant sizes used when drawing
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StyleConfig {
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_highlight_fill")]
    pub highlight_fill: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    /// Stroke width at zoom 1; divided by the zoom scale when drawn
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Label font size at zoom 1; divided by the zoom scale when drawn
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_labels")]
    pub labels: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            highlight_fill: default_highlight_fill(),
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
            font_size: default_font_size(),
            background: default_background(),
            labels: default_labels(),
        }
    }
}

/// How features are read out of GeoJSON
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Property used as the id when the feature has no top-level `id`
    #[serde(default)]
    pub id_property: Option<String>,
    #[serde(default = "default_name_property")]
    pub name_property: String,
    /// Display name replacements, keyed by the name found in the data
    #[serde(default)]
    pub renames: HashMap<String, String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            id_property: None,
            name_property: default_name_property(),
            renames: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl FileConfig {
    /// Search the usual locations and load the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => {
                    warn!("Failed to load config file {}: {}", path.display(), e);
                }
            }
        }
        None
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("visitmap.toml"));
    paths.push(PathBuf::from(".visitmap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("visitmap").join("config.toml"));
        paths.push(config_dir.join("visitmap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".visitmap.toml"));
        paths.push(home.join(".config").join("visitmap").join("config.toml"));
    }

    paths
}
