// Dashboard configuration and generated output
use super::widget::Properties;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANVAS_WIDTH: f64 = 1920.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1080.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// One placed widget. Coordinates and sizes are pixels, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub properties: Properties,
    /// Builder-only fields, kept so a load/save cycle is lossless.
    #[serde(flatten)]
    pub extra: Properties,
}

impl WidgetInstance {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            properties: Properties::new(),
            extra: Properties::new(),
        }
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub canvas: Canvas,
    /// Document order; later widgets stack above earlier ones.
    #[serde(default)]
    pub widgets: Vec<WidgetInstance>,
    #[serde(flatten)]
    pub extra: Properties,
}

impl DashboardConfig {
    pub fn new(canvas: Canvas, widgets: Vec<WidgetInstance>) -> Self {
        Self {
            canvas,
            widgets,
            extra: Properties::new(),
        }
    }
}

/// The three exported artifacts plus the README.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedOutput {
    pub html: String,
    pub css: String,
    pub js: String,
    pub readme: String,
}
