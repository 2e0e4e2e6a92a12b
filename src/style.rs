use geojson::Value;
use serde::{Deserialize, Serialize};

/// Geometry kinds the tile map draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    MultiLineString,
}

impl GeometryKind {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Point(_) => Some(GeometryKind::Point),
            Value::LineString(_) => Some(GeometryKind::LineString),
            Value::MultiLineString(_) => Some(GeometryKind::MultiLineString),
            _ => None,
        }
    }
}

/// Omitted fields fall back to the map library's own default stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new("#3399CC", 1.25)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeatureStyle {
    Circle {
        #[serde(default = "default_radius")]
        radius: f64,
        #[serde(default = "default_fill")]
        fill: String,
        #[serde(default)]
        stroke: Stroke,
    },
    Line {
        #[serde(default)]
        stroke: Stroke,
    },
}

fn default_radius() -> f64 {
    5.0
}

fn default_fill() -> String {
    "rgba(255,255,255,0.4)".to_string()
}

/// One fixed style per geometry kind.
///
/// Serialized keyed by GeoJSON geometry type so a JS style callback can do
/// `styles[feature.getGeometry().getType()]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    #[serde(rename = "Point")]
    pub point: FeatureStyle,
    #[serde(rename = "LineString")]
    pub line_string: FeatureStyle,
    #[serde(rename = "MultiLineString")]
    pub multi_line_string: FeatureStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            point: FeatureStyle::Circle {
                radius: 5.0,
                fill: "rgba(255,255,0,0.4)".to_string(),
                stroke: Stroke::new("#ff0", 1.0),
            },
            line_string: FeatureStyle::Line {
                stroke: Stroke::new("#f00", 3.0),
            },
            multi_line_string: FeatureStyle::Line {
                stroke: Stroke::new("#0f0", 3.0),
            },
        }
    }
}

impl StyleTable {
    pub fn style_for(&self, kind: GeometryKind) -> &FeatureStyle {
        match kind {
            GeometryKind::Point => &self.point,
            GeometryKind::LineString => &self.line_string,
            GeometryKind::MultiLineString => &self.multi_line_string,
        }
    }
}
