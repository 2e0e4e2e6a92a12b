use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::gpx_types::*;
use crate::style::{GeometryKind, StyleTable};

/// Convert parsed GPX data to a GeoJSON FeatureCollection, the way the tile
/// map reads GPX: waypoints become `Point`s, each route one `LineString`, each
/// track one `MultiLineString` with a line per segment.
pub fn to_feature_collection(data: &GpxData, styles: &StyleTable) -> FeatureCollection {
    let mut features = Vec::new();

    for wpt in &data.waypoints {
        let mut props = base_props("waypoint", &wpt.name, &wpt.desc);
        if let Some(ele) = wpt.ele.and_then(serde_json::Number::from_f64) {
            props.insert("ele".to_string(), JsonValue::Number(ele));
        }
        if let Some(ref time) = wpt.time {
            props.insert("time".to_string(), JsonValue::String(time.clone()));
        }
        features.push(styled_feature(Value::Point(point_coords(wpt)), props, styles));
    }

    for rte in &data.routes {
        if rte.points.is_empty() {
            continue;
        }
        let coords = rte.points.iter().map(point_coords).collect();
        let props = base_props("route", &rte.name, &rte.desc);
        features.push(styled_feature(Value::LineString(coords), props, styles));
    }

    for trk in &data.tracks {
        let lines: Vec<Vec<Vec<f64>>> = trk
            .segments
            .iter()
            .filter(|seg| !seg.points.is_empty())
            .map(|seg| seg.points.iter().map(point_coords).collect())
            .collect();
        if lines.is_empty() {
            continue;
        }
        let props = base_props("track", &trk.name, &trk.desc);
        features.push(styled_feature(Value::MultiLineString(lines), props, styles));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn styled_feature(
    value: Value,
    mut props: Map<String, JsonValue>,
    styles: &StyleTable,
) -> Feature {
    if let Some(style) = GeometryKind::of(&value)
        .and_then(|kind| serde_json::to_value(styles.style_for(kind)).ok())
    {
        props.insert("style".to_string(), style);
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn base_props(
    gpx_type: &str,
    name: &Option<String>,
    desc: &Option<String>,
) -> Map<String, JsonValue> {
    let mut props = Map::new();
    props.insert(
        "gpxType".to_string(),
        JsonValue::String(gpx_type.to_string()),
    );
    insert_optional(&mut props, "name", name);
    insert_optional(&mut props, "desc", desc);
    props
}

/// Build [lon, lat] or [lon, lat, ele] coordinate array.
fn point_coords(pt: &GpxPoint) -> Vec<f64> {
    match pt.ele {
        Some(ele) => vec![pt.lon, pt.lat, ele],
        None => vec![pt.lon, pt.lat],
    }
}

fn insert_optional(props: &mut Map<String, JsonValue>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.to_string(), JsonValue::String(v.clone()));
    }
}
