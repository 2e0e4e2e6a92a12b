use serde::Serialize;

use crate::extent::{LatLng, Viewport, center_and_zoom};
use crate::gpx_types::{GpxData, GpxPoint};
use crate::options::OverlayOptions;
use crate::parser::parse_gpx;
use crate::path::filter_min_delta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PathSource {
    TrackSegment,
    Route,
}

/// Options object for one polyline of the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub path: Vec<LatLng>,
    /// Elevation of each path point, for elevation hooks.
    pub elevations: Vec<Option<f64>>,
    pub stroke_color: String,
    pub stroke_weight: f64,
    pub source: PathSource,
}

/// Everything drawn on the polyline map widget for one GPX document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineOverlay {
    /// `None` leaves the widget at its initial view.
    pub viewport: Option<Viewport>,
    pub polylines: Vec<Polyline>,
}

impl PolylineOverlay {
    /// Build the overlay from the fetched GPX text, or `None` if the fetch failed.
    pub fn from_source(gpx: Option<&str>, opts: &OverlayOptions) -> Self {
        let data = match gpx.map(parse_gpx) {
            Some(Ok(data)) => data,
            Some(Err(err)) => {
                log::warn!("failed to parse GPX for the polyline map: {err}");
                return Self::unchanged();
            }
            None => {
                log::warn!("GPX source unavailable, leaving the polyline map untouched");
                return Self::unchanged();
            }
        };
        build_overlay(&data, opts)
    }

    fn unchanged() -> Self {
        Self {
            viewport: None,
            polylines: Vec::new(),
        }
    }
}

/// Center the widget and draw every track segment, then every route.
pub fn build_overlay(data: &GpxData, opts: &OverlayOptions) -> PolylineOverlay {
    let segments = data
        .tracks
        .iter()
        .flat_map(|trk| trk.segments.iter())
        .map(|seg| (PathSource::TrackSegment, seg.points.as_slice()));
    let routes = data
        .routes
        .iter()
        .map(|rte| (PathSource::Route, rte.points.as_slice()));

    let polylines: Vec<Polyline> = segments
        .chain(routes)
        .filter_map(|(source, points)| polyline(source, points, opts))
        .collect();

    log::debug!("polyline overlay with {} lines", polylines.len());

    PolylineOverlay {
        viewport: Some(center_and_zoom(data, &opts.default_view)),
        polylines,
    }
}

fn polyline(source: PathSource, points: &[GpxPoint], opts: &OverlayOptions) -> Option<Polyline> {
    if points.is_empty() {
        return None;
    }

    let kept = filter_min_delta(points, opts.min_track_point_delta);
    Some(Polyline {
        path: kept.iter().map(|&pt| LatLng::from(pt)).collect(),
        elevations: kept.iter().map(|pt| pt.ele).collect(),
        stroke_color: opts.track_colour.clone(),
        stroke_weight: opts.track_width,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;
    use serde_json::json;

    const TRACK_AND_ROUTE: &str = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <rte>
    <rtept lat="11.0" lon="21.0"/>
    <rtept lat="11.5" lon="21.5"/>
  </rte>
  <trk><trkseg>
    <trkpt lat="10.0" lon="20.0"><ele>100</ele></trkpt>
    <trkpt lat="10.00001" lon="20.00001"><ele>101</ele></trkpt>
    <trkpt lat="10.5" lon="20.5"><ele>150</ele></trkpt>
  </trkseg></trk>
</gpx>"#;

    #[test]
    fn test_tracks_then_routes() {
        let opts = OverlayOptions::default();
        let overlay = PolylineOverlay::from_source(Some(TRACK_AND_ROUTE), &opts);

        assert_eq!(overlay.polylines.len(), 2);
        let track = &overlay.polylines[0];
        assert_eq!(track.source, PathSource::TrackSegment);
        assert_eq!(
            track.path,
            vec![LatLng { lat: 10.0, lng: 20.0 }, LatLng { lat: 10.5, lng: 20.5 }]
        );
        assert_eq!(track.elevations, vec![Some(100.0), Some(150.0)]);
        assert_eq!(track.stroke_color, "#ff0000");
        assert_eq!(track.stroke_weight, 5.0);

        let route = &overlay.polylines[1];
        assert_eq!(route.source, PathSource::Route);
        assert_eq!(route.path.len(), 2);
        assert_eq!(route.elevations, vec![None, None]);
    }

    #[test]
    fn test_viewport_covers_routes_and_tracks() {
        let opts = OverlayOptions::default();
        let overlay = PolylineOverlay::from_source(Some(TRACK_AND_ROUTE), &opts);
        assert_eq!(
            overlay.viewport,
            Some(Viewport::Fit {
                center: LatLng { lat: 10.75, lng: 20.75 },
                bounds: Extent {
                    min_lat: 10.0,
                    max_lat: 11.5,
                    min_lon: 20.0,
                    max_lon: 21.5
                }
            })
        );
    }

    #[test]
    fn test_custom_delta_keeps_more_points() {
        let opts = OverlayOptions {
            min_track_point_delta: 0.000001,
            track_colour: "#00f".to_string(),
            ..Default::default()
        };
        let overlay = PolylineOverlay::from_source(Some(TRACK_AND_ROUTE), &opts);
        assert_eq!(overlay.polylines[0].path.len(), 3);
        assert_eq!(overlay.polylines[0].stroke_color, "#00f");
    }

    #[test]
    fn test_waypoints_only_centers_without_lines() {
        let xml = r#"<gpx version="1.1"><wpt lat="46.0" lon="8.0"/></gpx>"#;
        let overlay = PolylineOverlay::from_source(Some(xml), &OverlayOptions::default());
        assert!(overlay.polylines.is_empty());
        assert!(matches!(overlay.viewport, Some(Viewport::Fit { .. })));
    }

    #[test]
    fn test_empty_document_uses_default_view() {
        let xml = r#"<gpx version="1.1"><trk><trkseg/></trk></gpx>"#;
        let overlay = PolylineOverlay::from_source(Some(xml), &OverlayOptions::default());
        assert!(overlay.polylines.is_empty());
        assert_eq!(
            overlay.viewport,
            Some(Viewport::Default {
                center: LatLng {
                    lat: 49.327667,
                    lng: -122.942333
                },
                zoom: 14
            })
        );
    }

    #[test]
    fn test_failed_load_leaves_view() {
        assert_eq!(
            PolylineOverlay::from_source(None, &OverlayOptions::default()),
            PolylineOverlay {
                viewport: None,
                polylines: vec![]
            }
        );
        let broken =
            PolylineOverlay::from_source(Some("<gpx><trk></gpx>"), &OverlayOptions::default());
        assert_eq!(broken.viewport, None);
    }

    #[test]
    fn test_polyline_json_shape() {
        let line = Polyline {
            path: vec![LatLng { lat: 1.0, lng: 2.0 }],
            elevations: vec![None],
            stroke_color: "#ff0000".to_string(),
            stroke_weight: 5.0,
            source: PathSource::Route,
        };
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({
                "path": [{"lat": 1.0, "lng": 2.0}],
                "elevations": [null],
                "strokeColor": "#ff0000",
                "strokeWeight": 5.0,
                "source": "route"
            })
        );
    }
}
