use serde::{Deserialize, Deserializer, Serialize};

use crate::gpx_types::{GpxData, GpxPoint, PointKind};

/// A `{lat, lng}` literal as map widgets take it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<&GpxPoint> for LatLng {
    fn from(pt: &GpxPoint) -> Self {
        Self {
            lat: pt.lat,
            lng: pt.lon,
        }
    }
}

/// Min/max latitude and longitude over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Extent {
    pub fn from_point(pt: &GpxPoint) -> Self {
        Self {
            min_lat: pt.lat,
            max_lat: pt.lat,
            min_lon: pt.lon,
            max_lon: pt.lon,
        }
    }

    pub fn extend(&mut self, pt: &GpxPoint) {
        self.min_lat = self.min_lat.min(pt.lat);
        self.max_lat = self.max_lat.max(pt.lat);
        self.min_lon = self.min_lon.min(pt.lon);
        self.max_lon = self.max_lon.max(pt.lon);
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.max_lat + self.min_lat) / 2.0,
            lng: (self.max_lon + self.min_lon) / 2.0,
        }
    }

    /// GeoJSON bbox order: `[west, south, east, north]`.
    pub fn to_bbox(&self) -> geojson::Bbox {
        vec![self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

/// Merge an extent over any point iterator, `None` when it yields nothing.
pub fn extent_of<'a>(points: impl IntoIterator<Item = &'a GpxPoint>) -> Option<Extent> {
    points.into_iter().fold(None, |acc, pt| match acc {
        None => Some(Extent::from_point(pt)),
        Some(mut extent) => {
            extent.extend(pt);
            Some(extent)
        }
    })
}

/// Extent over track points, waypoints and route points together.
pub fn data_extent(data: &GpxData) -> Option<Extent> {
    extent_of(PointKind::ALL.iter().flat_map(|&kind| data.points_of(kind)))
}

/// Where a map looks before (or instead of) fitting to data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl DefaultView {
    /// Fallback of the polyline widget when a file has no points.
    pub fn empty_track() -> Self {
        Self {
            lat: 49.327667,
            lon: -122.942333,
            zoom: 14,
        }
    }

    /// Initial view of the tile map before its layer loads.
    pub fn tile_map() -> Self {
        Self {
            lat: 8.82,
            lon: 37.41,
            zoom: 4,
        }
    }

    /// Deserialize a view where any of `lat`, `lon` and `zoom` may be
    /// omitted; omitted fields come from `base`.
    pub fn deserialize_onto<'de, D>(base: Self, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let partial = PartialView::deserialize(deserializer)?;
        Ok(Self {
            lat: partial.lat.unwrap_or(base.lat),
            lon: partial.lon.unwrap_or(base.lon),
            zoom: partial.zoom.unwrap_or(base.zoom),
        })
    }
}

#[derive(Deserialize)]
struct PartialView {
    lat: Option<f64>,
    lon: Option<f64>,
    zoom: Option<u8>,
}

impl Default for DefaultView {
    fn default() -> Self {
        Self::empty_track()
    }
}

/// Result of centering a map on a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Viewport {
    /// Center on the middle of the data and fit the bounds.
    Fit { center: LatLng, bounds: Extent },
    /// No points anywhere: fixed center and zoom.
    Default { center: LatLng, zoom: u8 },
}

pub fn center_and_zoom(data: &GpxData, default: &DefaultView) -> Viewport {
    match data_extent(data) {
        Some(bounds) => Viewport::Fit {
            center: bounds.center(),
            bounds,
        },
        None => Viewport::Default {
            center: LatLng {
                lat: default.lat,
                lng: default.lon,
            },
            zoom: default.zoom,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpx_types::{GpxRoute, GpxSegment, GpxTrack};
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_collection() {
        assert_eq!(extent_of(std::iter::empty::<&GpxPoint>()), None);

        let viewport = center_and_zoom(&GpxData::default(), &DefaultView::default());
        assert_eq!(
            viewport,
            Viewport::Default {
                center: LatLng {
                    lat: 49.327667,
                    lng: -122.942333
                },
                zoom: 14
            }
        );
    }

    #[test]
    fn test_single_point() {
        let pt = GpxPoint::new(46.5, 8.0);
        let extent = extent_of([&pt]).unwrap();
        assert_eq!(extent.min_lat, 46.5);
        assert_eq!(extent.max_lat, 46.5);
        assert_eq!(extent.min_lon, 8.0);
        assert_eq!(extent.max_lon, 8.0);
        assert_eq!(extent.center(), LatLng { lat: 46.5, lng: 8.0 });
    }

    #[test]
    fn test_merges_all_point_kinds() {
        let data = GpxData {
            waypoints: vec![GpxPoint::new(-10.0, 5.0)],
            routes: vec![GpxRoute {
                points: vec![GpxPoint::new(2.0, 40.0)],
                ..Default::default()
            }],
            tracks: vec![GpxTrack {
                segments: vec![GpxSegment {
                    points: vec![GpxPoint::new(1.0, 1.0), GpxPoint::new(3.0, -7.0)],
                }],
                ..Default::default()
            }],
        };

        let extent = data_extent(&data).unwrap();
        assert_eq!(extent.min_lat, -10.0);
        assert_eq!(extent.max_lat, 3.0);
        assert_eq!(extent.min_lon, -7.0);
        assert_eq!(extent.max_lon, 40.0);
        assert_eq!(extent.to_bbox(), vec![-7.0, -10.0, 40.0, 3.0]);

        match center_and_zoom(&data, &DefaultView::default()) {
            Viewport::Fit { center, bounds } => {
                assert_relative_eq!(center.lat, -3.5);
                assert_relative_eq!(center.lng, 16.5);
                assert_eq!(bounds, extent);
            }
            other => panic!("Expected Fit viewport, got {other:?}"),
        }
    }

    #[test]
    fn test_points_on_equator_are_not_empty() {
        let data = GpxData {
            waypoints: vec![GpxPoint::new(0.0, 0.0)],
            ..Default::default()
        };
        assert!(matches!(
            center_and_zoom(&data, &DefaultView::default()),
            Viewport::Fit { .. }
        ));
    }

    #[test]
    fn test_partial_view_fills_from_base() {
        let view = DefaultView::deserialize_onto(
            DefaultView::tile_map(),
            serde_json::json!({"lat": 46.0, "lon": 8.0}),
        )
        .unwrap();
        assert_eq!(
            view,
            DefaultView {
                lat: 46.0,
                lon: 8.0,
                zoom: 4
            }
        );

        let zoom_only = serde_json::json!({"zoom": 3});
        let view = DefaultView::deserialize_onto(DefaultView::empty_track(), zoom_only).unwrap();
        assert_eq!(view.lat, 49.327667);
        assert_eq!(view.zoom, 3);
    }

    #[test]
    fn test_viewport_json_shape() {
        let viewport = Viewport::Default {
            center: LatLng { lat: 1.5, lng: 2.5 },
            zoom: 14,
        };
        assert_eq!(
            serde_json::to_value(&viewport).unwrap(),
            serde_json::json!({"mode": "default", "center": {"lat": 1.5, "lng": 2.5}, "zoom": 14})
        );
    }
}
