/// Parsed GPX data containing all waypoints, routes, and tracks.
#[derive(Debug, Default)]
pub struct GpxData {
    pub waypoints: Vec<GpxPoint>,
    pub routes: Vec<GpxRoute>,
    pub tracks: Vec<GpxTrack>,
}

impl GpxData {
    /// All points of one kind, in document order.
    pub fn points_of(&self, kind: PointKind) -> Box<dyn Iterator<Item = &GpxPoint> + '_> {
        match kind {
            PointKind::TrackPoint => Box::new(
                self.tracks
                    .iter()
                    .flat_map(|trk| trk.segments.iter())
                    .flat_map(|seg| seg.points.iter()),
            ),
            PointKind::Waypoint => Box::new(self.waypoints.iter()),
            PointKind::RoutePoint => {
                Box::new(self.routes.iter().flat_map(|rte| rte.points.iter()))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        PointKind::ALL
            .iter()
            .all(|&kind| self.points_of(kind).next().is_none())
    }
}

/// The three GPX point elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    TrackPoint,
    Waypoint,
    RoutePoint,
}

impl PointKind {
    /// Scan order used for extent computation.
    pub const ALL: [PointKind; 3] = [
        PointKind::TrackPoint,
        PointKind::Waypoint,
        PointKind::RoutePoint,
    ];

    pub fn element_name(self) -> &'static str {
        match self {
            PointKind::TrackPoint => "trkpt",
            PointKind::Waypoint => "wpt",
            PointKind::RoutePoint => "rtept",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PointKind::TrackPoint => "Track Point",
            PointKind::Waypoint => "Waypoint",
            PointKind::RoutePoint => "Route Point",
        }
    }
}

/// A single GPX point (used for wpt, rtept, trkpt).
#[derive(Debug, Clone, PartialEq)]
pub struct GpxPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub time: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
}

impl GpxPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
            time: None,
            name: None,
            desc: None,
        }
    }
}

#[cfg(test)]
impl GpxPoint {
    pub(crate) fn with_ele(mut self, ele: f64) -> Self {
        self.ele = Some(ele);
        self
    }
}

/// A GPX route (<rte>).
#[derive(Debug, Default)]
pub struct GpxRoute {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub points: Vec<GpxPoint>,
}

/// A GPX track (<trk>).
#[derive(Debug, Default)]
pub struct GpxTrack {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub segments: Vec<GpxSegment>,
}

/// A GPX track segment (<trkseg>).
#[derive(Debug, Default)]
pub struct GpxSegment {
    pub points: Vec<GpxPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_of_each_kind() {
        let data = GpxData {
            waypoints: vec![GpxPoint::new(1.0, 1.0)],
            routes: vec![GpxRoute {
                points: vec![GpxPoint::new(2.0, 2.0), GpxPoint::new(3.0, 3.0)],
                ..Default::default()
            }],
            tracks: vec![GpxTrack {
                segments: vec![
                    GpxSegment {
                        points: vec![GpxPoint::new(4.0, 4.0)],
                    },
                    GpxSegment {
                        points: vec![GpxPoint::new(5.0, 5.0), GpxPoint::new(6.0, 6.0)],
                    },
                ],
                ..Default::default()
            }],
        };

        assert_eq!(data.points_of(PointKind::Waypoint).count(), 1);
        assert_eq!(data.points_of(PointKind::RoutePoint).count(), 2);
        let lats: Vec<f64> = data.points_of(PointKind::TrackPoint).map(|p| p.lat).collect();
        assert_eq!(lats, vec![4.0, 5.0, 6.0]);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_empty_data() {
        let data = GpxData {
            routes: vec![GpxRoute::default()],
            tracks: vec![GpxTrack::default()],
            ..Default::default()
        };
        assert!(data.is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PointKind::Waypoint.label(), "Waypoint");
        assert_eq!(PointKind::TrackPoint.label(), "Track Point");
        assert_eq!(PointKind::RoutePoint.label(), "Route Point");
        assert_eq!(PointKind::RoutePoint.element_name(), "rtept");
    }
}
