//! Elevation-versus-distance series and track statistics.
//!
//! Distances are in metres. Short hops use an equirectangular approximation,
//! hops longer than 0.2 degrees on either axis use haversine.

use serde::Serialize;

use crate::chart::ElevationSeries;
use crate::gpx_types::{GpxData, GpxPoint, GpxSegment};

const EARTH_RADIUS: f64 = 6_378_137.0;
const ONE_DEGREE: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS / 360.0;
const HAVERSINE_THRESHOLD: f64 = 0.2;

/// Horizontal distance between two points.
pub fn distance_2d(a: &GpxPoint, b: &GpxPoint) -> f64 {
    if (a.lat - b.lat).abs() > HAVERSINE_THRESHOLD || (a.lon - b.lon).abs() > HAVERSINE_THRESHOLD {
        return haversine(a, b);
    }
    let coef = a.lat.to_radians().cos();
    let x = a.lat - b.lat;
    let y = (a.lon - b.lon) * coef;
    (x * x + y * y).sqrt() * ONE_DEGREE
}

/// Distance including the elevation difference when both points have one.
pub fn distance_3d(a: &GpxPoint, b: &GpxPoint) -> f64 {
    let flat = distance_2d(a, b);
    match (a.ele, b.ele) {
        (Some(ea), Some(eb)) if ea != eb => (flat * flat + (ea - eb) * (ea - eb)).sqrt(),
        _ => flat,
    }
}

fn haversine(a: &GpxPoint, b: &GpxPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Walk every track point and pair the running distance with its elevation.
///
/// The distance keeps accumulating across segment and track boundaries, so
/// the series reads as one continuous profile.
pub fn elevation_profile(data: &GpxData) -> ElevationSeries {
    let mut series = Vec::new();
    let mut previous: Option<&GpxPoint> = None;
    let mut length = 0.0;

    for pt in data
        .tracks
        .iter()
        .flat_map(|trk| trk.segments.iter())
        .flat_map(|seg| seg.points.iter())
    {
        if let Some(prev) = previous {
            length += distance_2d(prev, pt);
        }
        previous = Some(pt);
        series.push((length, pt.ele));
    }

    series
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStats {
    pub length_2d: f64,
    pub length_3d: f64,
    pub uphill: f64,
    pub downhill: f64,
}

impl TrackStats {
    /// Sum over all track segments; gaps between segments are not counted.
    pub fn from_data(data: &GpxData) -> Self {
        data.tracks
            .iter()
            .flat_map(|trk| trk.segments.iter())
            .map(Self::from_segment)
            .fold(Self::default(), |acc, seg| Self {
                length_2d: acc.length_2d + seg.length_2d,
                length_3d: acc.length_3d + seg.length_3d,
                uphill: acc.uphill + seg.uphill,
                downhill: acc.downhill + seg.downhill,
            })
    }

    fn from_segment(segment: &GpxSegment) -> Self {
        let mut stats = Self::default();
        for pair in segment.points.windows(2) {
            stats.length_2d += distance_2d(&pair[0], &pair[1]);
            stats.length_3d += distance_3d(&pair[0], &pair[1]);
        }

        let elevations: Vec<f64> = segment.points.iter().filter_map(|pt| pt.ele).collect();
        for pair in smooth(&elevations).windows(2) {
            let delta = pair[1] - pair[0];
            if delta > 0.0 {
                stats.uphill += delta;
            } else {
                stats.downhill -= delta;
            }
        }

        stats
    }
}

/// 0.3/0.4/0.3 weighted average with both neighbours; the ends stay as is.
fn smooth(elevations: &[f64]) -> Vec<f64> {
    let last = elevations.len().saturating_sub(1);
    elevations
        .iter()
        .enumerate()
        .map(|(n, &ele)| {
            if n > 0 && n < last {
                elevations[n - 1] * 0.3 + ele * 0.4 + elevations[n + 1] * 0.3
            } else {
                ele
            }
        })
        .collect()
}
