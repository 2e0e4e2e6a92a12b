use crate::gpx_types::GpxPoint;

/// Thin out a segment for drawing.
///
/// The first point is always kept. Every later point is kept only if its
/// planar distance, in raw degrees, to the last *kept* point exceeds
/// `min_delta`. This is a greedy single pass without latitude correction.
pub fn filter_min_delta(points: &[GpxPoint], min_delta: f64) -> Vec<&GpxPoint> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut kept = vec![first];
    let mut last = first;
    for pt in rest {
        if degree_distance(last, pt) > min_delta {
            kept.push(pt);
            last = pt;
        }
    }

    kept
}

/// Euclidean distance in degree space.
pub fn degree_distance(a: &GpxPoint, b: &GpxPoint) -> f64 {
    let lat_diff = b.lat - a.lat;
    let lon_diff = b.lon - a.lon;
    (lat_diff * lat_diff + lon_diff * lon_diff).sqrt()
}
