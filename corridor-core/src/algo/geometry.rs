//! Bearings, angle folding and flat-earth distances

use geo::{Bearing, Coord, Haversine, LineString, Point};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle bearing from `from` to `to` in degrees
pub fn bearing(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.bearing(Point::from(from), Point::from(to))
}

/// Bearing of the first segment; 0 when the line has fewer than two points
pub fn entry_bearing(line: &LineString<f64>) -> f64 {
    match line.0.as_slice() {
        [first, second, ..] => bearing(*first, *second),
        _ => 0.0,
    }
}

/// Bearing of the last segment; 0 when the line has fewer than two points
pub fn exit_bearing(line: &LineString<f64>) -> f64 {
    match line.0.as_slice() {
        [.., second_last, last] => bearing(*second_last, *last),
        _ => 0.0,
    }
}

/// Absolute difference of two bearings folded into `[0, 180]`
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Distance in meters from `point` to the line through `start` and `end`.
///
/// Uses an equirectangular projection around the chord's mid-latitude, which
/// is accurate at corridor scales but not globally. A degenerate chord falls
/// back to the distance from `start`.
pub fn perpendicular_distance_meters(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let mid_lat = ((start.y + end.y) / 2.0).to_radians();
    let project = |c: Coord<f64>| {
        (
            c.x.to_radians() * mid_lat.cos() * EARTH_RADIUS_METERS,
            c.y.to_radians() * EARTH_RADIUS_METERS,
        )
    };

    let (px, py) = project(point);
    let (sx, sy) = project(start);
    let (ex, ey) = project(end);

    let dx = ex - sx;
    let dy = ey - sy;
    let chord = dx.hypot(dy);
    if chord == 0.0 {
        return (px - sx).hypot(py - sy);
    }
    ((px - sx) * dy - (py - sy) * dx).abs() / chord
}
