use crate::types::Point;
use std::f64::consts::{PI, TAU};

/// Wrap an angle difference into (-PI, PI] so rotation takes the short way round
pub fn wrap_angle(mut angle: f64) -> f64 {
    angle = angle.rem_euclid(TAU);
    if angle > PI {
        angle -= TAU;
    }
    angle
}

/// Normalize an angle into (0, TAU]
pub fn normalize_rad(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > 0.0 { wrapped } else { TAU }
}

/// Shortest angular distance between two angles, in [0, PI]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    wrap_angle(a - b).abs()
}

/// Rotate a point about the origin by `angle` radians
pub fn rotate_point(angle: f64, point: Point) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point {
        x: point.x * cos - point.y * sin,
        y: point.x * sin + point.y * cos,
    }
}

/// Convert from degrees to radians
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert from radians to whole degrees, rounding down
pub fn rad_to_whole_deg(radians: f64) -> f64 {
    (360.0 * radians / TAU).floor()
}

/// Round to `digits` significant digits
pub fn to_precision(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}
