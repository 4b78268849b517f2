//! # Transitions
//!
//! File: cli/src/common/diagram/transition.rs
//! Author: Christi Mahu
//!
//! Points, easing and link geometry shared by the scene and the SVG writer.
//!
use serde::Serialize;

/// A screen-space position. `x` is the axial (depth) offset, `y` the lateral one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation; `t` is expected in `0.0..=1.0`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Cubic ease-in-out, the default easing of the diagram transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Bezier control points matching `ease_cubic_in_out`, for SMIL `keySplines`.
pub const CUBIC_IN_OUT_SPLINE: &str = "0.65 0 0.35 1";

/// Fraction of a transition completed after `elapsed_ms`.
pub fn progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms as f64 / duration_ms as f64).min(1.0)
}

/// Movement of a single point over one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween {
    pub from: Point,
    pub to: Point,
}

impl Tween {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// A tween that stays at `at`.
    pub fn still(at: Point) -> Self {
        Self { from: at, to: at }
    }

    /// Eased position at `progress` (0.0 = start, 1.0 = end).
    pub fn at(&self, progress: f64) -> Point {
        self.from.lerp(self.to, ease_cubic_in_out(progress))
    }
}

/// Cubic link between two points with control points at the axial midpoint.
pub fn link_path(source: Point, target: Point) -> String {
    let mid = (source.x + target.x) / 2.0;
    format!(
        "M{},{}C{},{} {},{} {},{}",
        fmt_num(source.x),
        fmt_num(source.y),
        fmt_num(mid),
        fmt_num(source.y),
        fmt_num(mid),
        fmt_num(target.y),
        fmt_num(target.x),
        fmt_num(target.y)
    )
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}
