//! # Viewport (pan/zoom)
//!
//! File: cli/src/common/diagram/viewport.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The pan/zoom transform applied to the whole diagram group. It is independent
//! of layout and animation: panning or zooming never triggers a redraw, it only
//! changes the `transform` attribute of the outer group. Scale is clamped to
//! `ZoomBounds` (0.25x to 4x by default).
//!
use super::transition::{fmt_num, Point};
use serde::{Deserialize, Serialize};

/// Inclusive scale range for zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.25, max: 4.0 }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub translate: Point,
    pub scale: f64,
    #[serde(skip)]
    bounds: ZoomBounds,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl Viewport {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            translate: Point::default(),
            scale: 1.0,
            bounds,
        }
    }

    /// Replaces the bounds and re-clamps the current scale.
    pub fn set_bounds(&mut self, bounds: ZoomBounds) {
        self.bounds = bounds;
        self.scale = bounds.clamp(self.scale);
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        self.translate = Point::default();
        self.scale = 1.0;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.translate.x += dx;
        self.translate.y += dy;
    }

    /// Multiplies the scale by `factor`, keeping the screen point `focus` fixed.
    pub fn zoom_by(&mut self, factor: f64, focus: Point) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom_to(self.scale * factor, focus);
    }

    /// Sets an absolute scale (clamped), keeping `focus` fixed on screen.
    pub fn zoom_to(&mut self, scale: f64, focus: Point) {
        let next = self.bounds.clamp(scale);
        let ratio = next / self.scale;
        self.translate = Point::new(
            focus.x - (focus.x - self.translate.x) * ratio,
            focus.y - (focus.y - self.translate.y) * ratio,
        );
        self.scale = next;
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            fmt_num(self.translate.x),
            fmt_num(self.translate.y),
            fmt_num(self.scale)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_by(100.0, Point::default());
        assert_eq!(viewport.scale, 4.0);
        viewport.zoom_by(0.0001, Point::default());
        assert_eq!(viewport.scale, 0.25);
        viewport.zoom_by(-2.0, Point::default());
        assert_eq!(viewport.scale, 0.25);
    }

    #[test]
    fn test_zoom_keeps_focus_fixed() {
        let mut viewport = Viewport::default();
        viewport.pan(10.0, 20.0);
        let focus = Point::new(300.0, 200.0);
        let under_focus = Point::new(
            (focus.x - viewport.translate.x) / viewport.scale,
            (focus.y - viewport.translate.y) / viewport.scale,
        );
        viewport.zoom_by(2.0, focus);
        let mapped = Point::new(
            under_focus.x * viewport.scale + viewport.translate.x,
            under_focus.y * viewport.scale + viewport.translate.y,
        );
        assert!((mapped.x - focus.x).abs() < 1e-9);
        assert!((mapped.y - focus.y).abs() < 1e-9);
    }

    #[test]
    fn test_transform_string_and_reset() {
        let mut viewport = Viewport::default();
        viewport.pan(12.5, -4.0);
        viewport.zoom_to(2.0, Point::default());
        assert_eq!(viewport.transform(), "translate(25,-8) scale(2)");
        viewport.reset();
        assert_eq!(viewport.transform(), "translate(0,0) scale(1)");
    }

    #[test]
    fn test_set_bounds_reclamps() {
        let mut viewport = Viewport::default();
        viewport.zoom_to(3.0, Point::default());
        viewport.set_bounds(ZoomBounds { min: 0.5, max: 2.0 });
        assert_eq!(viewport.scale, 2.0);
    }
}
