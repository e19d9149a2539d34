//! Floor-Plan Coordinate Calibration
//!
//! Maps between a floor-plan image's pixel space and real-world meters. The
//! mapping is anchored by an origin pixel, an origin real-world location
//! (defaulting to (0,0)), and a scalar pixels-per-meter ratio derived from
//! two user-picked points a known real distance apart.
//!
//! Image coordinates grow downward while physical coordinates grow upward,
//! so the Y axis is inverted in both directions. Given the same calibration,
//! [`Calibration::pixel_to_meter`] and [`Calibration::meter_to_pixel`] are
//! exact mathematical inverses up to floating-point rounding.
//!
//! A [`Calibration`] is a small `Copy` value; update it by replacing the
//! whole snapshot rather than mutating fields in place, so concurrent
//! readers never observe a torn state.

use serde::{Deserialize, Serialize};

use crate::errors::CalibrationError;

/// A 2D point, in either pixel or meter space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Per-floor-plan calibration snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Pixel location that maps to `origin_real`.
    pub origin_pixel: Point,
    /// Real-world location of the origin, in meters.
    pub origin_real: Point,
    /// Scale: how many image pixels span one real-world meter.
    pub pixels_per_meter: f64,
    /// Whether the snapshot is usable; conversions on an uncalibrated
    /// snapshot yield `None`.
    pub calibrated: bool,
}

impl Default for Calibration {
    /// An uncalibrated snapshot: conversions return `None` until a real
    /// calibration replaces it.
    fn default() -> Self {
        Self {
            origin_pixel: Point::default(),
            origin_real: Point::default(),
            pixels_per_meter: 0.0,
            calibrated: false,
        }
    }
}

impl Calibration {
    /// Build a calibration from an explicit ratio.
    pub fn new(
        origin_pixel: Point,
        origin_real: Option<Point>,
        pixels_per_meter: f64,
    ) -> Result<Self, CalibrationError> {
        if !(pixels_per_meter.is_finite() && pixels_per_meter > 0.0) {
            return Err(CalibrationError::InvalidRatio(pixels_per_meter));
        }
        Ok(Self {
            origin_pixel,
            origin_real: origin_real.unwrap_or_default(),
            pixels_per_meter,
            calibrated: true,
        })
    }

    /// Build a calibration from two user-picked pixel points and the
    /// user-entered real-world distance between them, in meters.
    pub fn from_scale_points(
        origin_pixel: Point,
        origin_real: Option<Point>,
        point1: Point,
        point2: Point,
        real_distance_m: f64,
    ) -> Result<Self, CalibrationError> {
        if !(real_distance_m.is_finite() && real_distance_m > 0.0) {
            return Err(CalibrationError::NonPositiveDistance(real_distance_m));
        }
        let pixel_span = point1.distance_to(point2);
        if pixel_span == 0.0 {
            return Err(CalibrationError::CoincidentScalePoints);
        }
        Self::new(origin_pixel, origin_real, pixel_span / real_distance_m)
    }

    /// Convert an image pixel location to real-world meters. `None` when
    /// uncalibrated.
    pub fn pixel_to_meter(&self, p: Point) -> Option<Point> {
        if !self.calibrated {
            return None;
        }
        Some(Point {
            x: self.origin_real.x + (p.x - self.origin_pixel.x) / self.pixels_per_meter,
            y: self.origin_real.y + (self.origin_pixel.y - p.y) / self.pixels_per_meter,
        })
    }

    /// Convert a real-world location in meters to image pixels. `None` when
    /// uncalibrated.
    pub fn meter_to_pixel(&self, m: Point) -> Option<Point> {
        if !self.calibrated {
            return None;
        }
        Some(Point {
            x: self.origin_pixel.x + (m.x - self.origin_real.x) * self.pixels_per_meter,
            y: self.origin_pixel.y - (m.y - self.origin_real.y) * self.pixels_per_meter,
        })
    }
}
