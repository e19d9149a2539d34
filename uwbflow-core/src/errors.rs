//! Error Types
//!
//! The pipeline itself reports failures as data (per-device error lists in a
//! [`crate::pipeline::PipelineReport`]), never as `Err` — noisy telemetry is
//! the normal case, not the exceptional one. The only fallible operation
//! with real preconditions is building a map calibration, which gets its own
//! error enum here.

use thiserror::Error;

/// Why a calibration could not be established.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    /// The user-entered real-world distance between the scale points must be
    /// strictly positive.
    #[error("real-world distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    /// The two picked scale points coincide, so no scale can be derived.
    #[error("scale points are coincident, cannot derive a scale")]
    CoincidentScalePoints,

    /// A directly supplied pixels-per-meter ratio must be positive and
    /// finite.
    #[error("pixels-per-meter ratio must be positive and finite, got {0}")]
    InvalidRatio(f64),
}
