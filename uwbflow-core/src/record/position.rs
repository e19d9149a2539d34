//! Spatial position sub-object.

use serde::{Deserialize, Serialize};

/// A device position. Opaque to the pipeline: flatten and deserialize pass
/// it through by value, never recomputing or clamping coordinates.
///
/// Coordinate leaves tolerate numeric strings on the wire like every other
/// numeric telemetry field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub z: Option<f64>,
}

impl Position {
    /// Build a position only if at least one coordinate is present.
    pub fn from_leaves(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Option<Self> {
        if x.is_none() && y.is_none() && z.is_none() {
            None
        } else {
            Some(Self { x, y, z })
        }
    }
}
