//! Plausible Physical Ranges for Telemetry Fields
//!
//! The validate stage rejects (never clamps) readings outside these ranges.
//! All bounds are exclusive: a reading must satisfy `min < value < max`.
//! Fields that are absent from a record are not range-checked at all —
//! absence is handled by the required-field rules, not by these bounds.

/// Exclusive lower bound for a plausible RSSI reading, in dBm.
///
/// No real receiver reports anywhere near -200 dBm; values at or below this
/// indicate a decoding defect upstream, not a weak link.
pub const RSSI_MIN_DBM: f64 = -200.0;

/// Exclusive upper bound for a plausible RSSI reading, in dBm.
///
/// Received power is always negative relative to 1 mW for these radios;
/// zero or positive values mean the field was mis-scaled.
pub const RSSI_MAX_DBM: f64 = 0.0;

/// Exclusive lower bound for a plausible battery voltage, in volts.
pub const BATTERY_MIN_V: f64 = 2.0;

/// Exclusive upper bound for a plausible battery voltage, in volts.
pub const BATTERY_MAX_V: f64 = 5.0;

/// Exclusive lower bound for a plausible wearer heart rate, in bpm.
pub const HEART_RATE_MIN_BPM: f64 = 30.0;

/// Exclusive upper bound for a plausible wearer heart rate, in bpm.
pub const HEART_RATE_MAX_BPM: f64 = 200.0;

/// Exclusive lower bound for a plausible body temperature, in °C.
pub const TEMPERATURE_MIN_C: f64 = 35.0;

/// Exclusive upper bound for a plausible body temperature, in °C.
pub const TEMPERATURE_MAX_C: f64 = 42.0;
