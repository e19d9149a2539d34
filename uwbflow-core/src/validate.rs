//! Validate Stage
//!
//! Enforces required-field and plausible-range rules on flat records. All
//! rules are evaluated independently and every violation is collected — the
//! stage never short-circuits and never panics; an empty list means the
//! record is valid. Out-of-range telemetry is an error, never a clamp.

use crate::constants::validation::{
    BATTERY_MAX_V, BATTERY_MIN_V, HEART_RATE_MAX_BPM, HEART_RATE_MIN_BPM, RSSI_MAX_DBM,
    RSSI_MIN_DBM, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};
use crate::record::{DeviceType, FlattenedAnchor, FlattenedGateway};

/// Exclusive-range check shared by every numeric rule. Absent fields pass.
fn check_open_range(
    errors: &mut Vec<String>,
    label: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
) {
    if let Some(v) = value {
        if !(v > min && v < max) {
            errors.push(format!("{label} out of range: {v}"));
        }
    }
}

fn check_identity(errors: &mut Vec<String>, id: &str, name: &str) {
    if id.is_empty() {
        errors.push("id is missing".to_owned());
    }
    if name.is_empty() {
        errors.push("name is missing".to_owned());
    }
}

fn check_device_type(errors: &mut Vec<String>, tag: Option<DeviceType>, expected: DeviceType) {
    // The tag is optional; only a contradicting tag is an error.
    if let Some(tag) = tag {
        if tag != expected {
            errors.push(format!("device_type must be {}", expected.as_str()));
        }
    }
}

/// Validate a flattened gateway. Returns every violated rule, in rule order.
pub fn validate_gateway(flat: &FlattenedGateway) -> Vec<String> {
    let mut errors = Vec::new();

    check_identity(&mut errors, &flat.id, &flat.name);
    check_device_type(&mut errors, flat.device_type, DeviceType::Gateway);
    check_open_range(&mut errors, "rssi", flat.rssi, RSSI_MIN_DBM, RSSI_MAX_DBM);
    check_open_range(
        &mut errors,
        "battery voltage",
        flat.battery_voltage,
        BATTERY_MIN_V,
        BATTERY_MAX_V,
    );

    errors
}

/// Validate a flattened anchor. Gateway rules plus the wearable telemetry
/// ranges (heart rate, body temperature).
pub fn validate_anchor(flat: &FlattenedAnchor) -> Vec<String> {
    let mut errors = Vec::new();

    check_identity(&mut errors, &flat.id, &flat.name);
    check_device_type(&mut errors, flat.device_type, DeviceType::Anchor);
    check_open_range(&mut errors, "rssi", flat.rssi, RSSI_MIN_DBM, RSSI_MAX_DBM);
    check_open_range(
        &mut errors,
        "battery voltage",
        flat.battery_voltage,
        BATTERY_MIN_V,
        BATTERY_MAX_V,
    );
    check_open_range(
        &mut errors,
        "heart rate",
        flat.heart_rate,
        HEART_RATE_MIN_BPM,
        HEART_RATE_MAX_BPM,
    );
    check_open_range(
        &mut errors,
        "temperature",
        flat.temperature,
        TEMPERATURE_MIN_C,
        TEMPERATURE_MAX_C,
    );

    errors
}
