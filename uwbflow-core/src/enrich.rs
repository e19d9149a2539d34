//! Enrich Stage
//!
//! Derives categorical fields from numeric telemetry already present on a
//! flat record and re-stamps the processing timestamp. Enrich never fails
//! and is idempotent except for the timestamp: running it twice cannot
//! change `signal_quality` (only filled when absent) and recomputes
//! `battery_level` to the same tier.

use chrono::Utc;

use crate::classify::{battery_level, signal_quality};
use crate::record::{FlattenedAnchor, FlattenedGateway};

/// Enrich a flattened gateway: derive `signal_quality` when the vendor did
/// not report one and RSSI is present, and (re)derive `battery_level` from
/// voltage whenever voltage is present.
pub fn enrich_gateway(mut flat: FlattenedGateway) -> FlattenedGateway {
    flat.processing_timestamp = Some(Utc::now());

    if flat.signal_quality.is_none() {
        if let Some(rssi) = flat.rssi {
            flat.signal_quality = Some(signal_quality(rssi).as_str().to_owned());
        }
    }

    if let Some(voltage) = flat.battery_voltage {
        flat.battery_level = Some(battery_level(voltage));
    }

    flat
}

/// Enrich a flattened anchor. The anchor wire shape carries no
/// `signal_quality` field, so only `battery_level` is derived.
pub fn enrich_anchor(mut flat: FlattenedAnchor) -> FlattenedAnchor {
    flat.processing_timestamp = Some(Utc::now());

    if let Some(voltage) = flat.battery_voltage {
        flat.battery_level = Some(battery_level(voltage));
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BatteryLevel;

    #[test]
    fn derives_signal_quality_when_absent() {
        let flat = FlattenedGateway {
            rssi: Some(-55.0),
            ..Default::default()
        };
        let enriched = enrich_gateway(flat);
        assert_eq!(enriched.signal_quality.as_deref(), Some("excellent"));
    }

    #[test]
    fn vendor_signal_quality_is_preserved() {
        let flat = FlattenedGateway {
            rssi: Some(-95.0),
            signal_quality: Some("good".into()),
            ..Default::default()
        };
        let enriched = enrich_gateway(flat);
        assert_eq!(enriched.signal_quality.as_deref(), Some("good"));
    }

    #[test]
    fn battery_level_is_overwritten_from_voltage() {
        let flat = FlattenedGateway {
            battery_voltage: Some(3.7),
            battery_level: Some(BatteryLevel::Critical),
            ..Default::default()
        };
        let enriched = enrich_gateway(flat);
        assert_eq!(enriched.battery_level, Some(BatteryLevel::Medium));
    }

    #[test]
    fn no_telemetry_derives_nothing() {
        let enriched = enrich_gateway(FlattenedGateway::default());
        assert_eq!(enriched.signal_quality, None);
        assert_eq!(enriched.battery_level, None);
        assert!(enriched.processing_timestamp.is_some());
    }

    #[test]
    fn idempotent_apart_from_timestamp() {
        let flat = FlattenedGateway {
            rssi: Some(-72.0),
            battery_voltage: Some(2.8),
            ..Default::default()
        };
        let once = enrich_gateway(flat);
        let twice = enrich_gateway(once.clone());
        assert_eq!(once.signal_quality, twice.signal_quality);
        assert_eq!(once.battery_level, twice.battery_level);
    }

    #[test]
    fn anchor_enrich_derives_battery_only() {
        let flat = FlattenedAnchor {
            battery_voltage: Some(4.1),
            rssi: Some(-40.0),
            ..Default::default()
        };
        let enriched = enrich_anchor(flat);
        assert_eq!(enriched.battery_level, Some(BatteryLevel::High));
    }
}
