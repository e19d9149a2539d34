//! Classification of Raw Telemetry into Categorical Tiers
//!
//! Pure threshold-ladder classifiers used by the enrich stage. Both functions
//! are total over every finite `f64`: there is no `Unknown` bucket, and
//! values below the lowest rung land in the worst tier. The cutoffs are a
//! wire contract; see [`crate::constants::quality`].

use serde::{Deserialize, Serialize};

use crate::constants::quality::{
    BATTERY_FULL_V, BATTERY_GOOD_V, BATTERY_MEDIUM_V, RSSI_EXCELLENT_DBM, RSSI_FAIR_DBM,
    RSSI_GOOD_DBM,
};

/// Link quality tier derived from RSSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Wire spelling of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "excellent",
            SignalQuality::Good => "good",
            SignalQuality::Fair => "fair",
            SignalQuality::Poor => "poor",
        }
    }
}

/// Battery charge tier derived from pack voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryLevel {
    High,
    Medium,
    Low,
    Critical,
}

impl BatteryLevel {
    /// Wire spelling of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryLevel::High => "high",
            BatteryLevel::Medium => "medium",
            BatteryLevel::Low => "low",
            BatteryLevel::Critical => "critical",
        }
    }
}

/// Bucket an RSSI reading (dBm). Total: any finite value classifies.
pub fn signal_quality(rssi_dbm: f64) -> SignalQuality {
    if rssi_dbm >= RSSI_EXCELLENT_DBM {
        SignalQuality::Excellent
    } else if rssi_dbm >= RSSI_GOOD_DBM {
        SignalQuality::Good
    } else if rssi_dbm >= RSSI_FAIR_DBM {
        SignalQuality::Fair
    } else {
        SignalQuality::Poor
    }
}

/// Bucket a battery voltage (volts). Total: any finite value classifies.
pub fn battery_level(voltage_v: f64) -> BatteryLevel {
    if voltage_v >= BATTERY_FULL_V {
        BatteryLevel::High
    } else if voltage_v >= BATTERY_GOOD_V {
        BatteryLevel::Medium
    } else if voltage_v >= BATTERY_MEDIUM_V {
        BatteryLevel::Low
    } else {
        // At or below BATTERY_LOW_V there is no further distinction to draw.
        BatteryLevel::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rssi_ladder_boundaries() {
        assert_eq!(signal_quality(-50.0), SignalQuality::Excellent);
        assert_eq!(signal_quality(-50.1), SignalQuality::Good);
        assert_eq!(signal_quality(-70.0), SignalQuality::Good);
        assert_eq!(signal_quality(-70.1), SignalQuality::Fair);
        assert_eq!(signal_quality(-85.0), SignalQuality::Fair);
        assert_eq!(signal_quality(-85.1), SignalQuality::Poor);
    }

    #[test]
    fn rssi_extremes_still_classify() {
        assert_eq!(signal_quality(-1000.0), SignalQuality::Poor);
        assert_eq!(signal_quality(100.0), SignalQuality::Excellent);
    }

    #[test]
    fn battery_ladder_boundaries() {
        assert_eq!(battery_level(4.2), BatteryLevel::High);
        assert_eq!(battery_level(4.0), BatteryLevel::High);
        assert_eq!(battery_level(3.7), BatteryLevel::Medium);
        assert_eq!(battery_level(3.2), BatteryLevel::Low);
        assert_eq!(battery_level(2.6), BatteryLevel::Critical);
        assert_eq!(battery_level(0.0), BatteryLevel::Critical);
    }
}
