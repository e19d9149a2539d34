//! Signal and Battery Classification Cutoffs
//!
//! Threshold ladders used by the enrich stage to bucket raw telemetry into
//! categorical tiers. Both ladders are evaluated top-down with `>=`
//! comparisons; anything below the lowest rung falls into the worst bucket,
//! so the classifiers are total over every finite input.

// ===== RSSI QUALITY CUTOFFS =====

/// Minimum RSSI for an `excellent` link, in dBm.
///
/// At -50 dBm or better a UWB gateway is effectively in the same room as
/// its access point and ranging is not signal-limited.
pub const RSSI_EXCELLENT_DBM: f64 = -50.0;

/// Minimum RSSI for a `good` link, in dBm.
///
/// Typical for same-floor placement with one or two interior walls.
pub const RSSI_GOOD_DBM: f64 = -70.0;

/// Minimum RSSI for a `fair` link, in dBm.
///
/// Usable but retransmission-prone; placement should be reviewed.
pub const RSSI_FAIR_DBM: f64 = -85.0;

/// Minimum RSSI for a `poor` link, in dBm.
///
/// Below this the link is at the edge of association; readings further down
/// still classify as `poor` rather than a separate bucket.
pub const RSSI_POOR_DBM: f64 = -100.0;

// ===== BATTERY VOLTAGE CUTOFFS =====
//
// Single-cell Li-ion curve: 4.2 V fresh off the charger, ~3.0 V sag under
// load near empty, 2.5 V deep-discharge cutoff.

/// Voltage at or above which the pack reports as `high`.
pub const BATTERY_FULL_V: f64 = 4.0;

/// Voltage at or above which the pack reports as `medium`.
pub const BATTERY_GOOD_V: f64 = 3.5;

/// Voltage at or above which the pack reports as `low`.
pub const BATTERY_MEDIUM_V: f64 = 3.0;

/// Voltage at or above which the pack reports as `critical`.
///
/// Below this rung the reading still classifies as `critical`; the validate
/// stage separately rejects readings outside the plausible (2 V, 5 V) range.
pub const BATTERY_LOW_V: f64 = 2.5;
