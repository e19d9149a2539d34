//! Constants for uwbflow Core
//!
//! Centralized, documented constants shared by the classification and
//! validation stages. These values are a wire contract with the cloud
//! telemetry feed and the stored record format: changing any of them changes
//! which records other deployments accept, so treat them as configuration
//! frozen at the feed's governing threshold table, not tunables.
//!
//! Constants are grouped by domain:
//! - **Quality**: RSSI and battery-voltage bucket cutoffs
//! - **Validation**: plausible physical ranges for telemetry fields

/// RSSI and battery-voltage classification cutoffs.
pub mod quality;

/// Plausible physical ranges enforced by the validate stage.
pub mod validation;
