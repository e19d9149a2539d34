//! Device-telemetry normalization for UWB indoor-positioning deployments
//!
//! Converts heterogeneous, loosely-typed device records (gateways and
//! anchors) from the cloud telemetry feed into a canonical flat form
//! suitable for validation, storage, and transmission, and reconstructs the
//! structured form losslessly. Also hosts the floor-plan coordinate
//! calibration transform used to place devices on maps.
//!
//! The pipeline is pure in-memory computation: flatten → enrich → validate,
//! with per-record fault isolation and error aggregation instead of
//! exceptions. Coercion failures on noisy wire values become absent fields,
//! never errors.
//!
//! ```
//! use uwbflow_core::{pipeline::run_gateway_pipeline, record::RawGateway};
//!
//! let raw: RawGateway = serde_json::from_str(
//!     r#"{"id":"gw_1","name":"Lobby GW","cloudData":{"rssi":"-55","battery_voltage":3.7}}"#,
//! ).unwrap();
//!
//! let report = run_gateway_pipeline(&[raw]);
//! assert_eq!(report.accepted.len(), 1);
//! assert_eq!(report.accepted[0].signal_quality.as_deref(), Some("excellent"));
//! ```

#![deny(unsafe_code)]

pub mod calibration;
pub mod classify;
pub mod codec;
pub mod coerce;
pub mod constants;
pub mod enrich;
pub mod errors;
pub mod flatten;
pub mod pipeline;
pub mod record;
pub mod validate;

// Public API
pub use calibration::{Calibration, Point};
pub use classify::{battery_level, signal_quality, BatteryLevel, SignalQuality};
pub use codec::{deserialize_anchor, deserialize_gateway, serialize_anchor, serialize_gateway};
pub use errors::CalibrationError;
pub use pipeline::{run_anchor_pipeline, run_gateway_pipeline, PipelineReport, RejectedDevice};
pub use record::{FlattenedAnchor, FlattenedGateway, RawAnchor, RawGateway};

/// Crate version, for feed-compatibility reporting.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
