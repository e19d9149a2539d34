//! Device Record Types
//!
//! Typed renditions of the wire shapes exchanged with the cloud telemetry
//! feed and the record store. Two families exist per device kind:
//!
//! - **Raw** records ([`RawGateway`], [`RawAnchor`]): the structured form the
//!   application works with, camelCase top level, optional nested
//!   cloud-origin payload. Loosely-typed wire values (numeric strings, 0/1
//!   flags, timestamp-like fields) are absorbed at the serde boundary via
//!   [`crate::coerce`].
//! - **Flattened** records ([`FlattenedGateway`], [`FlattenedAnchor`]): the
//!   storage-ready single-level projection with snake_case cloud-derived
//!   keys, derived categorical fields, and the escape-hatch `extra_data` bag
//!   holding the original raw record for lossless reconstruction.
//!
//! Every optional field is sparse: absent on the wire means `None` in
//! memory, and `None` is skipped on output rather than emitted as `null`.

use serde::{Deserialize, Serialize};

mod anchor;
mod gateway;
mod position;

pub use anchor::{AnchorCloudData, AnchorExtra, FlattenedAnchor, RawAnchor};
pub use gateway::{
    FlattenedGateway, GatewayCloudData, GatewayExtra, PubTopicSet, RawGateway, SubTopicSet,
    UwbTxPower,
};
pub use position::Position;

/// Pipeline variant tag stamped on flattened records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Gateway,
    Anchor,
}

impl DeviceType {
    /// Wire spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Gateway => "gateway",
            DeviceType::Anchor => "anchor",
        }
    }
}

/// Live-feed publish envelope nested inside a cloud payload (`pub.msg.data`).
///
/// Only ever a *fallback source* during flatten; reconstruction never
/// reassembles it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PubEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<PubMsg>,
}

/// `msg` layer of the live-feed envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMsg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PubMsgData>,
}

/// Telemetry leaves of the live-feed envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMsgData {
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_voltage: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rssi: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub heart_rate: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub humidity: Option<f64>,
}
