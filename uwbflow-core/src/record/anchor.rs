//! Anchor record shapes.
//!
//! An anchor is a fixed UWB ranging node owned by a gateway. Its cloud
//! payload is a small association record: the owning gateway's cloud id, the
//! anchor's own cloud id, a node kind tag, 0/1 feature flags, and the
//! cloud-side position. Two numeric identities live here and must never be
//! conflated: `gateway_id` (owner) and `id` (the anchor itself), even when
//! they happen to hold the same value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DeviceType, Position, PubEnvelope, PubMsgData};
use crate::classify::BatteryLevel;

/// Structured anchor record as known to the application layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAnchor {
    pub id: String,
    /// Owning gateway's application-level id; non-owning reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bound: Option<bool>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_data: Option<AnchorCloudData>,
    /// Owning gateway's cloud-assigned numeric id, when known at the
    /// application level rather than inside `cloudData`.
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_gateway_id: Option<f64>,
}

/// Vendor-reported cloud payload of an anchor. Key names are the wire
/// contract with the upstream feed and must not be changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorCloudData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Owning gateway's cloud-assigned numeric id (wire key `gateway_id`).
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_id: Option<f64>,
    /// Node kind tag, e.g. `"ANCHOR"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The anchor's own cloud-assigned numeric id (wire key `id`).
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<f64>,
    #[serde(
        rename = "receivedAt",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<DateTime<Utc>>,
    /// 0/1 on the wire; `Option<bool>` in memory, re-emitted as 0/1.
    #[serde(
        deserialize_with = "crate::coerce::lenient_flag",
        serialize_with = "crate::coerce::flag_as_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub fw_update: Option<bool>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_flag",
        serialize_with = "crate::coerce::flag_as_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub led: Option<bool>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_flag",
        serialize_with = "crate::coerce::flag_as_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub ble: Option<bool>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_flag",
        serialize_with = "crate::coerce::flag_as_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub initiator: Option<bool>,
    /// Cloud-side position of the anchor, distinct from the application's
    /// locally-managed top-level position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Live-feed envelope; fallback source for wearable telemetry during
    /// flatten.
    #[serde(rename = "pub", skip_serializing_if = "Option::is_none")]
    pub pub_envelope: Option<PubEnvelope>,
}

impl AnchorCloudData {
    /// True when no field at all is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Leaf telemetry of the live-feed envelope, if any.
    pub fn pub_msg_data(&self) -> Option<&PubMsgData> {
        self.pub_envelope.as_ref()?.msg.as_ref()?.data.as_ref()
    }
}

/// Escape-hatch bag attached to a flattened anchor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorExtra {
    /// The exact raw record the flat form was produced from. Reconstruction
    /// prefers this over field-by-field rebuild.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_anchor: Option<RawAnchor>,
    /// Secondary cloud-payload fallback used only when no flat leaf survives.
    #[serde(rename = "cloudData", skip_serializing_if = "Option::is_none")]
    pub cloud_data: Option<AnchorCloudData>,
}

/// Flat, storage-ready projection of an anchor. Top-level identity fields
/// keep their camelCase wire names; cloud-derived fields are snake_case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenedAnchor {
    pub id: String,
    #[serde(rename = "gatewayId", skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
    pub name: String,
    #[serde(rename = "macAddress", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(
        rename = "lastSeen",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(
        rename = "createdAt",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Owning gateway's cloud id carried at the top level, kept separate
    /// from the snake_case `cloud_gateway_id` projection below.
    #[serde(
        rename = "cloudGatewayId",
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_gateway_id_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_gateway_id: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_anchor_id: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ble_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_initiator: Option<bool>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_position_x: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_position_y: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_position_z: Option<f64>,
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
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub processing_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<BatteryLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<AnchorExtra>,
}
