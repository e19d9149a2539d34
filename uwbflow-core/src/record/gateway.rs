//! Gateway record shapes.
//!
//! A gateway is the root of the device hierarchy from the pipeline's point
//! of view: it references nothing and anchors reference it. Its cloud-origin
//! payload carries firmware, UWB network, WiFi/BLE radio, power, and MQTT
//! topic-configuration fields, with nested sub-objects for the tx-power
//! boost levels and the publish/subscribe topic sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DeviceType, Position, PubEnvelope, PubMsgData};
use crate::classify::BatteryLevel;

/// Structured gateway record as known to the application layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawGateway {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_data: Option<GatewayCloudData>,
}

/// Vendor-reported cloud payload of a gateway. Key names are the wire
/// contract with the upstream feed and must not be changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayCloudData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Cloud-assigned numeric id of this gateway (wire key `gateway_id`).
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_id: Option<f64>,
    /// Firmware version; some feed revisions spell the key `fw_version`.
    #[serde(alias = "fw_version", skip_serializing_if = "Option::is_none")]
    pub fw_ver: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fw_serial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_hw_com_ok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_joined: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_network_id: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_tx_power: Option<UwbTxPower>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_tx_power_changed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_ap: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub wifi_tx_power: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub set_wifi_max_tx_power: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ble_scan_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ble_scan_pause_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_v_plugged: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic: Option<PubTopicSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<SubTopicSet>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub discard_iot_data_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub discarded_iot_data: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_discarded_data: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_sync: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    /// Device-side clock reading as reported, passed through untouched; the
    /// flat `timestamp` field is its coerced form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(
        rename = "receivedAt",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rssi: Option<f64>,
    /// Vendor-reported quality string; enrich only fills it when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Live-feed envelope; fallback source for battery/RSSI during flatten.
    #[serde(rename = "pub", skip_serializing_if = "Option::is_none")]
    pub pub_envelope: Option<PubEnvelope>,
}

impl GatewayCloudData {
    /// True when no field at all is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Leaf telemetry of the live-feed envelope, if any.
    pub fn pub_msg_data(&self) -> Option<&PubMsgData> {
        self.pub_envelope.as_ref()?.msg.as_ref()?.data.as_ref()
    }
}

/// UWB tx-power boost levels sub-object (wire key `uwb_tx_power`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UwbTxPower {
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_norm: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_500: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_250: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub boost_125: Option<f64>,
}

/// MQTT publish-topic set sub-object (wire key `pub_topic`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PubTopicSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack_from_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

/// MQTT subscribe-topic set sub-object (wire key `sub_topic`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTopicSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink: Option<String>,
}

/// Escape-hatch bag attached to a flattened gateway.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayExtra {
    /// The exact raw record the flat form was produced from. Reconstruction
    /// prefers this over field-by-field rebuild.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_gateway: Option<RawGateway>,
    /// Secondary cloud-payload fallback used only when no flat leaf survives.
    #[serde(rename = "cloudData", skip_serializing_if = "Option::is_none")]
    pub cloud_data: Option<GatewayCloudData>,
}

/// Flat, storage-ready projection of a gateway. Top-level identity fields
/// keep their camelCase wire names; cloud-derived fields are snake_case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenedGateway {
    pub id: String,
    pub name: String,
    #[serde(rename = "macAddress", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(rename = "ipAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(rename = "floorId", skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(
        rename = "createdAt",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "lastSeen",
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_gateway_id: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_version: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fw_serial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_hw_com_ok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_joined: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_network_id: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_tx_power_boost_norm: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_tx_power_boost_500: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_tx_power_boost_250: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uwb_tx_power_boost_125: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uwb_tx_power_changed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_ap: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub wifi_tx_power: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub set_wifi_max_tx_power: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ble_scan_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ble_scan_pause_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_v_plugged: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_anchor_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_tag_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_ack_from_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_topic_health: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic_downlink: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub discard_iot_data_time: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub discarded_iot_data: Option<f64>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_discarded_data: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_sync: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "crate::coerce::lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_mode: Option<String>,
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
    pub extra_data: Option<GatewayExtra>,
}
