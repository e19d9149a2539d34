//! Flatten Stage and the Cloud-Field Mapping Tables
//!
//! ## Overview
//!
//! Flatten projects a structured device record into its single-level,
//! storage-ready form. Top-level identity, spatial, and temporal fields are
//! copied through (timestamps coerced, `position` untouched); every leaf of
//! the cloud-origin payload is projected into an individually named flat
//! field; and the complete raw record is attached under `extra_data` so the
//! codec can later reconstruct it exactly. Flatten is total: no input can
//! make it fail.
//!
//! ## Mapping tables
//!
//! Each cloud-payload leaf has exactly one [`FieldMap`] row carrying both
//! directions: `project` (cloud → flat, used here) and `restore`
//! (flat → cloud, used by [`crate::codec`] for sparse reconstruction).
//! Keeping the two directions side by side in one table is what keeps
//! flatten and deserialize inverse; a new cloud field means one new row, not
//! two edits in distant files.
//!
//! Rows write only present values, so absent cloud fields stay absent flat
//! fields and vice versa. Nested sub-objects (tx-power boosts, topic sets,
//! the anchor's cloud position) are materialized on restore only when at
//! least one of their leaves is present.

use chrono::Utc;

use crate::coerce::parse_timestamp_str;
use crate::record::{
    AnchorCloudData, DeviceType, FlattenedAnchor, FlattenedGateway, GatewayCloudData, Position,
    RawAnchor, RawGateway,
};

/// One cloud-payload leaf: its flat key and both projection directions.
pub struct FieldMap<Cloud, Flat> {
    /// Flat-record key, for diagnostics and table sanity checks.
    pub flat_key: &'static str,
    /// Cloud → flat projection. Writes at most one flat field.
    pub project: fn(&Cloud, &mut Flat),
    /// Flat → cloud restoration. Writes only when the flat leaf is present.
    pub restore: fn(&Flat, &mut Cloud),
}

/// Mapping table for every gateway cloud-payload leaf.
///
/// `battery_voltage` and `rssi` fall back to the live-feed envelope
/// (`pub.msg.data`) when the direct cloud field is absent; the envelope
/// itself is never reconstructed.
pub const GATEWAY_CLOUD_FIELDS: &[FieldMap<GatewayCloudData, FlattenedGateway>] = &[
    FieldMap {
        flat_key: "content",
        project: |c, f| f.content = c.content.clone(),
        restore: |f, c| c.content = f.content.clone(),
    },
    FieldMap {
        flat_key: "cloud_gateway_id",
        project: |c, f| f.cloud_gateway_id = c.gateway_id,
        restore: |f, c| c.gateway_id = f.cloud_gateway_id,
    },
    FieldMap {
        flat_key: "fw_version",
        project: |c, f| f.fw_version = c.fw_ver.clone(),
        restore: |f, c| c.fw_ver = f.fw_version.clone(),
    },
    FieldMap {
        flat_key: "fw_serial",
        project: |c, f| f.fw_serial = c.fw_serial,
        restore: |f, c| c.fw_serial = f.fw_serial,
    },
    FieldMap {
        flat_key: "uwb_hw_com_ok",
        project: |c, f| f.uwb_hw_com_ok = c.uwb_hw_com_ok.clone(),
        restore: |f, c| c.uwb_hw_com_ok = f.uwb_hw_com_ok.clone(),
    },
    FieldMap {
        flat_key: "uwb_joined",
        project: |c, f| f.uwb_joined = c.uwb_joined.clone(),
        restore: |f, c| c.uwb_joined = f.uwb_joined.clone(),
    },
    FieldMap {
        flat_key: "uwb_network_id",
        project: |c, f| f.uwb_network_id = c.uwb_network_id,
        restore: |f, c| c.uwb_network_id = f.uwb_network_id,
    },
    FieldMap {
        flat_key: "uwb_tx_power_boost_norm",
        project: |c, f| {
            f.uwb_tx_power_boost_norm = c.uwb_tx_power.as_ref().and_then(|p| p.boost_norm)
        },
        restore: |f, c| {
            if let Some(v) = f.uwb_tx_power_boost_norm {
                c.uwb_tx_power.get_or_insert_with(Default::default).boost_norm = Some(v);
            }
        },
    },
    FieldMap {
        flat_key: "uwb_tx_power_boost_500",
        project: |c, f| {
            f.uwb_tx_power_boost_500 = c.uwb_tx_power.as_ref().and_then(|p| p.boost_500)
        },
        restore: |f, c| {
            if let Some(v) = f.uwb_tx_power_boost_500 {
                c.uwb_tx_power.get_or_insert_with(Default::default).boost_500 = Some(v);
            }
        },
    },
    FieldMap {
        flat_key: "uwb_tx_power_boost_250",
        project: |c, f| {
            f.uwb_tx_power_boost_250 = c.uwb_tx_power.as_ref().and_then(|p| p.boost_250)
        },
        restore: |f, c| {
            if let Some(v) = f.uwb_tx_power_boost_250 {
                c.uwb_tx_power.get_or_insert_with(Default::default).boost_250 = Some(v);
            }
        },
    },
    FieldMap {
        flat_key: "uwb_tx_power_boost_125",
        project: |c, f| {
            f.uwb_tx_power_boost_125 = c.uwb_tx_power.as_ref().and_then(|p| p.boost_125)
        },
        restore: |f, c| {
            if let Some(v) = f.uwb_tx_power_boost_125 {
                c.uwb_tx_power.get_or_insert_with(Default::default).boost_125 = Some(v);
            }
        },
    },
    FieldMap {
        flat_key: "uwb_tx_power_changed",
        project: |c, f| f.uwb_tx_power_changed = c.uwb_tx_power_changed.clone(),
        restore: |f, c| c.uwb_tx_power_changed = f.uwb_tx_power_changed.clone(),
    },
    FieldMap {
        flat_key: "connected_ap",
        project: |c, f| f.connected_ap = c.connected_ap.clone(),
        restore: |f, c| c.connected_ap = f.connected_ap.clone(),
    },
    FieldMap {
        flat_key: "wifi_tx_power",
        project: |c, f| f.wifi_tx_power = c.wifi_tx_power,
        restore: |f, c| c.wifi_tx_power = f.wifi_tx_power,
    },
    FieldMap {
        flat_key: "set_wifi_max_tx_power",
        project: |c, f| f.set_wifi_max_tx_power = c.set_wifi_max_tx_power,
        restore: |f, c| c.set_wifi_max_tx_power = f.set_wifi_max_tx_power,
    },
    FieldMap {
        flat_key: "ble_scan_time",
        project: |c, f| f.ble_scan_time = c.ble_scan_time,
        restore: |f, c| c.ble_scan_time = f.ble_scan_time,
    },
    FieldMap {
        flat_key: "ble_scan_pause_time",
        project: |c, f| f.ble_scan_pause_time = c.ble_scan_pause_time,
        restore: |f, c| c.ble_scan_pause_time = f.ble_scan_pause_time,
    },
    FieldMap {
        flat_key: "battery_voltage",
        project: |c, f| {
            f.battery_voltage = c
                .battery_voltage
                .or_else(|| c.pub_msg_data().and_then(|d| d.battery_voltage))
        },
        restore: |f, c| c.battery_voltage = f.battery_voltage,
    },
    FieldMap {
        flat_key: "five_v_plugged",
        project: |c, f| f.five_v_plugged = c.five_v_plugged.clone(),
        restore: |f, c| c.five_v_plugged = f.five_v_plugged.clone(),
    },
    FieldMap {
        flat_key: "pub_topic_anchor_config",
        project: |c, f| {
            f.pub_topic_anchor_config = c.pub_topic.as_ref().and_then(|t| t.anchor_config.clone())
        },
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_anchor_config {
                c.pub_topic.get_or_insert_with(Default::default).anchor_config = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "pub_topic_tag_config",
        project: |c, f| {
            f.pub_topic_tag_config = c.pub_topic.as_ref().and_then(|t| t.tag_config.clone())
        },
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_tag_config {
                c.pub_topic.get_or_insert_with(Default::default).tag_config = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "pub_topic_location",
        project: |c, f| {
            f.pub_topic_location = c.pub_topic.as_ref().and_then(|t| t.location.clone())
        },
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_location {
                c.pub_topic.get_or_insert_with(Default::default).location = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "pub_topic_message",
        project: |c, f| f.pub_topic_message = c.pub_topic.as_ref().and_then(|t| t.message.clone()),
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_message {
                c.pub_topic.get_or_insert_with(Default::default).message = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "pub_topic_ack_from_node",
        project: |c, f| {
            f.pub_topic_ack_from_node = c.pub_topic.as_ref().and_then(|t| t.ack_from_node.clone())
        },
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_ack_from_node {
                c.pub_topic.get_or_insert_with(Default::default).ack_from_node = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "pub_topic_health",
        project: |c, f| f.pub_topic_health = c.pub_topic.as_ref().and_then(|t| t.health.clone()),
        restore: |f, c| {
            if let Some(v) = &f.pub_topic_health {
                c.pub_topic.get_or_insert_with(Default::default).health = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "sub_topic_downlink",
        project: |c, f| f.sub_topic_downlink = c.sub_topic.as_ref().and_then(|t| t.downlink.clone()),
        // A present downlink leaf materializes sub_topic even when it is the
        // empty string.
        restore: |f, c| {
            if let Some(v) = &f.sub_topic_downlink {
                c.sub_topic.get_or_insert_with(Default::default).downlink = Some(v.clone());
            }
        },
    },
    FieldMap {
        flat_key: "discard_iot_data_time",
        project: |c, f| f.discard_iot_data_time = c.discard_iot_data_time,
        restore: |f, c| c.discard_iot_data_time = f.discard_iot_data_time,
    },
    FieldMap {
        flat_key: "discarded_iot_data",
        project: |c, f| f.discarded_iot_data = c.discarded_iot_data,
        restore: |f, c| c.discarded_iot_data = f.discarded_iot_data,
    },
    FieldMap {
        flat_key: "total_discarded_data",
        project: |c, f| f.total_discarded_data = c.total_discarded_data,
        restore: |f, c| c.total_discarded_data = f.total_discarded_data,
    },
    FieldMap {
        flat_key: "first_sync",
        project: |c, f| f.first_sync = c.first_sync.clone(),
        restore: |f, c| c.first_sync = f.first_sync.clone(),
    },
    FieldMap {
        flat_key: "last_sync",
        project: |c, f| f.last_sync = c.last_sync.clone(),
        restore: |f, c| c.last_sync = f.last_sync.clone(),
    },
    FieldMap {
        flat_key: "current",
        project: |c, f| f.current = c.current.clone(),
        restore: |f, c| c.current = f.current.clone(),
    },
    FieldMap {
        flat_key: "received_at",
        project: |c, f| f.received_at = c.received_at,
        restore: |f, c| c.received_at = f.received_at,
    },
    FieldMap {
        flat_key: "rssi",
        project: |c, f| f.rssi = c.rssi.or_else(|| c.pub_msg_data().and_then(|d| d.rssi)),
        restore: |f, c| c.rssi = f.rssi,
    },
    FieldMap {
        flat_key: "signal_quality",
        project: |c, f| f.signal_quality = c.signal_quality.clone(),
        restore: |f, c| c.signal_quality = f.signal_quality.clone(),
    },
    FieldMap {
        flat_key: "config_mode",
        project: |c, f| f.config_mode = c.config_mode.clone(),
        restore: |f, c| c.config_mode = f.config_mode.clone(),
    },
];

/// Mapping table for every anchor cloud-payload leaf.
///
/// The wearable telemetry (`battery_voltage`, `rssi`, `heart_rate`,
/// `temperature`, `humidity`) prefers the direct cloud field and falls back
/// to the live-feed envelope.
pub const ANCHOR_CLOUD_FIELDS: &[FieldMap<AnchorCloudData, FlattenedAnchor>] = &[
    FieldMap {
        flat_key: "content",
        project: |c, f| f.content = c.content.clone(),
        restore: |f, c| c.content = f.content.clone(),
    },
    FieldMap {
        flat_key: "cloud_gateway_id",
        project: |c, f| f.cloud_gateway_id = c.gateway_id,
        restore: |f, c| c.gateway_id = f.cloud_gateway_id,
    },
    FieldMap {
        flat_key: "node",
        project: |c, f| f.node = c.node.clone(),
        restore: |f, c| c.node = f.node.clone(),
    },
    FieldMap {
        flat_key: "cloud_anchor_id",
        project: |c, f| f.cloud_anchor_id = c.id,
        restore: |f, c| c.id = f.cloud_anchor_id,
    },
    FieldMap {
        flat_key: "received_at",
        project: |c, f| f.received_at = c.received_at,
        restore: |f, c| c.received_at = f.received_at,
    },
    FieldMap {
        flat_key: "fw_update",
        project: |c, f| f.fw_update = c.fw_update,
        restore: |f, c| c.fw_update = f.fw_update,
    },
    FieldMap {
        flat_key: "led_enabled",
        project: |c, f| f.led_enabled = c.led,
        restore: |f, c| c.led = f.led_enabled,
    },
    FieldMap {
        flat_key: "ble_enabled",
        project: |c, f| f.ble_enabled = c.ble,
        restore: |f, c| c.ble = f.ble_enabled,
    },
    FieldMap {
        flat_key: "is_initiator",
        project: |c, f| f.is_initiator = c.initiator,
        restore: |f, c| c.initiator = f.is_initiator,
    },
    FieldMap {
        flat_key: "cloud_position_x",
        project: |c, f| f.cloud_position_x = c.position.as_ref().and_then(|p| p.x),
        restore: |f, c| {
            if f.cloud_position_x.is_some() {
                c.position.get_or_insert_with(Default::default).x = f.cloud_position_x;
            }
        },
    },
    FieldMap {
        flat_key: "cloud_position_y",
        project: |c, f| f.cloud_position_y = c.position.as_ref().and_then(|p| p.y),
        restore: |f, c| {
            if f.cloud_position_y.is_some() {
                c.position.get_or_insert_with(Default::default).y = f.cloud_position_y;
            }
        },
    },
    FieldMap {
        flat_key: "cloud_position_z",
        project: |c, f| f.cloud_position_z = c.position.as_ref().and_then(|p| p.z),
        restore: |f, c| {
            if f.cloud_position_z.is_some() {
                c.position.get_or_insert_with(Default::default).z = f.cloud_position_z;
            }
        },
    },
    FieldMap {
        flat_key: "battery_voltage",
        project: |c, f| {
            f.battery_voltage = c
                .battery_voltage
                .or_else(|| c.pub_msg_data().and_then(|d| d.battery_voltage))
        },
        restore: |f, c| c.battery_voltage = f.battery_voltage,
    },
    FieldMap {
        flat_key: "rssi",
        project: |c, f| f.rssi = c.rssi.or_else(|| c.pub_msg_data().and_then(|d| d.rssi)),
        restore: |f, c| c.rssi = f.rssi,
    },
    FieldMap {
        flat_key: "heart_rate",
        project: |c, f| {
            f.heart_rate = c
                .heart_rate
                .or_else(|| c.pub_msg_data().and_then(|d| d.heart_rate))
        },
        restore: |f, c| c.heart_rate = f.heart_rate,
    },
    FieldMap {
        flat_key: "temperature",
        project: |c, f| {
            f.temperature = c
                .temperature
                .or_else(|| c.pub_msg_data().and_then(|d| d.temperature))
        },
        restore: |f, c| c.temperature = f.temperature,
    },
    FieldMap {
        flat_key: "humidity",
        project: |c, f| {
            f.humidity = c
                .humidity
                .or_else(|| c.pub_msg_data().and_then(|d| d.humidity))
        },
        restore: |f, c| c.humidity = f.humidity,
    },
];

/// Resolve a device identity: explicit id, then MAC address, then name,
/// then a timestamp-synthesized fallback.
pub(crate) fn resolve_device_id(id: &str, mac: Option<&str>, name: &str, prefix: &str) -> String {
    if !id.is_empty() {
        return id.to_owned();
    }
    if let Some(mac) = mac.filter(|m| !m.is_empty()) {
        return mac.to_owned();
    }
    if !name.is_empty() {
        return name.to_owned();
    }
    format!("{prefix}_{}", Utc::now().timestamp_millis())
}

/// Project a structured gateway record into its flat form. Total, never
/// fails; absent cloud fields yield absent flat fields.
pub fn flatten_gateway(raw: &RawGateway) -> FlattenedGateway {
    let cloud = raw.cloud_data.clone().unwrap_or_default();

    let mut flat = FlattenedGateway {
        id: resolve_device_id(&raw.id, raw.mac_address.as_deref(), &raw.name, "gateway"),
        name: raw.name.clone(),
        mac_address: raw.mac_address.clone(),
        ip_address: raw.ip_address.clone(),
        floor_id: raw.floor_id.clone(),
        status: raw.status.clone().unwrap_or_else(|| "unknown".to_owned()),
        position: raw.position,
        created_at: raw.created_at,
        last_seen: raw.last_seen,
        timestamp: cloud
            .current
            .as_deref()
            .and_then(parse_timestamp_str)
            .or(raw.last_seen),
        processing_timestamp: Some(Utc::now()),
        device_type: Some(DeviceType::Gateway),
        extra_data: Some(crate::record::GatewayExtra {
            raw_gateway: Some(raw.clone()),
            cloud_data: None,
        }),
        ..Default::default()
    };

    for field in GATEWAY_CLOUD_FIELDS {
        (field.project)(&cloud, &mut flat);
    }

    flat
}

/// Project a structured anchor record into its flat form. Total, never
/// fails; absent cloud fields yield absent flat fields.
pub fn flatten_anchor(raw: &RawAnchor) -> FlattenedAnchor {
    let cloud = raw.cloud_data.clone().unwrap_or_default();

    let mut flat = FlattenedAnchor {
        id: resolve_device_id(&raw.id, raw.mac_address.as_deref(), &raw.name, "anchor"),
        gateway_id: raw.gateway_id.clone(),
        name: raw.name.clone(),
        mac_address: raw.mac_address.clone(),
        status: raw.status.clone().unwrap_or_else(|| "unknown".to_owned()),
        position: raw.position,
        last_seen: raw.last_seen,
        created_at: raw.created_at,
        timestamp: cloud
            .current
            .as_deref()
            .and_then(parse_timestamp_str)
            .or(raw.last_seen),
        processing_timestamp: Some(Utc::now()),
        device_type: Some(DeviceType::Anchor),
        extra_data: Some(crate::record::AnchorExtra {
            raw_anchor: Some(raw.clone()),
            cloud_data: None,
        }),
        ..Default::default()
    };

    for field in ANCHOR_CLOUD_FIELDS {
        (field.project)(&cloud, &mut flat);
    }

    // The application-level cloudGatewayId wins over the payload's
    // gateway_id; both name the owning gateway's cloud identity, which stays
    // independent of the anchor's own cloud_anchor_id.
    let owner_cloud_id = raw.cloud_gateway_id.or(cloud.gateway_id);
    flat.cloud_gateway_id_top = owner_cloud_id;
    flat.cloud_gateway_id = owner_cloud_id;

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PubTopicSet, UwbTxPower};

    fn sample_gateway() -> RawGateway {
        RawGateway {
            id: "gw_1".into(),
            name: "Lobby GW".into(),
            cloud_data: Some(GatewayCloudData {
                gateway_id: Some(7.0),
                battery_voltage: Some(3.7),
                rssi: Some(-55.0),
                pub_topic: Some(PubTopicSet {
                    location: Some("UWB/GW7_Loca".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn gateway_cloud_leaves_project_to_flat_keys() {
        let flat = flatten_gateway(&sample_gateway());
        assert_eq!(flat.id, "gw_1");
        assert_eq!(flat.cloud_gateway_id, Some(7.0));
        assert_eq!(flat.battery_voltage, Some(3.7));
        assert_eq!(flat.rssi, Some(-55.0));
        assert_eq!(flat.pub_topic_location.as_deref(), Some("UWB/GW7_Loca"));
        assert_eq!(flat.device_type, Some(DeviceType::Gateway));
        assert_eq!(flat.status, "unknown");
    }

    #[test]
    fn absent_cloud_fields_stay_absent() {
        let flat = flatten_gateway(&sample_gateway());
        assert_eq!(flat.fw_version, None);
        assert_eq!(flat.uwb_tx_power_boost_norm, None);
        assert_eq!(flat.sub_topic_downlink, None);
    }

    #[test]
    fn raw_record_rides_along_in_extra_data() {
        let raw = sample_gateway();
        let flat = flatten_gateway(&raw);
        let embedded = flat.extra_data.unwrap().raw_gateway.unwrap();
        assert_eq!(embedded, raw);
    }

    #[test]
    fn id_synthesis_priority() {
        assert_eq!(resolve_device_id("gw_1", Some("aa:bb"), "n", "gateway"), "gw_1");
        assert_eq!(resolve_device_id("", Some("aa:bb"), "n", "gateway"), "aa:bb");
        assert_eq!(resolve_device_id("", None, "n", "gateway"), "n");
        assert!(resolve_device_id("", None, "", "gateway").starts_with("gateway_"));
    }

    #[test]
    fn envelope_telemetry_is_a_fallback_only() {
        let mut raw = sample_gateway();
        let cloud = raw.cloud_data.as_mut().unwrap();
        cloud.battery_voltage = None;
        cloud.pub_envelope = Some(crate::record::PubEnvelope {
            msg: Some(crate::record::PubMsg {
                data: Some(crate::record::PubMsgData {
                    battery_voltage: Some(3.1),
                    rssi: Some(-90.0),
                    ..Default::default()
                }),
            }),
        });
        let flat = flatten_gateway(&raw);
        assert_eq!(flat.battery_voltage, Some(3.1));
        // Direct cloud rssi still wins over the envelope.
        assert_eq!(flat.rssi, Some(-55.0));
    }

    #[test]
    fn gateway_table_roundtrips_cloud_payload() {
        let cloud = GatewayCloudData {
            content: Some("hello".into()),
            gateway_id: Some(7.0),
            fw_ver: Some("2.1.0".into()),
            uwb_tx_power: Some(UwbTxPower {
                boost_norm: Some(3.0),
                boost_500: Some(6.5),
                ..Default::default()
            }),
            battery_voltage: Some(3.7),
            rssi: Some(-55.0),
            sub_topic: Some(crate::record::SubTopicSet {
                downlink: Some(String::new()),
            }),
            ..Default::default()
        };
        let mut flat = FlattenedGateway::default();
        for field in GATEWAY_CLOUD_FIELDS {
            (field.project)(&cloud, &mut flat);
        }
        let mut rebuilt = GatewayCloudData::default();
        for field in GATEWAY_CLOUD_FIELDS {
            (field.restore)(&flat, &mut rebuilt);
        }
        assert_eq!(rebuilt, cloud);
    }

    #[test]
    fn anchor_table_roundtrips_cloud_payload() {
        let cloud = AnchorCloudData {
            gateway_id: Some(7.0),
            id: Some(7.0), // same value as the owner id on purpose
            node: Some("ANCHOR".into()),
            fw_update: Some(true),
            led: Some(false),
            position: Some(Position {
                x: Some(1.0),
                y: None,
                z: Some(2.5),
            }),
            heart_rate: Some(72.0),
            ..Default::default()
        };
        let mut flat = FlattenedAnchor::default();
        for field in ANCHOR_CLOUD_FIELDS {
            (field.project)(&cloud, &mut flat);
        }
        assert_eq!(flat.cloud_gateway_id, Some(7.0));
        assert_eq!(flat.cloud_anchor_id, Some(7.0));

        let mut rebuilt = AnchorCloudData::default();
        for field in ANCHOR_CLOUD_FIELDS {
            (field.restore)(&flat, &mut rebuilt);
        }
        assert_eq!(rebuilt, cloud);
    }

    #[test]
    fn flat_keys_are_unique() {
        let mut keys: Vec<_> = GATEWAY_CLOUD_FIELDS.iter().map(|m| m.flat_key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), GATEWAY_CLOUD_FIELDS.len());

        let mut keys: Vec<_> = ANCHOR_CLOUD_FIELDS.iter().map(|m| m.flat_key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ANCHOR_CLOUD_FIELDS.len());
    }

    #[test]
    fn anchor_owner_id_prefers_application_value() {
        let raw = RawAnchor {
            id: "a1".into(),
            name: "Anchor 1".into(),
            cloud_gateway_id: Some(9.0),
            cloud_data: Some(AnchorCloudData {
                gateway_id: Some(7.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let flat = flatten_anchor(&raw);
        assert_eq!(flat.cloud_gateway_id, Some(9.0));
        assert_eq!(flat.cloud_gateway_id_top, Some(9.0));
    }
}
