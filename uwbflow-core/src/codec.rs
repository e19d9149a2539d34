//! Serialize / Deserialize Round-Trip Stage
//!
//! The storage boundary. `serialize_*` produces the flat form with the
//! caller's exact raw record forced into the `extra_data` escape hatch, so a
//! later `deserialize_*` can reproduce the structured record losslessly.
//! When the escape hatch is missing (older stores, hand-edited records),
//! deserialization falls back to rebuilding the cloud payload leaf by leaf
//! from whatever flat fields are present, reusing the same mapping tables
//! flatten projects through — the two directions cannot drift apart.
//!
//! Deserialization never fails: an impossible reconstruction simply yields
//! the most complete record that can be assembled, with missing fields
//! absent.

use chrono::Utc;

use crate::enrich::{enrich_anchor, enrich_gateway};
use crate::flatten::{
    flatten_anchor, flatten_gateway, ANCHOR_CLOUD_FIELDS, GATEWAY_CLOUD_FIELDS,
};
use crate::record::{
    AnchorCloudData, FlattenedAnchor, FlattenedGateway, GatewayCloudData, RawAnchor, RawGateway,
};

/// Flatten and enrich a gateway for storage, guaranteeing the escape hatch
/// holds exactly the caller's input.
pub fn serialize_gateway(raw: &RawGateway) -> FlattenedGateway {
    let mut flat = enrich_gateway(flatten_gateway(raw));
    flat.extra_data
        .get_or_insert_with(Default::default)
        .raw_gateway = Some(raw.clone());
    flat
}

/// Flatten and enrich an anchor for storage, guaranteeing the escape hatch
/// holds exactly the caller's input.
pub fn serialize_anchor(raw: &RawAnchor) -> FlattenedAnchor {
    let mut flat = enrich_anchor(flatten_anchor(raw));
    flat.extra_data
        .get_or_insert_with(Default::default)
        .raw_anchor = Some(raw.clone());
    flat
}

/// Canonical id when reviving an embedded record: the flat record's id wins
/// over whatever the snapshot carried, guarding against id drift between
/// snapshot and store.
fn revived_id(flat_id: &str, embedded_id: &str, mac: Option<&str>, prefix: &str) -> String {
    if !flat_id.is_empty() {
        return flat_id.to_owned();
    }
    if !embedded_id.is_empty() {
        return embedded_id.to_owned();
    }
    if let Some(mac) = mac.filter(|m| !m.is_empty()) {
        return mac.to_owned();
    }
    format!("{prefix}_{}", Utc::now().timestamp_millis())
}

/// Reconstruct a structured gateway from its flat form.
pub fn deserialize_gateway(flat: &FlattenedGateway) -> RawGateway {
    if let Some(raw) = flat.extra_data.as_ref().and_then(|e| e.raw_gateway.as_ref()) {
        let mut revived = raw.clone();
        revived.id = revived_id(&flat.id, &raw.id, raw.mac_address.as_deref(), "gateway");
        return revived;
    }

    log::debug!("gateway `{}`: no embedded original, rebuilding from flat fields", flat.id);

    let mut cloud = GatewayCloudData::default();
    for field in GATEWAY_CLOUD_FIELDS {
        (field.restore)(flat, &mut cloud);
    }
    if !flat.name.is_empty() {
        cloud.name = Some(flat.name.clone());
    }

    let cloud_data = if cloud.is_empty() {
        flat.extra_data.as_ref().and_then(|e| e.cloud_data.clone())
    } else {
        Some(cloud)
    };

    RawGateway {
        id: flat.id.clone(),
        name: flat.name.clone(),
        mac_address: flat.mac_address.clone(),
        ip_address: flat.ip_address.clone(),
        floor_id: flat.floor_id.clone(),
        status: (!flat.status.is_empty()).then(|| flat.status.clone()),
        created_at: flat.created_at,
        last_seen: flat.last_seen,
        position: flat.position,
        cloud_data,
    }
}

/// Reconstruct a structured anchor from its flat form.
pub fn deserialize_anchor(flat: &FlattenedAnchor) -> RawAnchor {
    if let Some(raw) = flat.extra_data.as_ref().and_then(|e| e.raw_anchor.as_ref()) {
        let mut revived = raw.clone();
        revived.id = revived_id(&flat.id, &raw.id, raw.mac_address.as_deref(), "anchor");
        return revived;
    }

    log::debug!("anchor `{}`: no embedded original, rebuilding from flat fields", flat.id);

    let mut cloud = AnchorCloudData::default();
    for field in ANCHOR_CLOUD_FIELDS {
        (field.restore)(flat, &mut cloud);
    }
    if !flat.name.is_empty() {
        cloud.name = Some(flat.name.clone());
    }

    let cloud_data = if cloud.is_empty() {
        flat.extra_data.as_ref().and_then(|e| e.cloud_data.clone())
    } else {
        Some(cloud)
    };

    RawAnchor {
        id: flat.id.clone(),
        gateway_id: flat.gateway_id.clone(),
        name: flat.name.clone(),
        mac_address: flat.mac_address.clone(),
        status: (!flat.status.is_empty()).then(|| flat.status.clone()),
        // Binding is inferred from the owning reference, not stored.
        is_bound: Some(flat.gateway_id.as_deref().is_some_and(|g| !g.is_empty())),
        last_seen: flat.last_seen,
        created_at: flat.created_at,
        position: flat.position,
        cloud_data,
        cloud_gateway_id: flat.cloud_gateway_id_top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Position, PubTopicSet, SubTopicSet};
    use chrono::TimeZone;

    fn sample_gateway() -> RawGateway {
        RawGateway {
            id: "gw_1".into(),
            name: "Lobby GW".into(),
            mac_address: Some("aa:bb:cc:dd".into()),
            status: Some("online".into()),
            last_seen: chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single(),
            position: Some(Position {
                x: Some(1.0),
                y: Some(2.0),
                z: None,
            }),
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
    fn embedded_round_trip_is_exact() {
        let raw = sample_gateway();
        let revived = deserialize_gateway(&serialize_gateway(&raw));
        assert_eq!(revived, raw);
    }

    #[test]
    fn top_level_id_wins_over_embedded_snapshot() {
        let raw = sample_gateway();
        let mut flat = serialize_gateway(&raw);
        flat.id = "gw_renamed".into();
        let revived = deserialize_gateway(&flat);
        assert_eq!(revived.id, "gw_renamed");
        assert_eq!(revived.name, raw.name);
    }

    #[test]
    fn empty_flat_id_falls_back_to_snapshot_then_mac() {
        let raw = sample_gateway();
        let mut flat = serialize_gateway(&raw);
        flat.id = String::new();
        assert_eq!(deserialize_gateway(&flat).id, "gw_1");

        let mut snapshot = raw.clone();
        snapshot.id = String::new();
        let mut flat = serialize_gateway(&snapshot);
        flat.id = String::new();
        assert_eq!(deserialize_gateway(&flat).id, "aa:bb:cc:dd");
    }

    #[test]
    fn sparse_rebuild_recovers_cloud_leaves() {
        let raw = sample_gateway();
        let mut flat = serialize_gateway(&raw);
        flat.extra_data = None; // escape hatch stripped

        let revived = deserialize_gateway(&flat);
        let cloud = revived.cloud_data.unwrap();
        assert_eq!(cloud.gateway_id, Some(7.0));
        assert_eq!(cloud.battery_voltage, Some(3.7));
        assert_eq!(cloud.rssi, Some(-55.0));
        assert_eq!(
            cloud.pub_topic.unwrap().location.as_deref(),
            Some("UWB/GW7_Loca")
        );
        // Sub-objects with no present leaf are omitted entirely.
        assert!(cloud.uwb_tx_power.is_none());
        assert!(cloud.sub_topic.is_none());
        // Top-level fields survive unchanged.
        assert_eq!(revived.position, raw.position);
        assert_eq!(revived.last_seen, raw.last_seen);
    }

    #[test]
    fn present_empty_downlink_materializes_sub_topic() {
        let flat = FlattenedGateway {
            id: "gw_1".into(),
            name: "Lobby GW".into(),
            sub_topic_downlink: Some(String::new()),
            ..Default::default()
        };
        let cloud = deserialize_gateway(&flat).cloud_data.unwrap();
        assert_eq!(
            cloud.sub_topic,
            Some(SubTopicSet {
                downlink: Some(String::new())
            })
        );
    }

    #[test]
    fn sparse_rebuild_backfills_cloud_name_from_top_level() {
        let flat = FlattenedGateway {
            id: "gw_1".into(),
            name: "Lobby GW".into(),
            rssi: Some(-60.0),
            ..Default::default()
        };
        let cloud = deserialize_gateway(&flat).cloud_data.unwrap();
        assert_eq!(cloud.name.as_deref(), Some("Lobby GW"));
    }

    #[test]
    fn no_leaf_at_all_falls_back_to_extra_cloud_data() {
        let stash = GatewayCloudData {
            fw_ver: Some("1.0.0".into()),
            ..Default::default()
        };
        let flat = FlattenedGateway {
            id: "gw_1".into(),
            extra_data: Some(crate::record::GatewayExtra {
                raw_gateway: None,
                cloud_data: Some(stash.clone()),
            }),
            ..Default::default()
        };
        assert_eq!(deserialize_gateway(&flat).cloud_data, Some(stash));
    }

    #[test]
    fn anchor_is_bound_inferred_from_gateway_reference() {
        let flat = FlattenedAnchor {
            id: "a1".into(),
            name: "Anchor 1".into(),
            gateway_id: Some("gw_1".into()),
            ..Default::default()
        };
        assert_eq!(deserialize_anchor(&flat).is_bound, Some(true));

        let unbound = FlattenedAnchor {
            gateway_id: None,
            ..flat
        };
        assert_eq!(deserialize_anchor(&unbound).is_bound, Some(false));
    }

    #[test]
    fn anchor_sparse_rebuild_reassembles_cloud_position() {
        let flat = FlattenedAnchor {
            id: "a1".into(),
            name: "Anchor 1".into(),
            cloud_position_x: Some(1.5),
            cloud_position_z: Some(0.3),
            fw_update: Some(true),
            ..Default::default()
        };
        let cloud = deserialize_anchor(&flat).cloud_data.unwrap();
        assert_eq!(
            cloud.position,
            Some(Position {
                x: Some(1.5),
                y: None,
                z: Some(0.3),
            })
        );
        assert_eq!(cloud.fw_update, Some(true));
    }

    #[test]
    fn anchor_embedded_round_trip_keeps_identities_separate() {
        let raw = RawAnchor {
            id: "a1".into(),
            gateway_id: Some("gw_1".into()),
            name: "Anchor 1".into(),
            cloud_gateway_id: Some(7.0),
            cloud_data: Some(AnchorCloudData {
                gateway_id: Some(7.0),
                id: Some(7.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let revived = deserialize_anchor(&serialize_anchor(&raw));
        assert_eq!(revived, raw);
        let cloud = revived.cloud_data.unwrap();
        assert_eq!(cloud.gateway_id, Some(7.0));
        assert_eq!(cloud.id, Some(7.0));
    }
}
