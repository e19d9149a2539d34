//! Pipeline Orchestrator
//!
//! Runs flatten → enrich → validate over a batch of raw records and
//! partitions the results: records with no violations join `accepted`, the
//! rest join `rejected` keyed by the flattened device id. Records are
//! processed independently — one malformed record never aborts the batch —
//! and both partitions preserve input order.

use serde::{Deserialize, Serialize};

use crate::enrich::{enrich_anchor, enrich_gateway};
use crate::flatten::{flatten_anchor, flatten_gateway};
use crate::record::{FlattenedAnchor, FlattenedGateway, RawAnchor, RawGateway};
use crate::validate::{validate_anchor, validate_gateway};

/// A rejected record: its resolved device id and every violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedDevice {
    pub device_id: String,
    pub errors: Vec<String>,
}

/// Outcome of one pipeline run over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport<T> {
    /// Enriched flat records that passed validation, in input order.
    pub accepted: Vec<T>,
    /// Rejections keyed by device id, in input order.
    pub rejected: Vec<RejectedDevice>,
}

impl<T> Default for PipelineReport<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

fn run<R, T>(
    records: &[R],
    stage: impl Fn(&R) -> (T, String, Vec<String>),
) -> PipelineReport<T> {
    let mut report = PipelineReport::default();

    for record in records {
        let (flat, device_id, errors) = stage(record);
        if errors.is_empty() {
            report.accepted.push(flat);
        } else {
            log::warn!("rejecting device `{device_id}`: {}", errors.join("; "));
            report.rejected.push(RejectedDevice { device_id, errors });
        }
    }

    log::debug!(
        "pipeline run: {} accepted, {} rejected of {}",
        report.accepted.len(),
        report.rejected.len(),
        records.len()
    );
    report
}

/// Normalize a batch of gateway records.
pub fn run_gateway_pipeline(records: &[RawGateway]) -> PipelineReport<FlattenedGateway> {
    run(records, |raw| {
        let flat = enrich_gateway(flatten_gateway(raw));
        let errors = validate_gateway(&flat);
        let device_id = flat.id.clone();
        (flat, device_id, errors)
    })
}

/// Normalize a batch of anchor records.
pub fn run_anchor_pipeline(records: &[RawAnchor]) -> PipelineReport<FlattenedAnchor> {
    run(records, |raw| {
        let flat = enrich_anchor(flatten_anchor(raw));
        let errors = validate_anchor(&flat);
        let device_id = flat.id.clone();
        (flat, device_id, errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GatewayCloudData;

    fn gateway(id: &str, rssi: f64) -> RawGateway {
        RawGateway {
            id: id.into(),
            name: format!("GW {id}"),
            cloud_data: Some(GatewayCloudData {
                rssi: Some(rssi),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn one_bad_record_does_not_poison_the_batch() {
        let batch = vec![
            gateway("gw_1", -55.0),
            gateway("gw_2", -5.0), // out of range
            gateway("gw_3", -80.0),
        ];
        let report = run_gateway_pipeline(&batch);
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].device_id, "gw_2");
        assert!(report.rejected[0].errors[0].starts_with("rssi out of range"));
    }

    #[test]
    fn partitions_preserve_input_order() {
        let batch = vec![
            gateway("gw_3", -80.0),
            gateway("gw_bad_a", -1.0),
            gateway("gw_1", -55.0),
            gateway("gw_bad_b", -300.0),
        ];
        let report = run_gateway_pipeline(&batch);
        let accepted: Vec<_> = report.accepted.iter().map(|f| f.id.as_str()).collect();
        let rejected: Vec<_> = report.rejected.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(accepted, ["gw_3", "gw_1"]);
        assert_eq!(rejected, ["gw_bad_a", "gw_bad_b"]);
    }

    #[test]
    fn accepted_records_are_enriched() {
        let report = run_gateway_pipeline(&[gateway("gw_1", -55.0)]);
        assert_eq!(report.accepted[0].signal_quality.as_deref(), Some("excellent"));
    }

    #[test]
    fn empty_batch_is_fine() {
        let report = run_anchor_pipeline(&[]);
        assert!(report.accepted.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn nameless_record_is_rejected_with_its_synthesized_id() {
        let raw = RawAnchor {
            mac_address: Some("aa:bb:cc".into()),
            ..Default::default()
        };
        let report = run_anchor_pipeline(&[raw]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].device_id, "aa:bb:cc");
        assert_eq!(report.rejected[0].errors, vec!["name is missing".to_owned()]);
    }
}
