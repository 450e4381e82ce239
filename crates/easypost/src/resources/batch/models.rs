//! Batch models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::{impl_list_params, impl_resource};
use crate::resources::common::{lenient, Mode};
use crate::resources::shipment::ShipmentInput;

/// Lifecycle state of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Creating,
    CreationFailed,
    Created,
    Purchasing,
    PurchaseFailed,
    Purchased,
    LabelGenerating,
    LabelGenerated,
    /// A state this client does not recognise.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Creating => "creating",
            Self::CreationFailed => "creation_failed",
            Self::Created => "created",
            Self::Purchasing => "purchasing",
            Self::PurchaseFailed => "purchase_failed",
            Self::Purchased => "purchased",
            Self::LabelGenerating => "label_generating",
            Self::LabelGenerated => "label_generated",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A group of shipments processed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Batch id (`batch_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub reference: Option<String>,
    pub state: Option<BatchState>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub num_shipments: Option<i64>,
    #[serde(default)]
    pub shipments: Vec<BatchShipment>,
    pub status: Option<BatchStatus>,
    pub label_url: Option<String>,
    pub scan_form: Option<ScanForm>,
    pub pickup: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Batch);

impl Batch {
    /// Ids of the shipments in this batch, in batch order.
    #[must_use]
    pub fn shipment_ids(&self) -> Vec<&str> {
        self.shipments.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Summary of one shipment inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchShipment {
    #[serde(default)]
    pub id: String,
    pub reference: Option<String>,
    pub tracking_code: Option<String>,
    /// `postage_purchased`, `postage_purchase_failed`, `queued_for_purchase` or `creation_failed`.
    pub batch_status: Option<String>,
    pub batch_message: Option<String>,
}

/// Per-status shipment counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    #[serde(default, deserialize_with = "lenient::count")]
    pub created: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub queued_for_purchase: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub creation_failed: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub postage_purchased: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub postage_purchase_failed: u32,
}

/// A manifest of shipments for carrier pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanForm {
    /// Scan form id (`sf_...`).
    #[serde(default)]
    pub id: String,
    pub status: Option<String>,
    pub message: Option<String>,
    pub form_url: Option<String>,
    pub form_file_type: Option<String>,
    pub batch_id: Option<String>,
    #[serde(default)]
    pub tracking_codes: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl_resource!(ScanForm, BatchShipment);

/// Parameters for creating a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipments: Option<Vec<ShipmentInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Filters for listing batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
}

impl_list_params!(BatchListParams);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_batch() {
        let batch: Batch = serde_json::from_value(json!({
            "id": "batch_1",
            "object": "Batch",
            "state": "purchased",
            "num_shipments": 2,
            "shipments": [
                {"id": "shp_1", "batch_status": "postage_purchased", "batch_message": null},
                {"id": "shp_2", "batch_status": "postage_purchase_failed", "batch_message": "rate expired"}
            ],
            "status": {"created": 0, "queued_for_purchase": 0, "creation_failed": 0,
                       "postage_purchased": 1, "postage_purchase_failed": 1},
            "label_url": null,
            "scan_form": null
        }))
        .unwrap();

        assert_eq!(batch.state, Some(BatchState::Purchased));
        assert_eq!(batch.shipment_ids(), vec!["shp_1", "shp_2"]);
        assert_eq!(batch.status.unwrap().postage_purchase_failed, 1);
        assert!(batch.scan_form.is_none());
    }

    #[test]
    fn test_status_counts_tolerate_null() {
        let batch: Batch = serde_json::from_value(json!({
            "id": "batch_2",
            "state": "creating",
            "status": {"created": null, "queued_for_purchase": "3",
                       "postage_purchased": 1}
        }))
        .unwrap();

        let status = batch.status.unwrap();
        assert_eq!(status.created, 0);
        assert_eq!(status.queued_for_purchase, 3);
        assert_eq!(status.creation_failed, 0);
        assert_eq!(status.postage_purchased, 1);

        let negative = serde_json::from_value::<BatchStatus>(json!({"created": -1}));
        assert!(negative.is_err());
    }

    #[test]
    fn test_unknown_state() {
        let state: BatchState = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(state, BatchState::Unknown);
        assert_eq!(BatchState::LabelGenerated.to_string(), "label_generated");
    }
}
