//! Tracker models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::{impl_list_params, impl_resource};
use crate::resources::common::{lenient, Fee, Mode};

/// Tracking status of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerStatus {
    Unknown,
    PreTransit,
    InTransit,
    OutForDelivery,
    Delivered,
    AvailableForPickup,
    ReturnToSender,
    Failure,
    Cancelled,
    Error,
    /// A status this client does not recognise.
    #[serde(other)]
    Other,
}

impl TrackerStatus {
    /// Whether the package will not move any further.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::ReturnToSender | Self::Failure | Self::Cancelled
        )
    }
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::PreTransit => "pre_transit",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::AvailableForPickup => "available_for_pickup",
            Self::ReturnToSender => "return_to_sender",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// A tracked package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    /// Tracker id (`trk_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub tracking_code: Option<String>,
    pub status: Option<TrackerStatus>,
    pub status_detail: Option<String>,
    pub signed_by: Option<String>,
    /// Weight in ounces as reported by the carrier.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub weight: Option<f64>,
    pub est_delivery_date: Option<String>,
    pub shipment_id: Option<String>,
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_details: Vec<TrackingDetail>,
    pub carrier_detail: Option<CarrierDetail>,
    pub public_url: Option<String>,
    #[serde(default)]
    pub fees: Vec<Fee>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Tracker);

impl Tracker {
    /// Most recent scan event, if the carrier has reported any.
    #[must_use]
    pub fn latest_detail(&self) -> Option<&TrackingDetail> {
        self.tracking_details.last()
    }
}

/// One scan event in a tracker's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingDetail {
    pub message: Option<String>,
    pub description: Option<String>,
    pub status: Option<TrackerStatus>,
    pub status_detail: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub carrier_code: Option<String>,
    pub tracking_location: Option<TrackingLocation>,
}

/// Where a scan event happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// Carrier-specific service details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierDetail {
    pub service: Option<String>,
    pub container_type: Option<String>,
    pub est_delivery_date_local: Option<String>,
    pub est_delivery_time_local: Option<String>,
    pub origin_location: Option<String>,
    pub origin_tracking_location: Option<TrackingLocation>,
    pub destination_location: Option<String>,
    pub destination_tracking_location: Option<TrackingLocation>,
    pub guaranteed_delivery_date: Option<String>,
    pub alternate_identifier: Option<String>,
    pub initial_delivery_attempt: Option<String>,
}

/// Parameters for creating a tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTrackerParams {
    pub tracking_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Declared value, for carriers that support tracker insurance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl CreateTrackerParams {
    /// Track `tracking_code`, letting the API detect the carrier.
    pub fn new(tracking_code: impl Into<String>) -> Self {
        Self {
            tracking_code: tracking_code.into(),
            ..Default::default()
        }
    }

    /// Name the carrier explicitly.
    #[must_use]
    pub fn carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }
}

/// Filters for listing trackers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerListParams {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
}

impl_list_params!(TrackerListParams);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tracker() {
        let tracker: Tracker = serde_json::from_value(json!({
            "id": "trk_1",
            "object": "Tracker",
            "mode": "test",
            "tracking_code": "EZ1000000001",
            "status": "in_transit",
            "weight": null,
            "carrier": "USPS",
            "tracking_details": [
                {"message": "Pre-Shipment Info Sent to USPS", "status": "pre_transit", "datetime": "2024-01-01T10:00:00Z"},
                {"message": "Arrived at facility", "status": "in_transit", "datetime": "2024-01-02T10:00:00Z",
                 "tracking_location": {"city": "DALLAS", "state": "TX", "country": null, "zip": "75201"}}
            ],
            "fees": [{"object": "Fee", "type": "TrackerFee", "amount": "0.00000", "charged": false, "refunded": false}],
            "created_at": "2024-01-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(tracker.status, Some(TrackerStatus::InTransit));
        assert!(!TrackerStatus::InTransit.is_final());
        let latest = tracker.latest_detail().unwrap();
        assert_eq!(
            latest.tracking_location.as_ref().unwrap().city.as_deref(),
            Some("DALLAS")
        );
        assert_eq!(tracker.fees[0].fee_type.as_deref(), Some("TrackerFee"));
    }

    #[test]
    fn test_unrecognised_status() {
        let status: TrackerStatus = serde_json::from_value(json!("held_at_customs")).unwrap();
        assert_eq!(status, TrackerStatus::Other);
        assert_eq!(TrackerStatus::OutForDelivery.to_string(), "out_for_delivery");
    }
}
