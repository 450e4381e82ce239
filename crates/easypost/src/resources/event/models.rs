//! Event models and request parameters.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::{impl_list_params, impl_resource};
use crate::error::EasyPostError;
use crate::resources::common::{lenient, Mode};

/// A change notification, e.g. `tracker.updated` or `batch.created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event id (`evt_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    /// What happened, as `<resource>.<action>`.
    pub description: Option<String>,
    /// Delivery status: `pending`, `in_queue`, `retrying`, `completed` or `failed`.
    pub status: Option<String>,
    /// Attributes of the resource before the change.
    pub previous_attributes: Option<Value>,
    /// The resource the event is about, as sent by the API.
    pub result: Option<Value>,
    #[serde(default)]
    pub pending_urls: Vec<String>,
    #[serde(default)]
    pub completed_urls: Vec<String>,
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Event);

impl Event {
    /// Decode the event's `result` into a typed resource.
    ///
    /// ```rust,ignore
    /// if event.description.as_deref() == Some("tracker.updated") {
    ///     let tracker: Tracker = event.result_as()?;
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the event has no result or it does not match `T`.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T, EasyPostError> {
        let result = self.result.clone().ok_or_else(|| {
            EasyPostError::UnexpectedResponse(format!("event {} has no result", self.id))
        })?;
        Ok(serde_json::from_value(result)?)
    }

    /// Resource type named by the description (`tracker` for `tracker.updated`).
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.description
            .as_deref()
            .and_then(|d| d.split_once('.'))
            .map(|(resource, _)| resource)
    }
}

/// One webhook delivery attempt for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Payload id (`payload_...`).
    #[serde(default)]
    pub id: String,
    pub request_url: Option<String>,
    pub request_headers: Option<Map<String, Value>>,
    pub request_body: Option<String>,
    pub response_headers: Option<Map<String, Value>>,
    pub response_body: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub response_code: Option<i64>,
    /// Round-trip time in milliseconds.
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub total_time: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl_resource!(Payload);

/// Filters for listing events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventListParams {
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

impl_list_params!(EventListParams);

#[derive(Debug, Deserialize)]
pub(crate) struct PayloadsEnvelope {
    #[serde(default)]
    pub payloads: Vec<Payload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tracker::{Tracker, TrackerStatus};
    use serde_json::json;

    fn tracker_event() -> Event {
        serde_json::from_value(json!({
            "id": "evt_1",
            "object": "Event",
            "mode": "test",
            "description": "tracker.updated",
            "status": "completed",
            "previous_attributes": {"status": "pre_transit"},
            "result": {
                "id": "trk_1",
                "object": "Tracker",
                "tracking_code": "EZ2000000002",
                "status": "in_transit"
            },
            "pending_urls": [],
            "completed_urls": ["https://example.com/hooks"]
        }))
        .unwrap()
    }

    #[test]
    fn test_result_as_tracker() {
        let event = tracker_event();
        assert_eq!(event.resource_type(), Some("tracker"));

        let tracker: Tracker = event.result_as().unwrap();
        assert_eq!(tracker.id, "trk_1");
        assert_eq!(tracker.status, Some(TrackerStatus::InTransit));
    }

    #[test]
    fn test_result_as_without_result() {
        let mut event = tracker_event();
        event.result = None;
        assert!(matches!(
            event.result_as::<Tracker>(),
            Err(EasyPostError::UnexpectedResponse(_))
        ));
    }
}
