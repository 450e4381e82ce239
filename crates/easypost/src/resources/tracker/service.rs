//! Tracker API operations.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::models::{CreateTrackerParams, Tracker, TrackerListParams};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::collection::{Collection, ListParams, Paginate};
use crate::error::EasyPostError;

/// Tracker operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct TrackerService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> TrackerService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Start tracking a package.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank tracking code, or an error if the request fails.
    #[instrument(skip(self))]
    pub async fn create(&self, params: CreateTrackerParams) -> Result<Tracker, EasyPostError> {
        if params.tracking_code.trim().is_empty() {
            return Err(EasyPostError::Validation(
                "tracking_code is required".to_string(),
            ));
        }

        let tracker: Tracker = self
            .client
            .post("trackers", &json!({ "tracker": params }))
            .await?;
        let tracker = ensure_created(tracker, "tracker")?;

        info!(tracker_id = %tracker.id, carrier = ?tracker.carrier, "Tracker created");
        Ok(tracker)
    }

    /// Retrieve a tracker by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Tracker, EasyPostError> {
        let id = require_id(id, "tracker")?;
        self.client.get(&format!("trackers/{id}"), None::<&()>).await
    }
}

#[async_trait]
impl Paginate for TrackerService<'_> {
    type Item = Tracker;
    type Params = TrackerListParams;

    #[instrument(skip(self))]
    async fn all(
        &self,
        params: TrackerListParams,
    ) -> Result<Collection<Tracker, TrackerListParams>, EasyPostError> {
        params.validate()?;
        let body: Value = self.client.get("trackers", Some(&params)).await?;
        Collection::from_response(body, "trackers", params)
    }
}
