//! Event API operations.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use super::models::{Event, EventListParams, Payload, PayloadsEnvelope};
use crate::client::{require_id, EasyPostClient};
use crate::collection::{Collection, ListParams, Paginate};
use crate::error::EasyPostError;

/// Event operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct EventService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> EventService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Retrieve an event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Event, EasyPostError> {
        let id = require_id(id, "event")?;
        self.client.get(&format!("events/{id}"), None::<&()>).await
    }

    /// List the webhook deliveries made for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve_all_payloads(&self, event_id: &str) -> Result<Vec<Payload>, EasyPostError> {
        let event_id = require_id(event_id, "event")?;
        let envelope: PayloadsEnvelope = self
            .client
            .get(&format!("events/{event_id}/payloads"), None::<&()>)
            .await?;
        Ok(envelope.payloads)
    }

    /// Retrieve one webhook delivery for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve_payload(
        &self,
        event_id: &str,
        payload_id: &str,
    ) -> Result<Payload, EasyPostError> {
        let event_id = require_id(event_id, "event")?;
        let payload_id = require_id(payload_id, "payload")?;
        self.client
            .get(
                &format!("events/{event_id}/payloads/{payload_id}"),
                None::<&()>,
            )
            .await
    }
}

#[async_trait]
impl Paginate for EventService<'_> {
    type Item = Event;
    type Params = EventListParams;

    #[instrument(skip(self))]
    async fn all(
        &self,
        params: EventListParams,
    ) -> Result<Collection<Event, EventListParams>, EasyPostError> {
        params.validate()?;
        let body: Value = self.client.get("events", Some(&params)).await?;
        Collection::from_response(body, "events", params)
    }
}
