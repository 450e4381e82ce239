//! Webhook API operations.

use reqwest::Method;
use serde_json::json;
use tracing::{info, instrument};

use super::models::{CreateWebhookParams, UpdateWebhookParams, Webhook, WebhooksEnvelope};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::error::EasyPostError;

/// Webhook operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct WebhookService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> WebhookService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Register a webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank URL, or an error if the request fails.
    #[instrument(skip(self, params), fields(url = %params.url))]
    pub async fn create(&self, params: CreateWebhookParams) -> Result<Webhook, EasyPostError> {
        if params.url.trim().is_empty() {
            return Err(EasyPostError::Validation("webhook url is required".to_string()));
        }

        let webhook: Webhook = self
            .client
            .post("webhooks", &json!({ "webhook": params }))
            .await?;
        let webhook = ensure_created(webhook, "webhook")?;

        info!(webhook_id = %webhook.id, "Webhook created");
        Ok(webhook)
    }

    /// Retrieve a webhook by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Webhook, EasyPostError> {
        let id = require_id(id, "webhook")?;
        self.client.get(&format!("webhooks/{id}"), None::<&()>).await
    }

    /// List every webhook on the account. This endpoint is not paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Webhook>, EasyPostError> {
        let envelope: WebhooksEnvelope = self.client.get("webhooks", None::<&()>).await?;
        Ok(envelope.webhooks)
    }

    /// Update a webhook's secret, or re-enable it.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self, params))]
    pub async fn update(
        &self,
        id: &str,
        params: UpdateWebhookParams,
    ) -> Result<Webhook, EasyPostError> {
        let id = require_id(id, "webhook")?;
        self.client
            .send_json(
                Method::PATCH,
                &format!("webhooks/{id}"),
                &json!({ "webhook": params }),
            )
            .await
    }

    /// Delete a webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), EasyPostError> {
        let id = require_id(id, "webhook")?;
        self.client.delete(&format!("webhooks/{id}")).await?;
        info!(webhook_id = %id, "Webhook deleted");
        Ok(())
    }
}
