//! Webhook models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::impl_resource;
use crate::resources::common::Mode;

/// An endpoint that receives event deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// Webhook id (`hook_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub url: Option<String>,
    /// Set when the API disabled the webhook after repeated failures.
    pub disabled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Webhook);

impl Webhook {
    /// Whether the webhook is currently receiving deliveries.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.disabled_at.is_none()
    }
}

/// Parameters for creating a webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateWebhookParams {
    pub url: String,
    /// Secret used to sign deliveries; see [`super::validate_webhook`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
}

/// Parameters for updating a webhook.
///
/// Updating with no fields re-enables a disabled webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWebhookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebhooksEnvelope {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}
