//! Webhooks: endpoints that receive events, and verification of the
//! deliveries they receive.

mod models;
mod service;
mod signature;

pub use models::*;
pub use service::WebhookService;
pub use signature::{validate_webhook, verify_webhook_signature, SIGNATURE_HEADER};
