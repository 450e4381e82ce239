//! Events: notifications about changes to other resources, and the webhook
//! deliveries made for them.

mod models;
mod service;

pub use models::*;
pub use service::EventService;
