//! Batches: groups of shipments bought, labelled and manifested together.

mod models;
mod service;

pub use models::*;
pub use service::BatchService;
