//! Shipments: rating, label purchase, insurance and refunds.

mod models;
mod service;

pub use models::*;
pub use service::ShipmentService;
