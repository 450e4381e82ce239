//! Parcels: package dimensions and weight.

mod models;
mod service;

pub use models::*;
pub use service::ParcelService;
