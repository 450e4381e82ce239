//! Addresses: creation, listing and delivery verification.

mod models;
mod service;

pub use models::*;
pub use service::AddressService;
