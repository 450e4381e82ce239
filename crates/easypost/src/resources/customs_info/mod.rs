//! Customs infos: the customs declaration for an international shipment.

mod models;
mod service;

pub use models::*;
pub use service::CustomsInfoService;
