//! Customs items: one line of a customs declaration.

mod models;
mod service;

pub use models::*;
pub use service::CustomsItemService;
