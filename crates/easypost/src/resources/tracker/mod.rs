//! Trackers: carrier tracking status for a tracking code.

mod models;
mod service;

pub use models::*;
pub use service::TrackerService;
