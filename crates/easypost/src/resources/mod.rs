//! API resources: models, request parameters and the services that call them.

pub mod address;
pub mod batch;
pub mod common;
pub mod customs_info;
pub mod customs_item;
pub mod event;
pub mod parcel;
pub mod shipment;
pub mod tracker;
pub mod webhook;

pub use address::AddressService;
pub use batch::BatchService;
pub use customs_info::CustomsInfoService;
pub use customs_item::CustomsItemService;
pub use event::EventService;
pub use parcel::ParcelService;
pub use shipment::ShipmentService;
pub use tracker::TrackerService;
pub use webhook::WebhookService;
