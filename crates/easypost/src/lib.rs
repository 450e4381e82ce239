//! Typed async client for the EasyPost shipping API.
//!
//! The crate maps EasyPost's REST resources onto request parameter structs,
//! response models and per-resource services:
//!
//! - **Addresses** and **parcels** - the building blocks of a shipment
//! - **Customs items** and **customs infos** - declarations for international shipments
//! - **Shipments** - rating, label purchase, insurance and refunds
//! - **Batches** - buying, labelling and manifesting many shipments at once
//! - **Trackers** - carrier tracking status
//! - **Events** and **webhooks** - change notifications and their delivery
//!
//! ## Architecture
//!
//! ```text
//! ClientConfig ──► EasyPostClient ──► client.shipments() ──► ShipmentService
//!   (api key,        (reqwest pool,      client.trackers()     .create(params)
//!    base url,        bearer auth)       ...                   .all(list params) ──► Collection
//!    timeout)                                                  .get_next_page(&collection)
//! ```
//!
//! Every service call makes exactly one HTTP request. Nothing is retried or
//! cached; failures surface as [`EasyPostError`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use easypost::{ClientConfig, EasyPostClient, Paginate};
//! use easypost::customs_item::CreateCustomsItemParams;
//! use easypost::tracker::TrackerListParams;
//!
//! let client = EasyPostClient::new(ClientConfig::new(api_key)?)?;
//!
//! let item = client.customs_items().create(CreateCustomsItemParams {
//!     description: Some("TShirt".into()),
//!     quantity: Some(1),
//!     weight: Some(8.0),
//!     value: Some(10.0),
//!     origin_country: Some("us".into()),
//!     hs_tariff_number: Some("123456".into()),
//!     ..Default::default()
//! }).await?;
//!
//! let trackers = client.trackers();
//! let page = trackers.all(TrackerListParams { page_size: Some(2), ..Default::default() }).await?;
//! let next = trackers.get_next_page(&page).await?;
//! ```

mod client;
mod collection;
mod config;
mod error;
pub mod resources;

pub use client::EasyPostClient;
pub use collection::{Collection, ListParams, Paginate, Resource, MAX_PAGE_SIZE};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{EasyPostError, FieldError};

pub use resources::common::{Fee, IdRef, LabelFormat, Message, Mode};
pub use resources::{
    address, batch, customs_info, customs_item, event, parcel, shipment, tracker, webhook,
};
