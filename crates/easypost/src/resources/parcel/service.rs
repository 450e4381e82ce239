//! Parcel API operations.

use serde_json::json;
use tracing::instrument;

use super::models::{CreateParcelParams, Parcel};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::error::EasyPostError;

/// Parcel operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct ParcelService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> ParcelService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a parcel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn create(&self, params: CreateParcelParams) -> Result<Parcel, EasyPostError> {
        let parcel: Parcel = self
            .client
            .post("parcels", &json!({ "parcel": params }))
            .await?;
        ensure_created(parcel, "parcel")
    }

    /// Retrieve a parcel by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Parcel, EasyPostError> {
        let id = require_id(id, "parcel")?;
        self.client.get(&format!("parcels/{id}"), None::<&()>).await
    }
}
