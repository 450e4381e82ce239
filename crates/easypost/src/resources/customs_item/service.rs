//! Customs item API operations.

use serde_json::json;
use tracing::instrument;

use super::models::{CreateCustomsItemParams, CustomsItem};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::error::EasyPostError;

/// Customs item operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct CustomsItemService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> CustomsItemService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a customs item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        params: CreateCustomsItemParams,
    ) -> Result<CustomsItem, EasyPostError> {
        let item: CustomsItem = self
            .client
            .post("customs_items", &json!({ "customs_item": params }))
            .await?;
        ensure_created(item, "customs item")
    }

    /// Retrieve a customs item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<CustomsItem, EasyPostError> {
        let id = require_id(id, "customs item")?;
        self.client
            .get(&format!("customs_items/{id}"), None::<&()>)
            .await
    }
}
