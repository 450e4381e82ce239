//! Customs info API operations.

use serde_json::json;
use tracing::instrument;

use super::models::{CreateCustomsInfoParams, CustomsInfo};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::error::EasyPostError;

/// Customs info operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct CustomsInfoService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> CustomsInfoService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a customs info, including any inline customs items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, params))]
    pub async fn create(
        &self,
        params: CreateCustomsInfoParams,
    ) -> Result<CustomsInfo, EasyPostError> {
        let info: CustomsInfo = self
            .client
            .post("customs_infos", &json!({ "customs_info": params }))
            .await?;
        ensure_created(info, "customs info")
    }

    /// Retrieve a customs info by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<CustomsInfo, EasyPostError> {
        let id = require_id(id, "customs info")?;
        self.client
            .get(&format!("customs_infos/{id}"), None::<&()>)
            .await
    }
}
