//! Batch API operations.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::models::{Batch, BatchListParams, CreateBatchParams};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::collection::{Collection, ListParams, Paginate};
use crate::error::EasyPostError;
use crate::resources::common::{IdRef, LabelFormat};

/// Batch operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct BatchService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> BatchService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a batch, optionally seeded with shipments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, params), fields(reference = ?params.reference))]
    pub async fn create(&self, params: CreateBatchParams) -> Result<Batch, EasyPostError> {
        let batch: Batch = self
            .client
            .post("batches", &json!({ "batch": params }))
            .await?;
        ensure_created(batch, "batch")
    }

    /// Create a batch and buy postage for every shipment in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, params), fields(reference = ?params.reference))]
    pub async fn create_and_buy(&self, params: CreateBatchParams) -> Result<Batch, EasyPostError> {
        let batch: Batch = self
            .client
            .post("batches/create_and_buy", &json!({ "batch": params }))
            .await?;
        let batch = ensure_created(batch, "batch")?;

        info!(batch_id = %batch.id, state = ?batch.state, "Batch created for purchase");
        Ok(batch)
    }

    /// Retrieve a batch by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Batch, EasyPostError> {
        let id = require_id(id, "batch")?;
        self.client.get(&format!("batches/{id}"), None::<&()>).await
    }

    /// Add existing shipments to a batch.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no shipment ids are given, or an error if the request fails.
    #[instrument(skip(self))]
    pub async fn add_shipments(&self, id: &str, shipment_ids: &[&str]) -> Result<Batch, EasyPostError> {
        self.change_shipments(id, "add_shipments", shipment_ids).await
    }

    /// Remove shipments from a batch.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no shipment ids are given, or an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_shipments(
        &self,
        id: &str,
        shipment_ids: &[&str],
    ) -> Result<Batch, EasyPostError> {
        self.change_shipments(id, "remove_shipments", shipment_ids)
            .await
    }

    /// Buy postage for every shipment in a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn buy(&self, id: &str) -> Result<Batch, EasyPostError> {
        let id = require_id(id, "batch")?;
        let batch: Batch = self
            .client
            .post(&format!("batches/{id}/buy"), &json!({}))
            .await?;

        info!(batch_id = %batch.id, state = ?batch.state, "Batch purchase started");
        Ok(batch)
    }

    /// Generate one combined label file for a purchased batch.
    ///
    /// Label generation is asynchronous; the returned batch reports
    /// `label_generating` until `label_url` is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn label(&self, id: &str, file_format: LabelFormat) -> Result<Batch, EasyPostError> {
        let id = require_id(id, "batch")?;
        self.client
            .post(
                &format!("batches/{id}/label"),
                &json!({ "file_format": file_format }),
            )
            .await
    }

    /// Create a scan form (manifest) for a purchased batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn create_scan_form(&self, id: &str) -> Result<Batch, EasyPostError> {
        let id = require_id(id, "batch")?;
        let batch: Batch = self
            .client
            .post(&format!("batches/{id}/scan_form"), &json!({}))
            .await?;

        info!(batch_id = %batch.id, "Scan form requested");
        Ok(batch)
    }

    async fn change_shipments(
        &self,
        id: &str,
        action: &str,
        shipment_ids: &[&str],
    ) -> Result<Batch, EasyPostError> {
        let id = require_id(id, "batch")?;
        if shipment_ids.is_empty() {
            return Err(EasyPostError::Validation(format!(
                "{action} needs at least one shipment id"
            )));
        }

        let shipments = shipment_ids
            .iter()
            .map(|shipment_id| require_id(shipment_id, "shipment").map(IdRef::from))
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .post(
                &format!("batches/{id}/{action}"),
                &json!({ "shipments": shipments }),
            )
            .await
    }
}

#[async_trait]
impl Paginate for BatchService<'_> {
    type Item = Batch;
    type Params = BatchListParams;

    #[instrument(skip(self))]
    async fn all(
        &self,
        params: BatchListParams,
    ) -> Result<Collection<Batch, BatchListParams>, EasyPostError> {
        params.validate()?;
        let body: Value = self.client.get("batches", Some(&params)).await?;
        Collection::from_response(body, "batches", params)
    }
}
