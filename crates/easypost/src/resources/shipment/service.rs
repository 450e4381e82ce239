//! Shipment API operations.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::models::{
    BuyShipmentParams, CreateShipmentParams, Rate, RatesEnvelope, Shipment, ShipmentListParams,
};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::collection::{Collection, ListParams, Paginate};
use crate::error::EasyPostError;
use crate::resources::common::LabelFormat;

/// Shipment operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct ShipmentService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> ShipmentService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a shipment and fetch its rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, params), fields(reference = ?params.reference))]
    pub async fn create(&self, params: CreateShipmentParams) -> Result<Shipment, EasyPostError> {
        let shipment: Shipment = self
            .client
            .post("shipments", &json!({ "shipment": params }))
            .await?;
        ensure_created(shipment, "shipment")
    }

    /// Retrieve a shipment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Shipment, EasyPostError> {
        let id = require_id(id, "shipment")?;
        self.client.get(&format!("shipments/{id}"), None::<&()>).await
    }

    /// Buy postage for a shipment at the given rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the purchase is rejected.
    #[instrument(skip(self, params), fields(rate_id = %params.rate.id))]
    pub async fn buy(&self, id: &str, params: BuyShipmentParams) -> Result<Shipment, EasyPostError> {
        let id = require_id(id, "shipment")?;
        require_id(&params.rate.id, "rate")?;

        let shipment: Shipment = self
            .client
            .post(&format!("shipments/{id}/buy"), &params)
            .await?;

        info!(
            shipment_id = %shipment.id,
            tracking_code = ?shipment.tracking_code,
            "Shipment purchased"
        );
        Ok(shipment)
    }

    /// Fetch a fresh set of rates for a shipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn regenerate_rates(&self, id: &str) -> Result<Vec<Rate>, EasyPostError> {
        let id = require_id(id, "shipment")?;
        let envelope: RatesEnvelope = self
            .client
            .post(&format!("shipments/{id}/rerate"), &json!({}))
            .await?;
        Ok(envelope.rates)
    }

    /// Convert a purchased shipment's label to another file format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn label(&self, id: &str, file_format: LabelFormat) -> Result<Shipment, EasyPostError> {
        let id = require_id(id, "shipment")?;
        self.client
            .get(
                &format!("shipments/{id}/label"),
                Some(&[("file_format", file_format.to_string())]),
            )
            .await
    }

    /// Insure a purchased shipment for `amount` USD.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or amount is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn insure(&self, id: &str, amount: &str) -> Result<Shipment, EasyPostError> {
        let id = require_id(id, "shipment")?;
        if amount.trim().is_empty() {
            return Err(EasyPostError::Validation(
                "insurance amount is required".to_string(),
            ));
        }

        let shipment: Shipment = self
            .client
            .post(&format!("shipments/{id}/insure"), &json!({ "amount": amount }))
            .await?;

        info!(shipment_id = %shipment.id, insurance = ?shipment.insurance, "Shipment insured");
        Ok(shipment)
    }

    /// Request a refund for an unused label.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn refund(&self, id: &str) -> Result<Shipment, EasyPostError> {
        let id = require_id(id, "shipment")?;
        let shipment: Shipment = self
            .client
            .post(&format!("shipments/{id}/refund"), &json!({}))
            .await?;

        info!(shipment_id = %shipment.id, refund_status = ?shipment.refund_status, "Refund requested");
        Ok(shipment)
    }
}

#[async_trait]
impl Paginate for ShipmentService<'_> {
    type Item = Shipment;
    type Params = ShipmentListParams;

    #[instrument(skip(self))]
    async fn all(
        &self,
        params: ShipmentListParams,
    ) -> Result<Collection<Shipment, ShipmentListParams>, EasyPostError> {
        params.validate()?;
        let body: Value = self.client.get("shipments", Some(&params)).await?;
        Collection::from_response(body, "shipments", params)
    }
}
