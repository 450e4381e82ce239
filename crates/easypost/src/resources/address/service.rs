//! Address API operations.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::instrument;

use super::models::{Address, AddressEnvelope, AddressListParams, CreateAddressParams};
use crate::client::{ensure_created, require_id, EasyPostClient};
use crate::collection::{Collection, ListParams, Paginate};
use crate::error::EasyPostError;

/// Address operations, borrowed from an [`EasyPostClient`].
#[derive(Debug, Clone, Copy)]
pub struct AddressService<'a> {
    client: &'a EasyPostClient,
}

impl<'a> AddressService<'a> {
    pub(crate) fn new(client: &'a EasyPostClient) -> Self {
        Self { client }
    }

    /// Create an address, running any verifications named in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or strict verification rejects the address.
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: CreateAddressParams) -> Result<Address, EasyPostError> {
        let body = create_body(&params)?;
        let address: Address = self.client.post("addresses", &body).await?;
        ensure_created(address, "address")
    }

    /// Create an address and verify it in one call; fails if verification fails.
    ///
    /// # Errors
    ///
    /// Returns an API error if the address cannot be verified.
    #[instrument(skip(self, params))]
    pub async fn create_and_verify(
        &self,
        params: CreateAddressParams,
    ) -> Result<Address, EasyPostError> {
        let body = json!({ "address": params });
        let envelope: AddressEnvelope = self
            .client
            .post("addresses/create_and_verify", &body)
            .await?;
        ensure_created(envelope.address, "address")
    }

    /// Retrieve an address by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, id: &str) -> Result<Address, EasyPostError> {
        let id = require_id(id, "address")?;
        self.client
            .get(&format!("addresses/{id}"), None::<&()>)
            .await
    }

    /// Verify an existing address.
    ///
    /// # Errors
    ///
    /// Returns an API error if the address cannot be verified.
    #[instrument(skip(self))]
    pub async fn verify(&self, id: &str) -> Result<Address, EasyPostError> {
        let id = require_id(id, "address")?;
        let envelope: AddressEnvelope = self
            .client
            .get(&format!("addresses/{id}/verify"), None::<&()>)
            .await?;
        Ok(envelope.address)
    }
}

#[async_trait]
impl Paginate for AddressService<'_> {
    type Item = Address;
    type Params = AddressListParams;

    #[instrument(skip(self))]
    async fn all(
        &self,
        params: AddressListParams,
    ) -> Result<Collection<Address, AddressListParams>, EasyPostError> {
        params.validate()?;
        let body: Value = self.client.get("addresses", Some(&params)).await?;
        Collection::from_response(body, "addresses", params)
    }
}

fn create_body(params: &CreateAddressParams) -> Result<Value, EasyPostError> {
    let mut body = Map::new();
    body.insert("address".to_string(), serde_json::to_value(params)?);
    if let Some(verify) = &params.verify {
        body.insert("verify".to_string(), json!(verify));
    }
    if let Some(verify_strict) = &params.verify_strict {
        body.insert("verify_strict".to_string(), json!(verify_strict));
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_places_verify_at_top_level() {
        let params = CreateAddressParams {
            street1: Some("417 Montgomery Street".to_string()),
            verify_strict: Some(vec!["delivery".to_string()]),
            ..Default::default()
        };

        let body = create_body(&params).unwrap();
        assert_eq!(
            body,
            json!({
                "address": {"street1": "417 Montgomery Street"},
                "verify_strict": ["delivery"]
            })
        );
    }
}
