//! Address models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::{impl_list_params, impl_resource};
use crate::error::FieldError;
use crate::resources::common::Mode;

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Address id (`adr_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub residential: Option<bool>,
    pub carrier_facility: Option<String>,
    pub federal_tax_id: Option<String>,
    pub state_tax_id: Option<String>,
    /// Verification results, present when verification was requested.
    pub verifications: Option<Verifications>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Response fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Address);

/// Results of the verifications requested for an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verifications {
    pub zip4: Option<Verification>,
    pub delivery: Option<Verification>,
}

/// One verification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    /// Extra detail such as latitude/longitude and time zone.
    pub details: Option<Value>,
}

impl Verification {
    /// Whether the verification succeeded without errors.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.success && self.errors.is_empty()
    }
}

/// Parameters for creating an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAddressParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_tax_id: Option<String>,
    /// Verifications to run (`delivery`, `zip4`); failures are reported on the address.
    #[serde(skip)]
    pub verify: Option<Vec<String>>,
    /// Verifications that must pass or the create call fails.
    #[serde(skip)]
    pub verify_strict: Option<Vec<String>>,
}

/// An address to attach to another resource: either an existing one or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    /// Existing address by id.
    Existing { id: String },
    /// Address created inline.
    New(CreateAddressParams),
}

impl From<CreateAddressParams> for AddressInput {
    fn from(params: CreateAddressParams) -> Self {
        Self::New(params)
    }
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self::Existing {
            id: address.id.clone(),
        }
    }
}

/// Filters for listing addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
}

impl_list_params!(AddressListParams);

#[derive(Debug, Deserialize)]
pub(crate) struct AddressEnvelope {
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let params = CreateAddressParams {
            street1: Some("417 Montgomery Street".to_string()),
            zip: Some("94104".to_string()),
            verify: Some(vec!["delivery".to_string()]),
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({"street1": "417 Montgomery Street", "zip": "94104"})
        );
    }

    #[test]
    fn test_address_input_forms() {
        let existing = AddressInput::Existing {
            id: "adr_123".to_string(),
        };
        assert_eq!(serde_json::to_value(&existing).unwrap(), json!({"id": "adr_123"}));

        let inline: AddressInput = CreateAddressParams {
            city: Some("San Francisco".to_string()),
            ..Default::default()
        }
        .into();
        assert_eq!(
            serde_json::to_value(&inline).unwrap(),
            json!({"city": "San Francisco"})
        );
    }

    #[test]
    fn test_decodes_verifications_and_keeps_unknown_fields() {
        let address: Address = serde_json::from_value(json!({
            "id": "adr_123",
            "object": "Address",
            "mode": "test",
            "street1": "417 MONTGOMERY ST",
            "verifications": {
                "delivery": {
                    "success": false,
                    "errors": [{"code": "E.ADDRESS.NOT_FOUND", "field": "address", "message": "Address not found"}]
                }
            }
        }))
        .unwrap();

        let delivery = address.verifications.unwrap().delivery.unwrap();
        assert!(!delivery.is_verified());
        assert_eq!(delivery.errors[0].message, "Address not found");
        assert_eq!(address.extra.get("object"), Some(&json!("Address")));
    }
}
