//! Customs item models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::impl_resource;
use crate::resources::common::{lenient, Mode};

/// A declared item in an international shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsItem {
    /// Customs item id (`cstitem_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    /// Total value of the line in `currency`.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub value: Option<f64>,
    /// Total weight of the line in ounces.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub weight: Option<f64>,
    pub hs_tariff_number: Option<String>,
    /// SKU or other internal code.
    pub code: Option<String>,
    /// ISO country code where the item was manufactured.
    pub origin_country: Option<String>,
    pub currency: Option<String>,
    pub manufacturer: Option<String>,
    pub eccn: Option<String>,
    pub printed_commodity_identifier: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(CustomsItem);

/// Parameters for creating a customs item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomsItemParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_tariff_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eccn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printed_commodity_identifier: Option<String>,
}

/// A customs item to attach to a customs info: either an existing one or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomsItemInput {
    /// Existing customs item by id.
    Existing { id: String },
    /// Customs item created inline.
    New(CreateCustomsItemParams),
}

impl From<CreateCustomsItemParams> for CustomsItemInput {
    fn from(params: CreateCustomsItemParams) -> Self {
        Self::New(params)
    }
}

impl From<&CustomsItem> for CustomsItemInput {
    fn from(item: &CustomsItem) -> Self {
        Self::Existing {
            id: item.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_decodes_from_string() {
        let item: CustomsItem = serde_json::from_value(json!({
            "id": "cstitem_1",
            "object": "CustomsItem",
            "description": "TShirt",
            "quantity": 1,
            "value": "10.0",
            "weight": 8.0,
            "currency": null
        }))
        .unwrap();

        assert_eq!(item.value, Some(10.0));
        assert_eq!(item.weight, Some(8.0));
        assert_eq!(item.currency, None);
    }
}
