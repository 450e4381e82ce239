//! Customs info models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::impl_resource;
use crate::resources::common::Mode;
use crate::resources::customs_item::{CustomsItem, CustomsItemInput};

/// Customs declaration attached to a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsInfo {
    /// Customs info id (`cstinfo_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    /// `documents`, `gift`, `merchandise`, `returned_goods`, `sample` or `other`.
    pub contents_type: Option<String>,
    /// Required when `contents_type` is `other`.
    pub contents_explanation: Option<String>,
    pub customs_certify: Option<bool>,
    pub customs_signer: Option<String>,
    pub eel_pfc: Option<String>,
    /// `return` or `abandon`.
    pub non_delivery_option: Option<String>,
    pub restriction_type: Option<String>,
    pub restriction_comments: Option<String>,
    pub declaration: Option<String>,
    #[serde(default)]
    pub customs_items: Vec<CustomsItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(CustomsInfo);

/// Parameters for creating a customs info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomsInfoParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_certify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_signer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eel_pfc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_delivery_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_items: Option<Vec<CustomsItemInput>>,
}

/// A customs info to attach to a shipment: either an existing one or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomsInfoInput {
    /// Existing customs info by id.
    Existing { id: String },
    /// Customs info created inline.
    New(CreateCustomsInfoParams),
}

impl From<CreateCustomsInfoParams> for CustomsInfoInput {
    fn from(params: CreateCustomsInfoParams) -> Self {
        Self::New(params)
    }
}

impl From<&CustomsInfo> for CustomsInfoInput {
    fn from(info: &CustomsInfo) -> Self {
        Self::Existing {
            id: info.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::customs_item::CreateCustomsItemParams;
    use serde_json::json;

    #[test]
    fn test_mixed_customs_items_serialize() {
        let params = CreateCustomsInfoParams {
            contents_type: Some("merchandise".to_string()),
            customs_items: Some(vec![
                CustomsItemInput::Existing {
                    id: "cstitem_1".to_string(),
                },
                CreateCustomsItemParams {
                    description: Some("Mug".to_string()),
                    quantity: Some(2),
                    ..Default::default()
                }
                .into(),
            ]),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "contents_type": "merchandise",
                "customs_items": [
                    {"id": "cstitem_1"},
                    {"description": "Mug", "quantity": 2}
                ]
            })
        );
    }
}
