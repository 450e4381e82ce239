//! Parcel models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::impl_resource;
use crate::resources::common::{lenient, Mode};

/// A package. Dimensions are in inches, weight in ounces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    /// Parcel id (`prcl_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub weight: Option<f64>,
    /// Carrier packaging name, e.g. `FlatRateEnvelope`.
    pub predefined_package: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Parcel);

/// Parameters for creating a parcel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateParcelParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_package: Option<String>,
}

/// A parcel to attach to a shipment: either an existing one or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParcelInput {
    /// Existing parcel by id.
    Existing { id: String },
    /// Parcel created inline.
    New(CreateParcelParams),
}

impl From<CreateParcelParams> for ParcelInput {
    fn from(params: CreateParcelParams) -> Self {
        Self::New(params)
    }
}

impl From<&Parcel> for ParcelInput {
    fn from(parcel: &Parcel) -> Self {
        Self::Existing {
            id: parcel.id.clone(),
        }
    }
}
