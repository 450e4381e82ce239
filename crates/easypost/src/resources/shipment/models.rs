//! Shipment models and request parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::{impl_list_params, impl_resource};
use crate::error::EasyPostError;
use crate::resources::address::{Address, AddressInput};
use crate::resources::common::{lenient, Fee, LabelFormat, Message, Mode};
use crate::resources::customs_info::{CustomsInfo, CustomsInfoInput};
use crate::resources::parcel::{Parcel, ParcelInput};
use crate::resources::tracker::Tracker;

/// A shipment between two addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment id (`shp_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub reference: Option<String>,
    pub status: Option<String>,
    pub tracking_code: Option<String>,
    pub to_address: Option<Address>,
    pub from_address: Option<Address>,
    pub return_address: Option<Address>,
    pub buyer_address: Option<Address>,
    pub parcel: Option<Parcel>,
    pub customs_info: Option<CustomsInfo>,
    #[serde(default)]
    pub rates: Vec<Rate>,
    pub selected_rate: Option<Rate>,
    pub postage_label: Option<PostageLabel>,
    pub tracker: Option<Tracker>,
    /// Insured amount in USD.
    pub insurance: Option<String>,
    pub options: Option<Value>,
    pub is_return: Option<bool>,
    pub usps_zone: Option<Value>,
    pub refund_status: Option<String>,
    pub batch_id: Option<String>,
    pub batch_status: Option<String>,
    pub batch_message: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub fees: Vec<Fee>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Shipment);

impl Shipment {
    /// Cheapest rate on this shipment, optionally limited to some carriers/services.
    ///
    /// Matching is case-insensitive; an empty filter list matches everything.
    ///
    /// # Errors
    ///
    /// Returns [`EasyPostError::NoRatesFound`] when no rate passes the filters.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, EasyPostError> {
        lowest_rate(&self.rates, carriers, services)
    }
}

/// Cheapest rate in `rates` among the given carriers and services.
///
/// # Errors
///
/// Returns [`EasyPostError::NoRatesFound`] when no rate passes the filters.
pub fn lowest_rate<'r>(
    rates: &'r [Rate],
    carriers: &[&str],
    services: &[&str],
) -> Result<&'r Rate, EasyPostError> {
    let matches = |filter: &[&str], value: Option<&str>| {
        filter.is_empty()
            || value.is_some_and(|v| filter.iter().any(|f| f.eq_ignore_ascii_case(v)))
    };

    rates
        .iter()
        .filter(|rate| matches(carriers, rate.carrier.as_deref()))
        .filter(|rate| matches(services, rate.service.as_deref()))
        .filter_map(|rate| rate.amount().map(|amount| (amount, rate)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, rate)| rate)
        .ok_or_else(|| {
            EasyPostError::NoRatesFound(format!(
                "no rate matches carriers {carriers:?} and services {services:?}"
            ))
        })
}

/// A price quote for one carrier service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Rate id (`rate_...`).
    #[serde(default)]
    pub id: String,
    pub mode: Option<Mode>,
    pub service: Option<String>,
    pub carrier: Option<String>,
    pub carrier_account_id: Option<String>,
    pub shipment_id: Option<String>,
    /// Negotiated price, as a decimal string.
    pub rate: Option<String>,
    pub currency: Option<String>,
    pub retail_rate: Option<String>,
    pub retail_currency: Option<String>,
    pub list_rate: Option<String>,
    pub list_currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub delivery_days: Option<i64>,
    pub delivery_date: Option<String>,
    pub delivery_date_guaranteed: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub est_delivery_days: Option<i64>,
}

impl_resource!(Rate);

impl Rate {
    /// Negotiated price as a number, if it parses.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.rate.as_deref().and_then(|r| r.trim().parse().ok())
    }
}

/// A purchased postage label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostageLabel {
    #[serde(default)]
    pub id: String,
    pub label_url: Option<String>,
    pub label_pdf_url: Option<String>,
    pub label_zpl_url: Option<String>,
    pub label_epl2_url: Option<String>,
    pub label_file_type: Option<String>,
    pub label_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub label_resolution: Option<i64>,
    pub label_size: Option<String>,
    pub integrated_form: Option<String>,
}

/// Shipment options sent at creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_format: Option<LabelFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_custom_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_custom_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday_delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_for_pickup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_rates_eligibility: Option<String>,
}

/// Parameters for creating a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateShipmentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<ParcelInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_info: Option<CustomsInfoInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ShipmentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_return: Option<bool>,
    /// Restrict rating to these carrier account ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_accounts: Option<Vec<String>>,
    /// With `carrier`, buy this service at creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
}

/// A shipment to include in a batch: either an existing one or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShipmentInput {
    /// Existing shipment by id.
    Existing { id: String },
    /// Shipment created inline.
    New(Box<CreateShipmentParams>),
}

impl From<CreateShipmentParams> for ShipmentInput {
    fn from(params: CreateShipmentParams) -> Self {
        Self::New(Box::new(params))
    }
}

impl From<&Shipment> for ShipmentInput {
    fn from(shipment: &Shipment) -> Self {
        Self::Existing {
            id: shipment.id.clone(),
        }
    }
}

/// Parameters for buying a rate on a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyShipmentParams {
    pub rate: RateRef,
    /// Amount to insure, in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_shipper_id: Option<String>,
}

impl BuyShipmentParams {
    /// Buy `rate` without insurance.
    #[must_use]
    pub fn new(rate: &Rate) -> Self {
        Self {
            rate: RateRef {
                id: rate.id.clone(),
            },
            insurance: None,
            end_shipper_id: None,
        }
    }

    /// Insure the shipment for `amount` USD.
    #[must_use]
    pub fn insurance(mut self, amount: impl Into<String>) -> Self {
        self.insurance = Some(amount.into());
        self
    }
}

/// Reference to a rate by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRef {
    pub id: String,
}

/// Filters for listing shipments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentListParams {
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
    /// Only purchased (`true`) or unpurchased (`false`) shipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_children: Option<bool>,
}

impl_list_params!(ShipmentListParams);

#[derive(Debug, Deserialize)]
pub(crate) struct RatesEnvelope {
    #[serde(default)]
    pub rates: Vec<Rate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::address::CreateAddressParams;
    use serde_json::json;

    fn rate(id: &str, carrier: &str, service: &str, amount: &str) -> Rate {
        serde_json::from_value(json!({
            "id": id,
            "carrier": carrier,
            "service": service,
            "rate": amount
        }))
        .unwrap()
    }

    #[test]
    fn test_lowest_rate() {
        let rates = vec![
            rate("rate_1", "USPS", "Priority", "7.58"),
            rate("rate_2", "USPS", "First", "4.13"),
            rate("rate_3", "UPS", "Ground", "9.12"),
            rate("rate_4", "FedEx", "Express", "not-a-number"),
        ];

        assert_eq!(lowest_rate(&rates, &[], &[]).unwrap().id, "rate_2");
        assert_eq!(lowest_rate(&rates, &["ups"], &[]).unwrap().id, "rate_3");
        assert_eq!(
            lowest_rate(&rates, &["USPS"], &["priority"]).unwrap().id,
            "rate_1"
        );
        assert!(matches!(
            lowest_rate(&rates, &["FedEx"], &[]),
            Err(EasyPostError::NoRatesFound(_))
        ));
    }

    #[test]
    fn test_create_params_skip_unset() {
        let params = CreateShipmentParams {
            to_address: Some(AddressInput::Existing {
                id: "adr_to".to_string(),
            }),
            from_address: Some(
                CreateAddressParams {
                    zip: Some("94104".to_string()),
                    ..Default::default()
                }
                .into(),
            ),
            options: Some(ShipmentOptions {
                label_format: Some(LabelFormat::Zpl),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "to_address": {"id": "adr_to"},
                "from_address": {"zip": "94104"},
                "options": {"label_format": "ZPL"}
            })
        );
    }

    #[test]
    fn test_buy_params() {
        let params = BuyShipmentParams::new(&rate("rate_9", "USPS", "First", "4.13"))
            .insurance("249.99");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"rate": {"id": "rate_9"}, "insurance": "249.99"})
        );
    }
}
