//! Rate a domestic shipment, buy the cheapest USPS rate and start tracking it.
//!
//! Run with: cargo run --example buy_shipment
//!
//! Requires `EASYPOST_API_KEY` (use a test key; purchases with it are free).

use easypost::address::CreateAddressParams;
use easypost::parcel::CreateParcelParams;
use easypost::shipment::{BuyShipmentParams, CreateShipmentParams};
use easypost::EasyPostClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🚚 Buy a shipment\n");

    let client = EasyPostClient::from_env()?;
    let shipments = client.shipments();

    let shipment = shipments
        .create(CreateShipmentParams {
            to_address: Some(
                CreateAddressParams {
                    name: Some("Dr. Steve Brule".to_string()),
                    street1: Some("179 N Harbor Dr".to_string()),
                    city: Some("Redondo Beach".to_string()),
                    state: Some("CA".to_string()),
                    zip: Some("90277".to_string()),
                    country: Some("US".to_string()),
                    ..Default::default()
                }
                .into(),
            ),
            from_address: Some(
                CreateAddressParams {
                    company: Some("EasyPost".to_string()),
                    street1: Some("417 Montgomery Street".to_string()),
                    street2: Some("5th Floor".to_string()),
                    city: Some("San Francisco".to_string()),
                    state: Some("CA".to_string()),
                    zip: Some("94104".to_string()),
                    country: Some("US".to_string()),
                    phone: Some("415-528-7555".to_string()),
                    ..Default::default()
                }
                .into(),
            ),
            parcel: Some(
                CreateParcelParams {
                    length: Some(20.2),
                    width: Some(10.9),
                    height: Some(5.0),
                    weight: Some(65.9),
                    ..Default::default()
                }
                .into(),
            ),
            ..Default::default()
        })
        .await?;
    println!("✅ Shipment {} with {} rates", shipment.id, shipment.rates.len());

    let rate = shipment.lowest_rate(&["USPS"], &[])?;
    println!(
        "💲 Cheapest USPS rate: {} {} {}",
        rate.service.as_deref().unwrap_or("-"),
        rate.rate.as_deref().unwrap_or("-"),
        rate.currency.as_deref().unwrap_or("")
    );

    let bought = shipments
        .buy(&shipment.id, BuyShipmentParams::new(rate).insurance("100.00"))
        .await?;
    println!(
        "🏷️  Label: {}",
        bought
            .postage_label
            .as_ref()
            .and_then(|label| label.label_url.as_deref())
            .unwrap_or("-")
    );
    println!("🔎 Tracking: {}", bought.tracking_code.as_deref().unwrap_or("-"));

    Ok(())
}
