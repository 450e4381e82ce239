//! Create customs declarations for an international shipment.
//!
//! Run with: cargo run --example customs
//!
//! Requires `EASYPOST_API_KEY` (a test key is fine).

use easypost::customs_info::CreateCustomsInfoParams;
use easypost::customs_item::CreateCustomsItemParams;
use easypost::EasyPostClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🛃 Customs declaration\n");

    let client = EasyPostClient::from_env()?;

    let item = client
        .customs_items()
        .create(CreateCustomsItemParams {
            description: Some("TShirt".to_string()),
            quantity: Some(1),
            weight: Some(8.0),
            value: Some(10.0),
            origin_country: Some("us".to_string()),
            hs_tariff_number: Some("123456".to_string()),
            ..Default::default()
        })
        .await?;
    println!("✅ Customs item {}", item.id);

    let info = client
        .customs_infos()
        .create(CreateCustomsInfoParams {
            contents_type: Some("merchandise".to_string()),
            customs_certify: Some(true),
            customs_signer: Some("Steve Brule".to_string()),
            eel_pfc: Some("NOEEI 30.37(a)".to_string()),
            non_delivery_option: Some("return".to_string()),
            restriction_type: Some("none".to_string()),
            customs_items: Some(vec![(&item).into()]),
            ..Default::default()
        })
        .await?;
    println!("✅ Customs info {} with {} item(s)", info.id, info.customs_items.len());

    Ok(())
}
