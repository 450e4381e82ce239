//! Group existing shipments into a batch, buy them and request a manifest.
//!
//! Run with: cargo run --example batch -- shp_... shp_...
//!
//! Requires `EASYPOST_API_KEY`. Purchase and scan form generation are
//! asynchronous; re-run `easypost batch get --id ...` to watch progress.

use easypost::batch::CreateBatchParams;
use easypost::EasyPostClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let shipment_ids: Vec<String> = std::env::args().skip(1).collect();
    if shipment_ids.is_empty() {
        println!("❌ Pass one or more shipment ids");
        return Ok(());
    }

    println!("🗂️  Batch of {} shipment(s)\n", shipment_ids.len());

    let client = EasyPostClient::from_env()?;
    let batches = client.batches();

    let batch = batches
        .create(CreateBatchParams {
            reference: Some("example-batch".to_string()),
            ..Default::default()
        })
        .await?;
    println!("✅ Created {}", batch.id);

    let ids: Vec<&str> = shipment_ids.iter().map(String::as_str).collect();
    let batch = batches.add_shipments(&batch.id, &ids).await?;
    println!("➕ Batch now holds {} shipment(s)", batch.shipment_ids().len());

    let batch = batches.buy(&batch.id).await?;
    println!(
        "💳 Purchase started, state: {}",
        batch.state.map(|s| s.to_string()).unwrap_or_default()
    );

    let batch = batches.create_scan_form(&batch.id).await?;
    println!(
        "📋 Scan form: {}",
        batch
            .scan_form
            .as_ref()
            .and_then(|form| form.form_url.as_deref())
            .unwrap_or("pending")
    );

    Ok(())
}
