//! Page through recent trackers.
//!
//! Run with: cargo run --example list_trackers
//!
//! Requires `EASYPOST_API_KEY`.

use chrono::{Duration, Utc};
use easypost::tracker::TrackerListParams;
use easypost::{EasyPostClient, Paginate};

const MAX_PAGES: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("📦 Trackers created in the last 30 days\n");

    let client = EasyPostClient::from_env()?;
    let trackers = client.trackers();

    let mut page = trackers
        .all(TrackerListParams {
            page_size: Some(5),
            start_datetime: Some(Utc::now() - Duration::days(30)),
            ..Default::default()
        })
        .await?;

    for n in 1..=MAX_PAGES {
        println!("Page {n}:");
        for tracker in &page {
            println!(
                "   {} {} {}",
                tracker.id,
                tracker.tracking_code.as_deref().unwrap_or("-"),
                tracker.status.map(|s| s.to_string()).unwrap_or_default()
            );
        }

        if page.is_exhausted() {
            println!("\n✅ No more trackers");
            break;
        }
        page = trackers.get_next_page(&page).await?;
    }

    Ok(())
}
