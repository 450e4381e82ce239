//! EasyPost CLI - inspect shipments, trackers, batches and events.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use easypost::batch::BatchListParams;
use easypost::event::EventListParams;
use easypost::shipment::ShipmentListParams;
use easypost::tracker::{CreateTrackerParams, TrackerListParams};
use easypost::{ClientConfig, EasyPostClient, LabelFormat, Paginate, DEFAULT_BASE_URL};

/// EasyPost CLI - work with the EasyPost shipping API.
#[derive(Parser)]
#[command(name = "easypost")]
#[command(about = "Inspect and manage EasyPost shipments, trackers, batches and events")]
struct Cli {
    /// EasyPost API key (or set `EASYPOST_API_KEY` env var).
    #[arg(long, env = "EASYPOST_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API base URL.
    #[arg(long, env = "EASYPOST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "EASYPOST_TIMEOUT_SECS", default_value = "60")]
    timeout: u64,

    /// Print raw JSON instead of a summary.
    #[arg(long, default_value = "false")]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tracker operations.
    #[command(subcommand)]
    Tracker(TrackerCommand),

    /// Shipment operations.
    #[command(subcommand)]
    Shipment(ShipmentCommand),

    /// Batch operations.
    #[command(subcommand)]
    Batch(BatchCommand),

    /// Event operations.
    #[command(subcommand)]
    Event(EventCommand),
}

#[derive(Subcommand)]
enum TrackerCommand {
    /// Start tracking a package.
    Create {
        /// Carrier tracking code.
        #[arg(long)]
        tracking_code: String,

        /// Carrier name (detected when omitted).
        #[arg(long)]
        carrier: Option<String>,
    },

    /// Get a tracker.
    Get {
        /// Tracker ID.
        #[arg(long)]
        id: String,
    },

    /// List trackers.
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only trackers for this tracking code.
        #[arg(long)]
        tracking_code: Option<String>,

        /// Only trackers for this carrier.
        #[arg(long)]
        carrier: Option<String>,
    },
}

#[derive(Subcommand)]
enum ShipmentCommand {
    /// Get a shipment.
    Get {
        /// Shipment ID.
        #[arg(long)]
        id: String,
    },

    /// List shipments.
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only purchased (true) or unpurchased (false) shipments.
        #[arg(long)]
        purchased: Option<bool>,
    },

    /// Convert a purchased label to another format.
    Label {
        /// Shipment ID.
        #[arg(long)]
        id: String,

        /// PNG, PDF, ZPL or EPL2.
        #[arg(long, default_value = "PDF")]
        format: LabelFormat,
    },

    /// Request a refund for an unused label.
    Refund {
        /// Shipment ID.
        #[arg(long)]
        id: String,

        /// Skip confirmation prompt.
        #[arg(long, short = 'y', default_value = "false")]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum BatchCommand {
    /// Get a batch.
    Get {
        /// Batch ID.
        #[arg(long)]
        id: String,
    },

    /// List batches.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    /// Get an event.
    Get {
        /// Event ID.
        #[arg(long)]
        id: String,
    },

    /// List events.
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List webhook deliveries for an event.
    Payloads {
        /// Event ID.
        #[arg(long)]
        id: String,
    },
}

/// Paging flags shared by every list command.
#[derive(clap::Args)]
struct PageArgs {
    /// Items per page (1-100).
    #[arg(long, default_value = "20")]
    page_size: u32,

    /// Number of pages to fetch.
    #[arg(long, default_value = "1")]
    pages: usize,

    /// Only items created at or after this RFC 3339 timestamp.
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Only items created before this RFC 3339 timestamp.
    #[arg(long)]
    end: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ClientConfig::new(cli.api_key.trim())
        .context("Invalid API key")?
        .with_base_url(&cli.base_url)
        .context("Invalid base URL")?
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = EasyPostClient::new(config).context("Failed to create EasyPost client")?;

    match cli.command {
        Commands::Tracker(command) => run_tracker(&client, command, cli.json).await,
        Commands::Shipment(command) => run_shipment(&client, command, cli.json).await,
        Commands::Batch(command) => run_batch(&client, command, cli.json).await,
        Commands::Event(command) => run_event(&client, command, cli.json).await,
    }
}

async fn run_tracker(client: &EasyPostClient, command: TrackerCommand, json: bool) -> Result<()> {
    let trackers = client.trackers();

    match command {
        TrackerCommand::Create {
            tracking_code,
            carrier,
        } => {
            let mut params = CreateTrackerParams::new(tracking_code);
            params.carrier = carrier;
            let tracker = trackers.create(params).await?;
            if json {
                return print_json(&tracker);
            }
            println!("\n✅ Tracker created: {}", tracker.id);
            println!("   Code:    {}", tracker.tracking_code.unwrap_or_default());
            println!("   Carrier: {}", tracker.carrier.unwrap_or_default());
        }

        TrackerCommand::Get { id } => {
            let tracker = trackers.retrieve(&id).await?;
            if json {
                return print_json(&tracker);
            }
            println!("\n📦 Tracker {}", tracker.id);
            println!("   Code:    {}", tracker.tracking_code.as_deref().unwrap_or("-"));
            println!("   Carrier: {}", tracker.carrier.as_deref().unwrap_or("-"));
            println!(
                "   Status:  {}",
                tracker.status.map_or_else(|| "-".to_string(), |s| s.to_string())
            );
            for detail in &tracker.tracking_details {
                let when = detail
                    .datetime
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("   {when:<17} {}", detail.message.as_deref().unwrap_or(""));
            }
        }

        TrackerCommand::List {
            page,
            tracking_code,
            carrier,
        } => {
            let params = TrackerListParams {
                page_size: Some(page.page_size),
                start_datetime: page.start,
                end_datetime: page.end,
                tracking_code,
                carrier,
                ..Default::default()
            };
            let rows = trackers.collect_pages(params, page.pages).await?;

            if json {
                return print_json(&rows);
            }
            println!("\n{:<36} {:<10} {:<26} {:<18}", "ID", "CARRIER", "TRACKING CODE", "STATUS");
            println!("{}", "-".repeat(92));
            for tracker in rows {
                println!(
                    "{:<36} {:<10} {:<26} {:<18}",
                    tracker.id,
                    tracker.carrier.unwrap_or_default(),
                    tracker.tracking_code.unwrap_or_default(),
                    tracker.status.map(|s| s.to_string()).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

async fn run_shipment(client: &EasyPostClient, command: ShipmentCommand, json: bool) -> Result<()> {
    let shipments = client.shipments();

    match command {
        ShipmentCommand::Get { id } => {
            let shipment = shipments.retrieve(&id).await?;
            if json {
                return print_json(&shipment);
            }
            println!("\n📦 Shipment {}", shipment.id);
            println!("   Status:   {}", shipment.status.as_deref().unwrap_or("-"));
            println!("   Tracking: {}", shipment.tracking_code.as_deref().unwrap_or("-"));
            if let Some(rate) = &shipment.selected_rate {
                println!(
                    "   Bought:   {} {} @ {} {}",
                    rate.carrier.as_deref().unwrap_or(""),
                    rate.service.as_deref().unwrap_or(""),
                    rate.rate.as_deref().unwrap_or(""),
                    rate.currency.as_deref().unwrap_or("")
                );
            } else if let Ok(rate) = shipment.lowest_rate(&[], &[]) {
                println!(
                    "   Cheapest: {} {} @ {} ({} rates)",
                    rate.carrier.as_deref().unwrap_or(""),
                    rate.service.as_deref().unwrap_or(""),
                    rate.rate.as_deref().unwrap_or(""),
                    shipment.rates.len()
                );
            }
        }

        ShipmentCommand::List { page, purchased } => {
            let params = ShipmentListParams {
                page_size: Some(page.page_size),
                start_datetime: page.start,
                end_datetime: page.end,
                purchased,
                ..Default::default()
            };
            let rows = shipments.collect_pages(params, page.pages).await?;

            if json {
                return print_json(&rows);
            }
            println!("\n{:<36} {:<12} {:<26} {:<20}", "ID", "STATUS", "TRACKING CODE", "REFERENCE");
            println!("{}", "-".repeat(96));
            for shipment in rows {
                println!(
                    "{:<36} {:<12} {:<26} {:<20}",
                    shipment.id,
                    shipment.status.unwrap_or_default(),
                    shipment.tracking_code.unwrap_or_default(),
                    shipment.reference.unwrap_or_default()
                );
            }
        }

        ShipmentCommand::Label { id, format } => {
            let shipment = shipments.label(&id, format).await?;
            if json {
                return print_json(&shipment.postage_label);
            }
            let label = shipment
                .postage_label
                .with_context(|| format!("Shipment {} has no postage label", shipment.id))?;
            let url = match format {
                LabelFormat::Pdf => label.label_pdf_url,
                LabelFormat::Zpl => label.label_zpl_url,
                LabelFormat::Epl2 => label.label_epl2_url,
                LabelFormat::Png => label.label_url,
            };
            println!("{}", url.unwrap_or_default());
        }

        ShipmentCommand::Refund { id, yes } => {
            if !yes {
                println!("⚠️  Are you sure you want to refund the label on shipment {id}?");
                println!("   Use --yes to skip this prompt.");
                return Ok(());
            }

            info!(shipment_id = %id, "Requesting refund");
            let shipment = shipments.refund(&id).await?;
            println!(
                "\n✅ Refund status for {}: {}",
                shipment.id,
                shipment.refund_status.unwrap_or_default()
            );
        }
    }

    Ok(())
}

async fn run_batch(client: &EasyPostClient, command: BatchCommand, json: bool) -> Result<()> {
    let batches = client.batches();

    match command {
        BatchCommand::Get { id } => {
            let batch = batches.retrieve(&id).await?;
            if json {
                return print_json(&batch);
            }
            println!("\n🗂️  Batch {}", batch.id);
            println!(
                "   State:     {}",
                batch.state.map(|s| s.to_string()).unwrap_or_default()
            );
            println!("   Shipments: {}", batch.num_shipments.unwrap_or_default());
            if let Some(url) = &batch.label_url {
                println!("   Label:     {url}");
            }
            for shipment in &batch.shipments {
                println!(
                    "   - {} {}",
                    shipment.id,
                    shipment.batch_status.as_deref().unwrap_or("")
                );
            }
        }

        BatchCommand::List { page } => {
            let params = BatchListParams {
                page_size: Some(page.page_size),
                start_datetime: page.start,
                end_datetime: page.end,
                ..Default::default()
            };
            let rows = batches.collect_pages(params, page.pages).await?;
            if json {
                return print_json(&rows);
            }
            for batch in rows {
                println!(
                    "{:<36} {:<18} {}",
                    batch.id,
                    batch.state.map(|s| s.to_string()).unwrap_or_default(),
                    batch.num_shipments.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

async fn run_event(client: &EasyPostClient, command: EventCommand, json: bool) -> Result<()> {
    let events = client.events();

    match command {
        EventCommand::Get { id } => {
            let event = events.retrieve(&id).await?;
            if json {
                return print_json(&event);
            }
            println!("\n🔔 Event {}", event.id);
            println!("   What:   {}", event.description.as_deref().unwrap_or("-"));
            println!("   Status: {}", event.status.as_deref().unwrap_or("-"));
        }

        EventCommand::List { page } => {
            let params = EventListParams {
                page_size: Some(page.page_size),
                start_datetime: page.start,
                end_datetime: page.end,
                ..Default::default()
            };
            let rows = events.collect_pages(params, page.pages).await?;
            if json {
                return print_json(&rows);
            }
            for event in rows {
                println!(
                    "{:<36} {:<28} {}",
                    event.id,
                    event.description.unwrap_or_default(),
                    event.status.unwrap_or_default()
                );
            }
        }

        EventCommand::Payloads { id } => {
            let payloads = events.retrieve_all_payloads(&id).await?;
            if json {
                return print_json(&payloads);
            }
            for payload in payloads {
                println!(
                    "{:<36} {:<5} {}",
                    payload.id,
                    payload.response_code.unwrap_or_default(),
                    payload.request_url.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
