//! CLI entry point for the transit lookup tool.
//!
//! Provides subcommands for looking up a route's direction headsigns, a
//! single vehicle's live status, and the current service alert list.

mod infra;
mod services;

use crate::infra::mbta::client::MbtaClient;
use crate::services::transit_api::TransitApi;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transit_lookup::{
    config::Config,
    error::{GENERIC_MESSAGE, LookupError},
    output::{
        append_alert_records, print_pretty, render_alerts, render_route, render_vehicle, to_json,
    },
    views::{
        alerts::{AlertListSummary, ExpandedAlerts, build_alert_items},
        route::RouteSummary,
        vehicle::VehicleSummary,
    },
};

#[derive(Parser)]
#[command(name = "transit_lookup")]
#[command(
    about = "Look up routes, vehicles, and service alerts on a transit feed",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a route's name and the headsign for each direction
    Route {
        /// Route id (ex: 1, 66, SL4, Red, Orange, Green-B)
        #[arg(value_name = "ROUTE_ID")]
        id: String,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show a vehicle's status, occupancy, and position
    Vehicle {
        /// Vehicle id (ex: y1899)
        #[arg(value_name = "VEHICLE_ID")]
        id: String,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List service alerts, newest first
    Alerts {
        /// Only show alerts whose header or description contains this text
        #[arg(short, long, default_value = "")]
        query: String,

        /// Show the full description of this alert (repeatable)
        #[arg(short, long = "expand", value_name = "ALERT_ID")]
        expand: Vec<String>,

        /// Show the full description of every alert
        #[arg(long, default_value_t = false)]
        expand_all: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional: CSV file to append the listed alerts to
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transit_lookup.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transit_lookup.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = MbtaClient::new(&config)?;
    info!(
        base_url = %config.base_url,
        api_key = config.api_key.is_some(),
        "Transit API configured"
    );

    // Abandoning the query drops its future, so a late response is never rendered.
    let outcome = tokio::select! {
        result = run(&api, cli.command) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => Ok(ExitCode::SUCCESS),
        Some(Err(e)) => {
            let message = match e.downcast_ref::<LookupError>() {
                Some(lookup) => lookup.user_message(),
                None if e.to_string().trim().is_empty() => GENERIC_MESSAGE.to_string(),
                None => e.to_string(),
            };
            error!(error = %e, "Lookup failed");
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        None => {
            warn!("Query abandoned, discarding any pending response");
            Ok(ExitCode::from(130))
        }
    }
}

async fn run(api: &dyn TransitApi, command: Commands) -> Result<()> {
    match command {
        Commands::Route { id, json } => {
            let id = id.trim();
            if id.is_empty() {
                warn!("Empty route id, nothing to look up");
                return Ok(());
            }

            let summary = route_summary(api, id).await?;
            print_pretty(&summary);
            info!(
                route_id = %summary.id,
                directions = summary.directions.len(),
                "Route summarized"
            );

            if json {
                println!("{}", to_json(&summary)?);
            } else {
                print!("{}", render_route(&summary));
            }
        }
        Commands::Vehicle { id, json } => {
            let vehicle = api.get_vehicle(id.trim()).await?;
            let summary = VehicleSummary::from_resource(&vehicle);
            print_pretty(&summary);
            info!(
                vehicle_id = %summary.id,
                status = %summary.status,
                occupancy = %summary.occupancy,
                "Vehicle summarized"
            );

            if json {
                println!("{}", to_json(&summary)?);
            } else {
                print!("{}", render_vehicle(&summary));
            }
        }
        Commands::Alerts {
            query,
            expand,
            expand_all,
            json,
            csv,
        } => {
            let alerts = api.list_alerts().await?;

            let expanded: ExpandedAlerts = if expand_all {
                alerts.iter().map(|a| a.id.clone()).collect()
            } else {
                expand.into_iter().collect()
            };

            let items = build_alert_items(&alerts, &query, &expanded);
            let summary = AlertListSummary::new(items.len(), alerts.len(), &query);
            info!(
                shown = summary.shown,
                total = summary.total,
                searched = summary.searched,
                "Alert list built"
            );

            if let Some(path) = csv {
                append_alert_records(&path, &items)?;
                info!(path = %path, rows = items.len(), "Alerts appended to CSV");
            }

            if json {
                println!("{}", to_json(&items)?);
            } else {
                print!("{}", render_alerts(&items, &summary));
            }
        }
    }

    Ok(())
}

/// Fetches a route, then its patterns. Patterns are only requested once the
/// route is known to exist.
#[tracing::instrument(skip(api))]
async fn route_summary(api: &dyn TransitApi, id: &str) -> Result<RouteSummary, LookupError> {
    let route = api.get_route(id).await?;
    let patterns = api.list_route_patterns(id).await?;
    Ok(RouteSummary::new(&route, &patterns))
}
