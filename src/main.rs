use anyhow::{Context, Result};
use chrono_tz::Europe::Stockholm;
use clap::Parser;
use cli::{Cli, is_within_days_ahead};
use config::{Config, log_dir_from_env};
use dotenvy::dotenv;
use model::timetable_record::TimetableRecord;
use render::{render_json, render_text};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use trip_fetcher::TripFetcher;

mod cli;
mod config;
mod model;
mod render;
mod trip_fetcher;
mod utils;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    _ = dotenv();
    let cli = Cli::parse();

    let _guard = init_tracing(&log_dir_from_env());

    let config = Config::from_env()
        .inspect_err(|e| error!("Error loading configuration: {e}"))
        .context("Error loading configuration")?;
    info!("logging to {}", config.log_dir);

    let today = chrono::Local::now().with_timezone(&Stockholm).date_naive();
    let date = cli.date.unwrap_or(today);
    if !is_within_days_ahead(date, today) {
        warn!("{date} is outside of the usual timetable range starting {today}");
    }

    let (origin_id, dest_id) = cli.direction.stops(&config);
    let fetcher = TripFetcher::new(config.fetcher.clone());

    info!(
        "fetching line {} {} on {} {}",
        fetcher.target_line(),
        cli.direction.label(),
        date,
        cli.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "for the whole day".to_string())
    );

    let result = fetcher.fetch_trips(origin_id, dest_id, date, cli.time).await;

    match &result {
        Ok(trips) => info!("showing {} trips", trips.len()),
        Err(e) if e.is_informational() => info!("{e}"),
        Err(e) => error!("{e}"),
    }

    let records = TimetableRecord::from_result(result);

    let output = if cli.json {
        render_json(&records).context("Error serializing timetable")?
    } else {
        let heading = format!(
            "Tidtabell för linje {}, {} {}",
            fetcher.target_line(),
            cli.direction.label(),
            date
        );
        render_text(&records, &heading)
    };

    println!("{output}");

    Ok(())
}

/// Logs to a daily rolling file and warnings to stderr.
/// The returned guard has to be held until exit so buffered lines get written.
fn init_tracing(log_dir: &str) -> WorkerGuard {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily(log_dir, "ferry_timetable.log");
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(LevelFilter::WARN);

    Registry::default()
        .with(file_log)
        .with(stderr_log)
        .with(env_filter)
        .init();

    guard
}
