//! CLI entry point for the vendor rater.
//!
//! Provides subcommands for normalizing free-form times, evaluating a
//! vendor's opening status and aggregating its reviews.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vendor_rater::{
    config::{EngineConfig, parse_timezone},
    hours::{HoursEvaluator, clock::local_time},
    input::{load_hours, load_reviews},
    output::{RatingSummaryRow, append_record, format_review_date, print_json, print_pretty},
    ratings::{aggregate_menu_item_ratings_with, aggregate_vendor_ratings_with},
    time::parse_time,
};

#[derive(Parser)]
#[command(name = "vendor_rater")]
#[command(about = "Opening-hours and review summaries for vendor listings", long_about = None)]
struct Cli {
    /// JSON config file (timezone, thresholds, list limits)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize free-form times to 24-hour HH:MM
    Normalize {
        #[arg(value_name = "TIME", required = true)]
        times: Vec<String>,
    },
    /// Report whether a vendor is open, closing soon or closed
    Status {
        /// Vendor document or weekly hours JSON file
        #[arg(value_name = "HOURS_JSON")]
        hours: String,

        /// Instant to evaluate (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// IANA timezone; overrides the configured catalog timezone
        #[arg(long)]
        tz: Option<String>,

        /// Minutes before closing that count as "closing soon"
        #[arg(long)]
        threshold: Option<u32>,
    },
    /// Aggregate review submissions into a rating summary
    Aggregate {
        /// Reviews JSON file
        #[arg(value_name = "REVIEWS_JSON")]
        reviews: String,

        /// Which reviews to aggregate
        #[arg(short, long, value_enum, default_value_t = Kind::Vendor)]
        kind: Kind,

        /// CSV file to append a summary row to
        #[arg(long)]
        csv: Option<String>,

        /// Name recorded in the CSV row; defaults to the reviews file stem
        #[arg(long)]
        subject: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Vendor,
    MenuItem,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vendor_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vendor_rater.log"));

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
    let config = EngineConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { times } => normalize(&times),
        Commands::Status {
            hours,
            at,
            tz,
            threshold,
        } => status(&config, &hours, at.as_deref(), tz.as_deref(), threshold)?,
        Commands::Aggregate {
            reviews,
            kind,
            csv,
            subject,
        } => aggregate(&config, &reviews, kind, csv.as_deref(), subject.as_deref())?,
    }

    Ok(())
}

#[tracing::instrument]
fn normalize(times: &[String]) {
    for raw in times {
        match parse_time(raw) {
            Ok(t) => info!(input = %raw, normalized = %t, "Normalized"),
            Err(e) => warn!(input = %raw, error = %e, "Could not normalize"),
        }
    }
}

#[tracing::instrument(skip(config))]
fn status(
    config: &EngineConfig,
    hours_path: &str,
    at: Option<&str>,
    tz: Option<&str>,
    threshold: Option<u32>,
) -> Result<()> {
    let tz = match tz {
        Some(name) => parse_timezone(name)?,
        None => config.tz()?,
    };
    let instant = match at {
        Some(at) => DateTime::parse_from_rfc3339(at)
            .with_context(|| format!("--at must be an RFC 3339 timestamp, got '{at}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let hours = load_hours(hours_path)?;
    let evaluator = HoursEvaluator::new(threshold.unwrap_or(config.closing_soon_minutes))
        .with_reporter(|day, raw, err| {
            warn!(day = %day, input = raw, error = %err, "Unparseable stored time, treating as closed");
        });

    let now = local_time(&instant, &tz);
    let status = evaluator.status(&hours, &now);

    for (day, window) in hours.normalized().days() {
        info!(
            day = %day,
            start = window.start.as_deref().unwrap_or("-"),
            end = window.end.as_deref().unwrap_or("-"),
            "Hours"
        );
    }

    info!(
        status = %status,
        label = status.label(),
        local_time = %now.format("%A %H:%M"),
        timezone = %tz,
        threshold_minutes = evaluator.threshold_minutes(),
        "Vendor status"
    );
    Ok(())
}

#[tracing::instrument(skip(config, kind))]
fn aggregate(
    config: &EngineConfig,
    reviews_path: &str,
    kind: Kind,
    csv: Option<&str>,
    subject: Option<&str>,
) -> Result<()> {
    let reviews = load_reviews(reviews_path)?;
    let tz = config.tz()?;
    let subject = subject.map(str::to_string).unwrap_or_else(|| {
        Path::new(reviews_path)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("reviews")
            .to_string()
    });
    let generated_at = Utc::now();

    let row = match kind {
        Kind::Vendor => {
            let agg = aggregate_vendor_ratings_with(&reviews, config);
            print_pretty(&agg);
            print_json(&agg)?;
            for review in &agg.recent_reviews {
                info!(
                    date = %format_review_date(&review.created_at, &tz),
                    score = review.average_score().unwrap_or_default(),
                    comment = review.comment.as_deref().unwrap_or(""),
                    "Recent review"
                );
            }
            RatingSummaryRow::from_vendor(&subject, &agg, generated_at)
        }
        Kind::MenuItem => {
            let agg = aggregate_menu_item_ratings_with(&reviews, config);
            print_pretty(&agg);
            print_json(&agg)?;
            RatingSummaryRow::from_menu_item(&subject, &agg, generated_at)
        }
    };

    info!(
        considered = row.total_reviews,
        ignored = reviews.len() - row.total_reviews,
        "Aggregation complete"
    );

    if let Some(path) = csv {
        append_record(path, &row)?;
        info!(path, "Summary row appended");
    }

    Ok(())
}
