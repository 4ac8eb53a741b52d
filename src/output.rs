//! Output formatting and export for computed summaries.
//!
//! Supports pretty-printing, JSON logging, CSV append of flat summary rows
//! and the display format for review dates.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::ratings::{AggregatedRatings, MenuItemAggregatedRatings, ReviewKind};

/// One line of a rating-summary CSV export.
///
/// Vendor and menu-item summaries share the same columns; categories that do
/// not apply to the row's kind are left empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummaryRow {
    pub generated_at: DateTime<Utc>,
    pub subject: String,
    pub kind: ReviewKind,
    pub total_reviews: usize,
    pub recommendation_percentage: u32,
    pub food_quality: Option<f64>,
    pub service: Option<f64>,
    pub value: Option<f64>,
    pub atmosphere: Option<f64>,
    pub taste: Option<f64>,
    pub presentation: Option<f64>,
    pub portion_size: Option<f64>,
}

impl RatingSummaryRow {
    pub fn from_vendor(subject: &str, agg: &AggregatedRatings<'_>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            subject: subject.to_string(),
            kind: ReviewKind::Vendor,
            total_reviews: agg.total_reviews,
            recommendation_percentage: agg.recommendation_percentage,
            food_quality: Some(agg.food_quality),
            service: Some(agg.service),
            value: Some(agg.value),
            atmosphere: Some(agg.atmosphere),
            taste: None,
            presentation: None,
            portion_size: None,
        }
    }

    pub fn from_menu_item(
        subject: &str,
        agg: &MenuItemAggregatedRatings<'_>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            subject: subject.to_string(),
            kind: ReviewKind::MenuItem,
            total_reviews: agg.total_reviews,
            recommendation_percentage: agg.recommendation_percentage,
            food_quality: None,
            service: None,
            value: None,
            atmosphere: None,
            taste: Some(agg.taste),
            presentation: Some(agg.presentation),
            portion_size: Some(agg.portion_size),
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends a [`RatingSummaryRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &RatingSummaryRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

/// Formats a review timestamp for display, e.g. `Mar 5, 2024`.
pub fn format_review_date<Tz>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at.with_timezone(tz).format("%b %-d, %Y").to_string()
}
