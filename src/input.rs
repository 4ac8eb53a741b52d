//! Loading content-store exports from disk.
//!
//! Files are JSON as exported by the content store. Hours may be a bare
//! weekly schedule or a whole vendor document with an `hours` field. Reviews
//! may be a bare array or a paginated listing with a `docs` array.

use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::hours::WeeklyHours;
use crate::ratings::Review;

/// Reads a weekly schedule from `path`.
pub fn load_hours(path: &str) -> Result<WeeklyHours> {
    let mut value = read_json(path)?;
    let hours = if value.get("hours").is_some() {
        value["hours"].take()
    } else {
        value
    };
    if hours.is_null() {
        return Ok(WeeklyHours::default());
    }
    serde_json::from_value(hours).with_context(|| format!("invalid hours in '{path}'"))
}

/// Reads review records from `path`.
pub fn load_reviews(path: &str) -> Result<Vec<Review>> {
    let value = read_json(path)?;
    let docs = match value {
        Value::Object(mut map) if map.contains_key("docs") => map.remove("docs").unwrap_or_default(),
        other => other,
    };
    let reviews: Vec<Review> =
        serde_json::from_value(docs).with_context(|| format!("invalid reviews in '{path}'"))?;
    debug!(path, count = reviews.len(), "Loaded reviews");
    Ok(reviews)
}

fn read_json(path: &str) -> Result<Value> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;
    serde_json::from_str(&content).with_context(|| format!("'{path}' is not valid JSON"))
}
