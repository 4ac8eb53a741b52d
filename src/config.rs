//! Engine settings.
//!
//! Settings come from an optional JSON file and can be overridden from the
//! environment:
//!
//! ```json
//! {
//!   "timezone": "America/New_York",
//!   "closing_soon_minutes": 60,
//!   "recent_review_limit": 5,
//!   "popular_tag_limit": 5
//! }
//! ```
//!
//! Every vendor in the catalog is evaluated in the one configured timezone.

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hours::DEFAULT_CLOSING_SOON_MINUTES;
use crate::ratings::{POPULAR_TAG_LIMIT, RECENT_REVIEW_LIMIT};

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

pub const ENV_TIMEZONE: &str = "VENDOR_RATER_TZ";
pub const ENV_CLOSING_SOON_MINUTES: &str = "VENDOR_RATER_CLOSING_SOON_MINUTES";
pub const ENV_RECENT_LIMIT: &str = "VENDOR_RATER_RECENT_LIMIT";
pub const ENV_TAG_LIMIT: &str = "VENDOR_RATER_TAG_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA name of the catalog timezone.
    pub timezone: String,
    pub closing_soon_minutes: u32,
    pub recent_review_limit: usize,
    pub popular_tag_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            closing_soon_minutes: DEFAULT_CLOSING_SOON_MINUTES,
            recent_review_limit: RECENT_REVIEW_LIMIT,
            popular_tag_limit: POPULAR_TAG_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Loads the config from a JSON file at `path`. Missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{path}'"))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file '{path}'"))?;
        config.tz()?;
        debug!(path, ?config, "Loaded engine config");
        Ok(config)
    }

    /// File config (or defaults) with environment overrides applied.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.apply_env()
    }

    /// Applies `VENDOR_RATER_*` environment variables.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tz) = lookup(ENV_TIMEZONE) {
            self.timezone = tz;
        }
        if let Some(v) = lookup(ENV_CLOSING_SOON_MINUTES) {
            self.closing_soon_minutes = parse_number(ENV_CLOSING_SOON_MINUTES, &v)?;
        }
        if let Some(v) = lookup(ENV_RECENT_LIMIT) {
            self.recent_review_limit = parse_number(ENV_RECENT_LIMIT, &v)?;
        }
        if let Some(v) = lookup(ENV_TAG_LIMIT) {
            self.popular_tag_limit = parse_number(ENV_TAG_LIMIT, &v)?;
        }
        self.tz()?;
        Ok(self)
    }

    /// The configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// Parses an IANA timezone name such as `Europe/London`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone '{name}': {e}"))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a non-negative integer, got '{value}'"))
}
