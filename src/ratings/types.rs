//! Review records and the summaries computed from them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ratings::utility::round_ratio;

/// Which rating payload a review carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewKind {
    Vendor,
    MenuItem,
}

/// Scores for a vendor as a whole. Each score is 1–5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRating {
    pub food_quality: u8,
    pub service: u8,
    pub value: u8,
    #[serde(default)]
    pub atmosphere: Option<u8>,
    pub recommend: bool,
}

/// Scores for a single dish. Each score is 1–5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRating {
    pub taste: u8,
    pub presentation: u8,
    pub portion_size: u8,
    pub recommend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewImage {
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A single review submission.
///
/// `kind` says which payload is meaningful. A review whose matching payload
/// is missing is skipped by the aggregators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "ratingType", alias = "kind")]
    pub kind: ReviewKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_rating: Option<VendorRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_rating: Option<MenuItemRating>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<ReviewImage>,
}

impl Review {
    /// The vendor scores, if this is a vendor review that carries them.
    pub fn vendor_payload(&self) -> Option<&VendorRating> {
        match self.kind {
            ReviewKind::Vendor => self.vendor_rating.as_ref(),
            ReviewKind::MenuItem => None,
        }
    }

    /// The dish scores, if this is a menu-item review that carries them.
    pub fn menu_item_payload(&self) -> Option<&MenuItemRating> {
        match self.kind {
            ReviewKind::MenuItem => self.menu_item_rating.as_ref(),
            ReviewKind::Vendor => None,
        }
    }

    /// Headline score for a review card: the mean of the three required
    /// categories, to one decimal place.
    pub fn average_score(&self) -> Option<f64> {
        let sum = if let Some(v) = self.vendor_payload() {
            v.food_quality as u64 + v.service as u64 + v.value as u64
        } else if let Some(m) = self.menu_item_payload() {
            m.taste as u64 + m.presentation as u64 + m.portion_size as u64
        } else {
            return None;
        };
        Some(round_ratio(sum, 3, 1))
    }
}

/// How often a tag appears across reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Rating summary for a vendor.
///
/// Averages are rounded to one decimal and the recommendation share to a
/// whole percent. With no reviews every number is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRatings<'a> {
    pub food_quality: f64,
    pub service: f64,
    pub value: f64,
    pub atmosphere: f64,
    pub recommendation_percentage: u32,
    pub total_reviews: usize,
    pub recent_reviews: Vec<&'a Review>,
    pub popular_tags: Vec<TagCount>,
}

/// Rating summary for a menu item, built the same way as [`AggregatedRatings`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemAggregatedRatings<'a> {
    pub taste: f64,
    pub presentation: f64,
    pub portion_size: f64,
    pub recommendation_percentage: u32,
    pub total_reviews: usize,
    pub recent_reviews: Vec<&'a Review>,
    pub popular_tags: Vec<TagCount>,
}
