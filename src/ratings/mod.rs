//! Review aggregation.
//!
//! Turns a vendor's raw review submissions into the numbers shown on its
//! summary card: per-category averages, the share of reviewers who would
//! recommend it, the newest reviews and the most common tags.

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::{
    POPULAR_TAG_LIMIT, RECENT_REVIEW_LIMIT, aggregate_menu_item_ratings,
    aggregate_menu_item_ratings_with, aggregate_vendor_ratings, aggregate_vendor_ratings_with,
    popular_tags,
};
pub use types::{
    AggregatedRatings, MenuItemAggregatedRatings, MenuItemRating, Review, ReviewImage, ReviewKind,
    TagCount, VendorRating,
};
