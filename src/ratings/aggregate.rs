use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::ratings::types::{
    AggregatedRatings, MenuItemAggregatedRatings, MenuItemRating, Review, TagCount, VendorRating,
};
use crate::ratings::utility::{mean_tenths, pct};

/// How many reviews the summary keeps for the "recent reviews" list.
pub const RECENT_REVIEW_LIMIT: usize = 5;

/// How many tags the summary keeps for the "popular tags" list.
pub const POPULAR_TAG_LIMIT: usize = 5;

/// Aggregates vendor reviews using the default list limits.
///
/// Only reviews of kind `vendor` that carry vendor scores are considered.
/// Every category, `atmosphere` included, is divided by the number of
/// considered reviews; a missing atmosphere score counts as zero.
pub fn aggregate_vendor_ratings(reviews: &[Review]) -> AggregatedRatings<'_> {
    aggregate_vendor(reviews, RECENT_REVIEW_LIMIT, POPULAR_TAG_LIMIT)
}

/// Same as [`aggregate_vendor_ratings`] with list limits taken from `config`.
pub fn aggregate_vendor_ratings_with<'a>(
    reviews: &'a [Review],
    config: &EngineConfig,
) -> AggregatedRatings<'a> {
    aggregate_vendor(reviews, config.recent_review_limit, config.popular_tag_limit)
}

/// Aggregates menu-item reviews using the default list limits.
pub fn aggregate_menu_item_ratings(reviews: &[Review]) -> MenuItemAggregatedRatings<'_> {
    aggregate_menu_item(reviews, RECENT_REVIEW_LIMIT, POPULAR_TAG_LIMIT)
}

/// Same as [`aggregate_menu_item_ratings`] with list limits taken from `config`.
pub fn aggregate_menu_item_ratings_with<'a>(
    reviews: &'a [Review],
    config: &EngineConfig,
) -> MenuItemAggregatedRatings<'a> {
    aggregate_menu_item(reviews, config.recent_review_limit, config.popular_tag_limit)
}

/// Counts tags across `reviews`, most frequent first, ties alphabetical.
pub fn popular_tags<'a>(reviews: impl IntoIterator<Item = &'a Review>, limit: usize) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for review in reviews {
        for tag in &review.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags.truncate(limit);
    tags
}

fn aggregate_vendor(reviews: &[Review], recent_limit: usize, tag_limit: usize) -> AggregatedRatings<'_> {
    let considered: Vec<(&Review, &VendorRating)> = reviews
        .iter()
        .filter_map(|r| r.vendor_payload().map(|p| (r, p)))
        .collect();
    let total = considered.len();

    let mut food_quality = 0u64;
    let mut service = 0u64;
    let mut value = 0u64;
    let mut atmosphere = 0u64;
    let mut recommendations = 0usize;

    for (_, rating) in &considered {
        food_quality += rating.food_quality as u64;
        service += rating.service as u64;
        value += rating.value as u64;
        atmosphere += rating.atmosphere.unwrap_or(0) as u64;
        if rating.recommend {
            recommendations += 1;
        }
    }

    let reviews: Vec<&Review> = considered.into_iter().map(|(r, _)| r).collect();

    AggregatedRatings {
        food_quality: mean_tenths(food_quality, total),
        service: mean_tenths(service, total),
        value: mean_tenths(value, total),
        atmosphere: mean_tenths(atmosphere, total),
        recommendation_percentage: pct(recommendations, total),
        total_reviews: total,
        popular_tags: popular_tags(reviews.iter().copied(), tag_limit),
        recent_reviews: most_recent(reviews, recent_limit),
    }
}

fn aggregate_menu_item(
    reviews: &[Review],
    recent_limit: usize,
    tag_limit: usize,
) -> MenuItemAggregatedRatings<'_> {
    let considered: Vec<(&Review, &MenuItemRating)> = reviews
        .iter()
        .filter_map(|r| r.menu_item_payload().map(|p| (r, p)))
        .collect();
    let total = considered.len();

    let mut taste = 0u64;
    let mut presentation = 0u64;
    let mut portion_size = 0u64;
    let mut recommendations = 0usize;

    for (_, rating) in &considered {
        taste += rating.taste as u64;
        presentation += rating.presentation as u64;
        portion_size += rating.portion_size as u64;
        if rating.recommend {
            recommendations += 1;
        }
    }

    let reviews: Vec<&Review> = considered.into_iter().map(|(r, _)| r).collect();

    MenuItemAggregatedRatings {
        taste: mean_tenths(taste, total),
        presentation: mean_tenths(presentation, total),
        portion_size: mean_tenths(portion_size, total),
        recommendation_percentage: pct(recommendations, total),
        total_reviews: total,
        popular_tags: popular_tags(reviews.iter().copied(), tag_limit),
        recent_reviews: most_recent(reviews, recent_limit),
    }
}

/// Newest first, keeping input order between reviews created at the same instant.
fn most_recent(mut reviews: Vec<&Review>, limit: usize) -> Vec<&Review> {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews.truncate(limit);
    reviews
}
