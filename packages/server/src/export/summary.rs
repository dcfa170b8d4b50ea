use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::ReviewStatus;
use serde::Serialize;

use crate::analytics::round2;
use crate::entity::review;

/// Aggregate figures for an export selection.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_reviews: u64,
    pub average_rating: f64,
    /// Count per status; all statuses are present.
    pub by_status: BTreeMap<String, u64>,
    /// Count per star rating, keyed `"1"` to `"5"`.
    pub rating_distribution: BTreeMap<String, u64>,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

pub fn export_summary(reviews: &[review::Model]) -> ExportSummary {
    let mut by_status: BTreeMap<String, u64> = ReviewStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let mut rating_distribution: BTreeMap<String, u64> =
        (1..=5).map(|r: i32| (r.to_string(), 0)).collect();
    let mut rating_sum = 0i64;

    for r in reviews {
        *by_status.entry(r.status.as_str().to_string()).or_insert(0) += 1;
        *rating_distribution.entry(r.rating.to_string()).or_insert(0) += 1;
        rating_sum += i64::from(r.rating);
    }

    let total = reviews.len() as u64;
    ExportSummary {
        total_reviews: total,
        average_rating: if total == 0 {
            0.0
        } else {
            round2(rating_sum as f64 / total as f64)
        },
        by_status,
        rating_distribution,
        earliest: reviews.iter().map(|r| r.created_at).min(),
        latest: reviews.iter().map(|r| r.created_at).max(),
    }
}
