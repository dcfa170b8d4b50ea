use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use common::ReviewStatus;
use serde::Serialize;

use super::round2;
use super::window::local_date;
use crate::entity::review;

/// Aggregated counts for the reviews created on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    #[schema(example = "2023-01-01")]
    pub date: NaiveDate,
    pub reviews_submitted: u64,
    pub reviews_approved: u64,
    pub reviews_pending: u64,
    pub reviews_rejected: u64,
    /// Mean rating rounded to 2 decimals, 0 when no reviews fell on the day.
    #[schema(example = 4.0)]
    pub average_rating: f64,
    pub five_star_count: u64,
    /// Reviews that received a moderation decision (approved or rejected).
    pub interactions: u64,
    /// Reviews rated 2 stars or less.
    pub escalations: u64,
}

/// Field names accepted by the `metrics` pruning parameter.
pub const BUCKET_FIELDS: &[&str] = &[
    "reviewsSubmitted",
    "reviewsApproved",
    "reviewsPending",
    "reviewsRejected",
    "averageRating",
    "fiveStarCount",
    "interactions",
    "escalations",
];

#[derive(Default)]
struct DayAccumulator {
    submitted: u64,
    approved: u64,
    pending: u64,
    rejected: u64,
    rating_sum: i64,
    five_star: u64,
    escalations: u64,
}

impl DayAccumulator {
    fn add(&mut self, review: &review::Model) {
        self.submitted += 1;
        match review.status {
            ReviewStatus::Approved => self.approved += 1,
            ReviewStatus::Pending => self.pending += 1,
            ReviewStatus::Rejected => self.rejected += 1,
        }
        self.rating_sum += i64::from(review.rating);
        if review.rating == 5 {
            self.five_star += 1;
        }
        if review.rating <= 2 {
            self.escalations += 1;
        }
    }

    fn into_bucket(self, date: NaiveDate) -> DailyBucket {
        let average_rating = if self.submitted == 0 {
            0.0
        } else {
            round2(self.rating_sum as f64 / self.submitted as f64)
        };

        DailyBucket {
            date,
            reviews_submitted: self.submitted,
            reviews_approved: self.approved,
            reviews_pending: self.pending,
            reviews_rejected: self.rejected,
            average_rating,
            five_star_count: self.five_star,
            interactions: self.approved + self.rejected,
            escalations: self.escalations,
        }
    }
}

/// One bucket per calendar day in `[start, end]`, in date order, including days with
/// no reviews. Reviews are assigned to days by their creation instant in `offset`;
/// reviews outside the range are ignored. An inverted range yields no buckets.
pub fn daily_metrics(
    reviews: &[review::Model],
    start: NaiveDate,
    end: NaiveDate,
    offset: &FixedOffset,
) -> Vec<DailyBucket> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| (d, DayAccumulator::default()))
        .collect();

    for review in reviews {
        if let Some(day) = days.get_mut(&local_date(&review.created_at, offset)) {
            day.add(review);
        }
    }

    days.into_iter()
        .map(|(date, acc)| acc.into_bucket(date))
        .collect()
}

/// Serialize buckets, keeping only `date` plus the requested fields.
///
/// `fields == None` keeps everything. Unknown field names are ignored.
pub fn prune_buckets(buckets: &[DailyBucket], fields: Option<&[String]>) -> Vec<serde_json::Value> {
    buckets
        .iter()
        .map(|bucket| {
            let mut value = serde_json::to_value(bucket).unwrap_or_default();
            if let (Some(fields), Some(map)) = (fields, value.as_object_mut()) {
                map.retain(|key, _| key == "date" || fields.iter().any(|f| f == key));
            }
            value
        })
        .collect()
}

/// Split a comma-separated `metrics` parameter into known field names.
///
/// A blank parameter means "no pruning". Unknown names are dropped, so a parameter
/// naming only unknown fields keeps just `date`.
pub fn parse_metric_fields(raw: Option<&str>) -> Option<Vec<String>> {
    let names: Vec<&str> = raw?
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(
        names
            .into_iter()
            .filter(|name| BUCKET_FIELDS.contains(name))
            .map(str::to_string)
            .collect(),
    )
}
