use chrono::{FixedOffset, NaiveDate};
use common::{ReviewStatus, Sentiment};
use serde::Serialize;

use super::round2;
use super::window::{DateWindow, RangeError, last_year};
use crate::entity::review;

/// Which earlier window the current period is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// The window of equal length immediately before the current one.
    #[default]
    PreviousPeriod,
    /// The same calendar dates one year earlier.
    LastYear,
    None,
}

impl ComparisonMode {
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None | Some("") | Some("previous_period") => Ok(Self::PreviousPeriod),
            Some("last_year") => Ok(Self::LastYear),
            Some("none") => Ok(Self::None),
            Some(other) => Err(format!(
                "Invalid comparison '{other}'. Valid values: previous_period, last_year, none"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct SentimentBreakdown {
    /// Rating >= 4.
    pub positive: u64,
    /// Rating == 3.
    pub neutral: u64,
    /// Rating <= 2.
    pub negative: u64,
}

/// Statistics for the reviews created inside one window.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    pub total_reviews: u64,
    pub average_rating: f64,
    pub approved_count: u64,
    pub pending_count: u64,
    pub rejected_count: u64,
    pub five_star_count: u64,
    /// Reviews rated 2 stars or less.
    pub low_rating_count: u64,
    /// Percentage of reviews rated 4 or more, rounded to 2 decimals.
    pub satisfaction_score: f64,
    pub sentiment: SentimentBreakdown,
}

/// Percentage change of each tracked metric against the comparison window.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    pub total_reviews: f64,
    pub average_rating: f64,
    pub approved_count: f64,
    pub pending_count: f64,
    pub five_star_count: f64,
    pub low_rating_count: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub comparison_mode: ComparisonMode,
    pub current_period: PeriodRange,
    pub current: PeriodMetrics,
    /// Absent when `comparison_mode` is `none`.
    pub comparison_period: Option<PeriodRange>,
    pub previous: Option<PeriodMetrics>,
    pub changes: Option<MetricChanges>,
}

/// `(curr - prev) / prev * 100`, rounded to 2 decimals. A zero baseline yields 100
/// when anything appeared and 0 otherwise.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    round2((current - previous) / previous * 100.0)
}

/// Compute metrics over the reviews whose creation instant falls inside `window`.
pub fn period_metrics(reviews: &[review::Model], window: &DateWindow) -> PeriodMetrics {
    let mut total = 0u64;
    let mut rating_sum = 0i64;
    let mut approved = 0u64;
    let mut pending = 0u64;
    let mut rejected = 0u64;
    let mut five_star = 0u64;
    let mut sentiment = SentimentBreakdown::default();

    for review in reviews.iter().filter(|r| window.contains(&r.created_at)) {
        total += 1;
        rating_sum += i64::from(review.rating);
        match review.status {
            ReviewStatus::Approved => approved += 1,
            ReviewStatus::Pending => pending += 1,
            ReviewStatus::Rejected => rejected += 1,
        }
        if review.rating == 5 {
            five_star += 1;
        }
        match Sentiment::from_rating(review.rating) {
            Sentiment::Positive => sentiment.positive += 1,
            Sentiment::Neutral => sentiment.neutral += 1,
            Sentiment::Negative => sentiment.negative += 1,
        }
    }

    let (average_rating, satisfaction_score) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            round2(rating_sum as f64 / total as f64),
            round2(sentiment.positive as f64 / total as f64 * 100.0),
        )
    };

    PeriodMetrics {
        total_reviews: total,
        average_rating,
        approved_count: approved,
        pending_count: pending,
        rejected_count: rejected,
        five_star_count: five_star,
        low_rating_count: sentiment.negative,
        satisfaction_score,
        sentiment,
    }
}

pub fn metric_changes(current: &PeriodMetrics, previous: &PeriodMetrics) -> MetricChanges {
    let change = |c: u64, p: u64| percent_change(c as f64, p as f64);
    MetricChanges {
        total_reviews: change(current.total_reviews, previous.total_reviews),
        average_rating: percent_change(current.average_rating, previous.average_rating),
        approved_count: change(current.approved_count, previous.approved_count),
        pending_count: change(current.pending_count, previous.pending_count),
        five_star_count: change(current.five_star_count, previous.five_star_count),
        low_rating_count: change(current.low_rating_count, previous.low_rating_count),
    }
}

/// Period summary for `[start_date, end_date]` plus the requested comparison.
pub fn summarize(
    reviews: &[review::Model],
    start_date: NaiveDate,
    end_date: NaiveDate,
    mode: ComparisonMode,
    offset: &FixedOffset,
) -> Result<MetricsSummary, RangeError> {
    let window = DateWindow::from_dates(start_date, end_date, offset);
    let current = period_metrics(reviews, &window);

    let comparison_window = match mode {
        ComparisonMode::PreviousPeriod => Some(window.previous()),
        ComparisonMode::LastYear => Some(last_year(start_date, end_date, offset)?),
        ComparisonMode::None => None,
    };

    let previous = comparison_window
        .as_ref()
        .map(|w| period_metrics(reviews, w));
    let changes = previous.as_ref().map(|p| metric_changes(&current, p));

    Ok(MetricsSummary {
        comparison_mode: mode,
        current_period: PeriodRange {
            start_date,
            end_date,
        },
        current,
        comparison_period: comparison_window.map(|w| PeriodRange {
            start_date: w.start_date(offset),
            end_date: w.end_date(offset),
        }),
        previous,
        changes,
    })
}
