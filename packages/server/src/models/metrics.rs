use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::DailyBucket;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TimeseriesQuery {
    /// `YYYY-MM-DD`. Defaults to 29 days before `endDate`.
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`. Defaults to today.
    #[param(example = "2024-01-30")]
    pub end_date: Option<String>,
    /// Comma-separated bucket fields to keep, e.g. `reviewsSubmitted,averageRating`.
    /// `date` is always returned.
    pub metrics: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    #[param(example = "2024-01-30")]
    pub end_date: Option<String>,
    /// `previous_period` (default), `last_year` or `none`.
    pub comparison: Option<String>,
}

/// Echo of the resolved time-series request.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesMeta {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of buckets returned.
    pub days: u64,
    /// Fields kept by `metrics`, absent when every field is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

/// Documentation shape of the time-series payload. Pruned buckets omit fields.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TimeseriesResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<DailyBucket>,
    pub meta: TimeseriesMeta,
}
