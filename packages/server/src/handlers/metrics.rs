use axum::{Json, extract::State};
use chrono::{FixedOffset, NaiveDate};
use tracing::{debug, instrument};

use crate::analytics::{
    ComparisonMode, MetricsSummary, daily_metrics, local_offset, parse_metric_fields,
    prune_buckets, resolve_range, summarize, today,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::metrics::*;
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::review_store;

/// Resolve the requested date range against the configured offset.
fn requested_range(
    state: &AppState,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(FixedOffset, NaiveDate, NaiveDate), AppError> {
    let analytics = &state.config.analytics;
    let offset = local_offset(analytics.utc_offset_minutes);
    let (start_date, end_date) =
        resolve_range(start, end, today(&offset), &offset, analytics.max_range_days)?;
    Ok((offset, start_date, end_date))
}

/// Daily review metrics.
#[utoipa::path(
    get,
    path = "/metrics/timeseries",
    tag = "Metrics",
    operation_id = "getTimeseries",
    summary = "Daily review metrics",
    description = "One bucket per calendar day in `[startDate, endDate]`, including days with no reviews. \
                   `metrics` narrows each bucket to the listed fields; `date` is always kept.",
    params(TimeseriesQuery),
    responses(
        (status = 200, description = "Daily buckets", body = TimeseriesResponse),
        (status = 400, description = "Invalid or oversized date range (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_timeseries(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TimeseriesQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let (offset, start_date, end_date) = requested_range(
        &state,
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let reviews = review_store(&state.db).all().await?;
    let buckets = daily_metrics(&reviews, start_date, end_date, &offset);
    let fields = parse_metric_fields(params.metrics.as_deref());
    debug!(reviews = reviews.len(), buckets = buckets.len(), "timeseries computed");

    let meta = TimeseriesMeta {
        start_date,
        end_date,
        days: buckets.len() as u64,
        metrics: fields.clone(),
    };
    let meta = serde_json::to_value(meta)
        .map_err(|e| AppError::Internal(format!("Failed to serialize meta: {e}")))?;

    Ok(Json(ApiResponse::with_meta(
        prune_buckets(&buckets, fields.as_deref()),
        meta,
    )))
}

/// Period summary with comparison.
#[utoipa::path(
    get,
    path = "/metrics/summary",
    tag = "Metrics",
    operation_id = "getMetricsSummary",
    summary = "Period summary",
    description = "Statistics for `[startDate, endDate]` compared against the previous period of equal \
                   length (`previous_period`), the same dates a year earlier (`last_year`), or nothing (`none`).",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Summary", body = ApiResponse<MetricsSummary>),
        (status = 400, description = "Invalid date range or comparison (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SummaryQuery>,
) -> Result<Json<ApiResponse<MetricsSummary>>, AppError> {
    let mode = ComparisonMode::parse(params.comparison.as_deref()).map_err(AppError::Validation)?;
    let (offset, start_date, end_date) = requested_range(
        &state,
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let reviews = review_store(&state.db).all().await?;
    let summary = summarize(&reviews, start_date, end_date, mode, &offset)?;

    Ok(Json(ApiResponse::ok(summary)))
}
