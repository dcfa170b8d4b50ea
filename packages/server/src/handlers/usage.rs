use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::shared::{ApiResponse, SortOrder, page_bounds};
use crate::models::usage::UsageDetailsQuery;
use crate::state::AppState;
use crate::store::{ReviewFilter, review_store};
use crate::usage::{
    DetailFilter, DetailPage, DetailQuery, DetailSortField, SyntheticSource, UsageSummary,
    detail_page, to_detail_record, usage_summary,
};

/// Usage detail records.
#[utoipa::path(
    get,
    path = "/usage/details",
    tag = "Usage",
    operation_id = "listUsageDetails",
    summary = "List usage detail records",
    description = "Reviews enriched with classification and synthetic fields, filtered, sorted and paginated. \
                   `statistics` covers every filtered record, not just the returned page.",
    params(UsageDetailsQuery),
    responses(
        (status = 200, description = "Page of detail records", body = ApiResponse<DetailPage>),
        (status = 400, description = "Invalid filter or sort (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_details(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UsageDetailsQuery>,
) -> Result<Json<ApiResponse<DetailPage>>, AppError> {
    let sort_by = DetailSortField::parse(params.sort_by.as_deref())?;
    let order = SortOrder::parse(params.sort_order.as_deref())?;
    let (limit, offset) = page_bounds(params.limit, params.offset);

    let reviews = review_store(&state.db)
        .filtered(&ReviewFilter {
            status: params.status,
            rating: params.rating,
            customer_id: params.customer_id,
        })
        .await?;

    let filter = DetailFilter {
        owner: params.owner,
        region: params.region,
        stability: params.stability,
        sentiment: params.sentiment,
        priority: params.priority,
        search: params.search,
    };

    let page = detail_page(
        reviews,
        DetailQuery {
            filter: &filter,
            sort_by,
            order,
            limit,
            offset,
        },
        synthetic_source(&state),
    );

    Ok(Json(ApiResponse::ok(page)))
}

/// Usage overview across every review.
#[utoipa::path(
    get,
    path = "/usage/summary",
    tag = "Usage",
    operation_id = "getUsageSummary",
    summary = "Usage summary",
    responses(
        (status = 200, description = "Breakdowns and totals", body = ApiResponse<UsageSummary>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_usage_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UsageSummary>>, AppError> {
    let source = synthetic_source(&state);
    let records: Vec<_> = review_store(&state.db)
        .all()
        .await?
        .into_iter()
        .map(|r| to_detail_record(r, source))
        .collect();

    Ok(Json(ApiResponse::ok(usage_summary(&records))))
}

fn synthetic_source(state: &AppState) -> SyntheticSource {
    SyntheticSource::from_config(state.config.usage.stable_synthetic)
}
