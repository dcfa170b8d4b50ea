use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::analytics::{local_offset, today};
use crate::entity::review;
use crate::error::{AppError, ErrorBody};
use crate::export::summary::{ExportSummary, export_summary};
use crate::export::{ExportFormat, JsonExport, render};
use crate::extractors::query::AppQuery;
use crate::models::export::ExportFilterQuery;
use crate::models::shared::ApiResponse;
use crate::state::AppState;
use crate::store::{ReviewFilter, review_store};

/// Export every review in the format chosen from `Accept`.
#[utoipa::path(
    get,
    path = "/export",
    tag = "Export",
    operation_id = "exportReviews",
    summary = "Export all reviews",
    description = "CSV is chosen when `Accept` lists `text/csv`, otherwise XML when it lists \
                   `application/xml` or `text/xml`, otherwise JSON. `q` weights are ignored.",
    params(("Accept" = Option<String>, Header, description = "Requested media types")),
    responses(
        (status = 200, description = "Export in the negotiated format", content(
            (JsonExport = "application/json"),
            (String = "text/csv"),
            (String = "application/xml"),
        )),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn export_negotiated(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    let format = ExportFormat::negotiate(accept);

    let reviews = review_store(&state.db).all().await?;
    export_response(&state, reviews, format)
}

/// Export filtered reviews as CSV.
#[utoipa::path(
    get,
    path = "/export/csv",
    tag = "Export",
    operation_id = "exportReviewsCsv",
    summary = "Export reviews as CSV",
    params(ExportFilterQuery),
    responses(
        (status = 200, description = "CSV export", body = String, content_type = "text/csv"),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn export_csv(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ExportFilterQuery>,
) -> Result<Response, AppError> {
    let reviews = filtered_reviews(&state, params).await?;
    export_response(&state, reviews, ExportFormat::Csv)
}

/// Export filtered reviews as JSON.
#[utoipa::path(
    get,
    path = "/export/json",
    tag = "Export",
    operation_id = "exportReviewsJson",
    summary = "Export reviews as JSON",
    params(ExportFilterQuery),
    responses(
        (status = 200, description = "JSON export", body = JsonExport),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn export_json(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ExportFilterQuery>,
) -> Result<Response, AppError> {
    let reviews = filtered_reviews(&state, params).await?;
    export_response(&state, reviews, ExportFormat::Json)
}

/// Summary figures for the filtered reviews.
#[utoipa::path(
    get,
    path = "/export/summary",
    tag = "Export",
    operation_id = "exportSummary",
    summary = "Export summary",
    params(ExportFilterQuery),
    responses(
        (status = 200, description = "Summary of the selection", body = ApiResponse<ExportSummary>),
        (status = 400, description = "Invalid filter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_export_summary(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ExportFilterQuery>,
) -> Result<Json<ApiResponse<ExportSummary>>, AppError> {
    let reviews = filtered_reviews(&state, params).await?;
    Ok(Json(ApiResponse::ok(export_summary(&reviews))))
}

async fn filtered_reviews(
    state: &AppState,
    params: ExportFilterQuery,
) -> Result<Vec<review::Model>, AppError> {
    let filter = ReviewFilter {
        status: params.status,
        rating: params.rating,
        customer_id: params.customer_id,
    };
    Ok(review_store(&state.db).filtered(&filter).await?)
}

/// Render `reviews` and wrap them in a response. CSV and XML are sent as attachments.
fn export_response(
    state: &AppState,
    reviews: Vec<review::Model>,
    format: ExportFormat,
) -> Result<Response, AppError> {
    let count = reviews.len();
    let output = render(reviews, format, &state.config.export.source, Utc::now())
        .map_err(|e| AppError::Internal(format!("Failed to render export: {e}")))?;

    info!(format = format.extension(), records = count, "reviews exported");

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, output.content_type)],
        output.body,
    )
        .into_response();

    if format != ExportFormat::Json {
        let date = today(&local_offset(state.config.analytics.utc_offset_minutes));
        let disposition = format!("attachment; filename=\"{}\"", format.filename(date));
        let value = header::HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("Invalid Content-Disposition: {e}")))?;
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}
