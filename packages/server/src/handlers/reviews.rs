use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::TransactionTrait;
use tracing::{debug, info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::review::*;
use crate::models::shared::{ApiResponse, SortOrder, page_bounds};
use crate::state::AppState;
use crate::store::{Page, ReviewFilter, ReviewSort, ReviewSortField, review_store};
use crate::validation::{parse_create, parse_update};

/// List reviews.
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List reviews",
    description = "Returns a filtered, sorted page of reviews. `total` counts every match before pagination.",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Page of reviews", body = ApiResponse<ReviewListResponse>),
        (status = 400, description = "Invalid filter or sort (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ReviewListQuery>,
) -> Result<Json<ApiResponse<ReviewListResponse>>, AppError> {
    let sort = ReviewSort {
        field: ReviewSortField::parse(params.sort_by.as_deref())?,
        order: SortOrder::parse(params.sort_order.as_deref())?,
    };
    let (limit, offset) = page_bounds(params.limit, params.offset);
    let filter = ReviewFilter {
        status: params.status,
        rating: params.rating,
        customer_id: params.customer_id,
    };

    let (items, total) = review_store(&state.db)
        .query(
            &filter,
            sort,
            Page {
                limit: Some(limit),
                offset,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(ReviewListResponse {
        reviews: items.into_iter().map(Into::into).collect(),
        total,
        limit,
        offset,
    })))
}

/// Get a single review.
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "getReview",
    summary = "Get review by ID",
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ApiResponse<ReviewResponse>),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let review = review_store(&state.db)
        .get_by_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(ApiResponse::ok(review.into())))
}

/// Create a review.
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Create a review",
    description = "Validates the payload and stores a new review. Status defaults to `pending`.",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_review(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    let new_review = parse_create(payload)?;
    let review = review_store(&state.db).create(new_review).await?;

    info!(review_id = %review.id, rating = review.rating, "review created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review.into()))))
}

/// Update a review.
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Update a review",
    description = "Partial update: only the fields present in the body change. `updatedAt` is always refreshed.",
    params(("id" = String, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let changes = parse_update(payload)?;
    if changes.is_empty() {
        debug!(review_id = %id, "empty update, touching updatedAt only");
    }

    let txn = state.db.begin().await?;
    let review = review_store(&txn)
        .update(&id, changes)
        .await?
        .ok_or_else(|| not_found(&id))?;
    txn.commit().await?;

    info!(review_id = %review.id, status = %review.status, "review updated");

    Ok(Json(ApiResponse::ok(review.into())))
}

/// Delete a review.
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<DeleteReviewResponse>),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteReviewResponse>>, AppError> {
    if !review_store(&state.db).delete(&id).await? {
        return Err(not_found(&id));
    }

    info!(review_id = %id, "review deleted");

    Ok(Json(ApiResponse::ok(DeleteReviewResponse { id, deleted: true })))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Review {id} not found"))
}
