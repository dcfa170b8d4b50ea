use chrono::{DateTime, Utc};
use common::ReviewStatus;
use serde::{Deserialize, Serialize};

use crate::entity::review;

/// Request body for creating a review.
///
/// Every field is optional at the type level so that missing fields are reported by
/// validation with a per-field message rather than as a deserialization failure.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[schema(example = "cust-1042")]
    pub customer_id: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub customer_name: Option<String>,
    /// Integer star rating, 1-5.
    #[schema(value_type = Option<i32>, example = 5)]
    pub rating: Option<serde_json::Value>,
    #[schema(example = "Fast delivery")]
    pub title: Option<String>,
    #[schema(example = "Arrived a day early and well packed.")]
    pub comment: Option<String>,
    /// Defaults to `pending`.
    #[schema(value_type = Option<ReviewStatus>, example = "pending")]
    pub status: Option<String>,
}

/// Request body for a partial update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    #[schema(value_type = Option<i32>, example = 4)]
    pub rating: Option<serde_json::Value>,
    pub title: Option<String>,
    pub comment: Option<String>,
    #[schema(value_type = Option<ReviewStatus>, example = "approved")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[schema(example = "0b6f2c1e-8f4e-4c8e-9d43-2f0b7f0f6b1a")]
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    #[schema(example = 5)]
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<review::Model> for ReviewResponse {
    fn from(m: review::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            customer_name: m.customer_name,
            rating: m.rating,
            title: m.title,
            comment: m.comment,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Filters, sorting and pagination for `GET /reviews`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    /// Exact status match.
    pub status: Option<ReviewStatus>,
    /// Exact rating match.
    #[param(example = 5)]
    pub rating: Option<i32>,
    /// Exact customer id match.
    pub customer_id: Option<String>,
    /// Page size (1-100, default 20).
    #[param(example = 20)]
    pub limit: Option<u64>,
    #[param(example = 0)]
    pub offset: Option<u64>,
    /// One of `createdAt` (default), `updatedAt`, `rating`, `customerName`, `title`, `status`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewResponse>,
    /// Number of reviews matching the filters, before pagination.
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteReviewResponse {
    pub id: String,
    #[schema(example = true)]
    pub deleted: bool,
}
