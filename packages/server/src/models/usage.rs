use common::ReviewStatus;
use serde::Deserialize;

/// Store filters, detail filters, sorting and pagination for `/usage/details`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UsageDetailsQuery {
    pub status: Option<ReviewStatus>,
    pub rating: Option<i32>,
    pub customer_id: Option<String>,
    /// Case-insensitive substring of the owner name.
    pub owner: Option<String>,
    #[param(example = "EU-Central")]
    pub region: Option<String>,
    /// `Stable`, `Warning` or `Critical`.
    pub stability: Option<String>,
    /// `Positive`, `Neutral` or `Negative`.
    pub sentiment: Option<String>,
    /// `Low`, `Medium` or `High`.
    pub priority: Option<String>,
    /// Free text matched against title, comment, owner and customer id.
    pub search: Option<String>,
    #[param(example = 20)]
    pub limit: Option<u64>,
    #[param(example = 0)]
    pub offset: Option<u64>,
    /// Any detail record field. Defaults to `createdAt`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
}
