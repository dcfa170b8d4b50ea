use common::ReviewStatus;
use serde::Deserialize;

/// Filters accepted by the per-format export endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExportFilterQuery {
    pub status: Option<ReviewStatus>,
    pub rating: Option<i32>,
    pub customer_id: Option<String>,
}
