use common::ReviewStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    /// UUID v4, assigned at creation.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub customer_id: String,
    pub customer_name: String,
    pub rating: i32, // 1..=5
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub status: ReviewStatus,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
