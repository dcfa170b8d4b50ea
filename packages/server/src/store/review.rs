use chrono::{Duration, Utc};
use common::ReviewStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::entity::review;
use crate::error::AppError;
use crate::models::shared::{MAX_OFFSET, SortOrder};
use crate::validation::{NewReview, ReviewChanges};

/// Exact-match filters supported by the store. `None` means "don't filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub rating: Option<i32>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSortField {
    CreatedAt,
    UpdatedAt,
    Rating,
    CustomerName,
    Title,
    Status,
}

impl ReviewSortField {
    /// Parse a `sortBy` value. Accepts the camelCase API names and snake_case column names.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") | Some("createdAt") | Some("created_at") => Ok(Self::CreatedAt),
            Some("updatedAt") | Some("updated_at") => Ok(Self::UpdatedAt),
            Some("rating") => Ok(Self::Rating),
            Some("customerName") | Some("customer_name") => Ok(Self::CustomerName),
            Some("title") => Ok(Self::Title),
            Some("status") => Ok(Self::Status),
            Some(_) => Err(AppError::Validation(
                "sortBy must be one of: createdAt, updatedAt, rating, customerName, title, status"
                    .into(),
            )),
        }
    }

    fn column(self) -> review::Column {
        match self {
            Self::CreatedAt => review::Column::CreatedAt,
            Self::UpdatedAt => review::Column::UpdatedAt,
            Self::Rating => review::Column::Rating,
            Self::CustomerName => review::Column::CustomerName,
            Self::Title => review::Column::Title,
            Self::Status => review::Column::Status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSort {
    pub field: ReviewSortField,
    pub order: SortOrder,
}

impl Default for ReviewSort {
    fn default() -> Self {
        Self {
            field: ReviewSortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// `limit: None` returns every row from `offset` on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: u64,
}

/// CRUD and filtered queries over the `review` table.
///
/// Generic over the connection so the same code runs against the pool or inside a
/// transaction.
pub struct ReviewStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Insert a validated review. The id and both timestamps are assigned here, so
    /// `created_at == updated_at` on the returned row.
    pub async fn create(&self, data: NewReview) -> Result<review::Model, DbErr> {
        let now = Utc::now();
        let model = review::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            customer_id: Set(data.customer_id),
            customer_name: Set(data.customer_name),
            rating: Set(data.rating),
            title: Set(data.title),
            comment: Set(data.comment),
            status: Set(data.status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.conn).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<review::Model>, DbErr> {
        review::Entity::find_by_id(id.to_string())
            .one(self.conn)
            .await
    }

    /// Apply a partial update. Returns `None` if the review does not exist.
    ///
    /// `updated_at` always moves forward, even when the clock has not advanced since
    /// the previous write.
    pub async fn update(
        &self,
        id: &str,
        changes: ReviewChanges,
    ) -> Result<Option<review::Model>, DbErr> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let previous = existing.updated_at;
        let mut active: review::ActiveModel = existing.into();

        if let Some(customer_id) = changes.customer_id {
            active.customer_id = Set(customer_id);
        }
        if let Some(customer_name) = changes.customer_name {
            active.customer_name = Set(customer_name);
        }
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(comment) = changes.comment {
            active.comment = Set(comment);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }

        let now = Utc::now();
        active.updated_at = Set(if now > previous {
            now
        } else {
            previous + Duration::milliseconds(1)
        });

        active.update(self.conn).await.map(Some)
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = review::Entity::delete_by_id(id.to_string())
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Filtered, sorted, paginated listing. The returned total is the filtered count
    /// before pagination.
    pub async fn query(
        &self,
        filter: &ReviewFilter,
        sort: ReviewSort,
        page: Page,
    ) -> Result<(Vec<review::Model>, u64), DbErr> {
        let select = apply_filter(review::Entity::find(), filter);
        let total = select.clone().count(self.conn).await?;

        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let mut select = select
            .order_by(sort.field.column(), order)
            .order_by(review::Column::Id, Order::Asc);
        // SQLite rejects OFFSET without LIMIT, and binds integers as i64.
        if page.limit.is_some() || page.offset > 0 {
            select = select
                .offset(Some(page.offset.min(MAX_OFFSET)))
                .limit(Some(page.limit.unwrap_or(MAX_OFFSET).min(MAX_OFFSET)));
        }
        let items = select.all(self.conn).await?;

        Ok((items, total))
    }

    /// Every review matching `filter`, newest first.
    pub async fn filtered(&self, filter: &ReviewFilter) -> Result<Vec<review::Model>, DbErr> {
        let (items, _) = self
            .query(filter, ReviewSort::default(), Page::default())
            .await?;
        Ok(items)
    }

    /// Every review, newest first.
    pub async fn all(&self) -> Result<Vec<review::Model>, DbErr> {
        self.filtered(&ReviewFilter::default()).await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        review::Entity::find().count(self.conn).await
    }
}

fn apply_filter(
    mut select: Select<review::Entity>,
    filter: &ReviewFilter,
) -> Select<review::Entity> {
    if let Some(status) = filter.status {
        select = select.filter(review::Column::Status.eq(status));
    }
    if let Some(rating) = filter.rating {
        select = select.filter(review::Column::Rating.eq(rating));
    }
    if let Some(ref customer_id) = filter.customer_id {
        select = select.filter(review::Column::CustomerId.eq(customer_id.as_str()));
    }
    select
}

/// Convenience constructor mirroring how handlers obtain the store.
pub fn review_store<C: ConnectionTrait>(conn: &C) -> ReviewStore<'_, C> {
    ReviewStore::new(conn)
}
