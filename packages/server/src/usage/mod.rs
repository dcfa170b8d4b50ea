//! Usage dashboard: reviews denormalized into detail records, then filtered, sorted,
//! paginated and summarized in memory.

pub mod detail;
pub mod query;
pub mod stats;

pub use detail::{DetailRecord, SyntheticSource, to_detail_record};
pub use query::{DetailFilter, DetailSortField, sort_records};
pub use stats::{DetailStatistics, UsageSummary, detail_statistics, usage_summary};

use crate::entity::review;
use crate::models::shared::{OffsetPagination, SortOrder};

/// One page of detail records with statistics over the whole filtered set.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct DetailPage {
    pub records: Vec<DetailRecord>,
    pub pagination: OffsetPagination,
    pub statistics: DetailStatistics,
}

#[derive(Debug, Clone, Copy)]
pub struct DetailQuery<'a> {
    pub filter: &'a DetailFilter,
    pub sort_by: DetailSortField,
    pub order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

/// Transform `reviews` (already narrowed by the store filters), apply the detail
/// filters and sort, then cut out the requested page.
pub fn detail_page(
    reviews: Vec<review::Model>,
    query: DetailQuery<'_>,
    source: SyntheticSource,
) -> DetailPage {
    let mut records: Vec<DetailRecord> = reviews
        .into_iter()
        .map(|r| to_detail_record(r, source))
        .filter(|r| query.filter.matches(r))
        .collect();

    sort_records(&mut records, query.sort_by, query.order);
    let statistics = detail_statistics(&records);
    let total = records.len() as u64;

    let page = records
        .into_iter()
        .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
        .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
        .collect();

    DetailPage {
        records: page,
        pagination: OffsetPagination::new(total, query.limit, query.offset),
        statistics,
    }
}
