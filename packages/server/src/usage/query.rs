use std::cmp::Ordering;

use super::detail::{DetailRecord, parse_currency};
use crate::error::AppError;
use crate::models::shared::SortOrder;

/// Filters applied to detail records after the store-level filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFilter {
    /// Case-insensitive substring of the owner.
    pub owner: Option<String>,
    pub region: Option<String>,
    pub stability: Option<String>,
    pub sentiment: Option<String>,
    pub priority: Option<String>,
    /// Case-insensitive substring of title, comment, owner or customer id.
    pub search: Option<String>,
}

impl DetailFilter {
    pub fn matches(&self, record: &DetailRecord) -> bool {
        if let Some(owner) = non_empty(&self.owner)
            && !contains_ci(&record.owner, owner)
        {
            return false;
        }
        if let Some(region) = non_empty(&self.region)
            && record.region != region
        {
            return false;
        }
        if let Some(stability) = non_empty(&self.stability)
            && record.stability.as_str() != stability
        {
            return false;
        }
        if let Some(sentiment) = non_empty(&self.sentiment)
            && record.sentiment.as_str() != sentiment
        {
            return false;
        }
        if let Some(priority) = non_empty(&self.priority)
            && record.priority.as_str() != priority
        {
            return false;
        }
        if let Some(term) = non_empty(&self.search) {
            let hit = [
                record.title.as_str(),
                record.comment.as_str(),
                record.owner.as_str(),
                record.customer_id.as_str(),
            ]
            .iter()
            .any(|field| contains_ci(field, term));
            if !hit {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSortField {
    Id,
    CustomerId,
    CustomerName,
    Rating,
    Title,
    Comment,
    Status,
    CreatedAt,
    UpdatedAt,
    Costs,
    Region,
    Stability,
    Sentiment,
    Priority,
    Owner,
    LastEdited,
}

impl DetailSortField {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let field = match raw.map(str::trim) {
            None | Some("") | Some("createdAt") => Self::CreatedAt,
            Some("id") => Self::Id,
            Some("customerId") => Self::CustomerId,
            Some("customerName") => Self::CustomerName,
            Some("rating") => Self::Rating,
            Some("title") => Self::Title,
            Some("comment") => Self::Comment,
            Some("status") => Self::Status,
            Some("updatedAt") => Self::UpdatedAt,
            Some("costs") => Self::Costs,
            Some("region") => Self::Region,
            Some("stability") => Self::Stability,
            Some("sentiment") => Self::Sentiment,
            Some("priority") => Self::Priority,
            Some("owner") => Self::Owner,
            Some("lastEdited") => Self::LastEdited,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "Invalid sortBy '{other}'"
                )));
            }
        };
        Ok(field)
    }

    fn compare(self, a: &DetailRecord, b: &DetailRecord) -> Ordering {
        match self {
            Self::Rating => a.rating.cmp(&b.rating),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            Self::LastEdited => a.last_edited.cmp(&b.last_edited),
            Self::Costs => parse_currency(&a.costs).total_cmp(&parse_currency(&b.costs)),
            Self::Id => text_cmp(&a.id, &b.id),
            Self::CustomerId => text_cmp(&a.customer_id, &b.customer_id),
            Self::CustomerName => text_cmp(&a.customer_name, &b.customer_name),
            Self::Title => text_cmp(&a.title, &b.title),
            Self::Comment => text_cmp(&a.comment, &b.comment),
            Self::Status => text_cmp(a.status.as_str(), b.status.as_str()),
            Self::Region => text_cmp(&a.region, &b.region),
            Self::Stability => text_cmp(a.stability.as_str(), b.stability.as_str()),
            Self::Sentiment => text_cmp(a.sentiment.as_str(), b.sentiment.as_str()),
            Self::Priority => text_cmp(a.priority.as_str(), b.priority.as_str()),
            Self::Owner => text_cmp(&a.owner, &b.owner),
        }
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort: records that compare equal keep their incoming order in both directions.
pub fn sort_records(records: &mut [DetailRecord], field: DetailSortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ord = field.compare(a, b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
