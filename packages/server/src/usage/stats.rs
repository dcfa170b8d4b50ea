use std::collections::BTreeMap;

use common::ReviewStatus;
use serde::Serialize;

use super::detail::{DetailRecord, REGIONS, format_cents, parse_currency};
use crate::analytics::round2;

/// Counts keyed by category label. Every known label is present, even at zero.
pub type Breakdown = BTreeMap<String, u64>;

/// Statistics over a filtered set of detail records, before pagination.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailStatistics {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_sentiment: BTreeMap<String, u64>,
    pub by_stability: BTreeMap<String, u64>,
    pub by_region: BTreeMap<String, u64>,
    pub average_rating: f64,
}

/// Dataset-wide usage overview.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_records: u64,
    pub average_rating: f64,
    pub by_status: BTreeMap<String, u64>,
    pub by_sentiment: BTreeMap<String, u64>,
    pub by_stability: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    pub by_region: BTreeMap<String, u64>,
    /// Sum of the synthetic costs, formatted like the per-record values.
    #[schema(example = "$1234.56")]
    pub total_costs: String,
}

#[derive(Default)]
struct Tally {
    total: u64,
    rating_sum: i64,
    cost_cents: u64,
    by_status: Breakdown,
    by_sentiment: Breakdown,
    by_stability: Breakdown,
    by_priority: Breakdown,
    by_region: Breakdown,
}

impl Tally {
    fn new() -> Self {
        let statuses: Vec<&str> = ReviewStatus::ALL.iter().map(|s| s.as_str()).collect();

        Self {
            by_status: zeroed(&statuses),
            by_sentiment: zeroed(&["Positive", "Neutral", "Negative"]),
            by_stability: zeroed(&["Stable", "Warning", "Critical"]),
            by_priority: zeroed(&["Low", "Medium", "High"]),
            by_region: zeroed(&REGIONS[..]),
            ..Default::default()
        }
    }

    fn add(&mut self, record: &DetailRecord) {
        self.total += 1;
        self.rating_sum += i64::from(record.rating);
        self.cost_cents += (parse_currency(&record.costs) * 100.0).round() as u64;
        bump(&mut self.by_status, record.status.as_str());
        bump(&mut self.by_sentiment, record.sentiment.as_str());
        bump(&mut self.by_stability, record.stability.as_str());
        bump(&mut self.by_priority, record.priority.as_str());
        bump(&mut self.by_region, &record.region);
    }

    fn average_rating(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            round2(self.rating_sum as f64 / self.total as f64)
        }
    }
}

fn zeroed(labels: &[&str]) -> Breakdown {
    labels.iter().map(|l| (l.to_string(), 0)).collect()
}

fn bump(map: &mut Breakdown, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

fn tally<'a>(records: impl IntoIterator<Item = &'a DetailRecord>) -> Tally {
    let mut tally = Tally::new();
    for record in records {
        tally.add(record);
    }
    tally
}

pub fn detail_statistics(records: &[DetailRecord]) -> DetailStatistics {
    let tally = tally(records);
    DetailStatistics {
        total: tally.total,
        average_rating: tally.average_rating(),
        by_status: tally.by_status,
        by_sentiment: tally.by_sentiment,
        by_stability: tally.by_stability,
        by_region: tally.by_region,
    }
}

pub fn usage_summary(records: &[DetailRecord]) -> UsageSummary {
    let tally = tally(records);
    UsageSummary {
        total_records: tally.total,
        average_rating: tally.average_rating(),
        total_costs: format_cents(tally.cost_cents),
        by_status: tally.by_status,
        by_sentiment: tally.by_sentiment,
        by_stability: tally.by_stability,
        by_priority: tally.by_priority,
        by_region: tally.by_region,
    }
}
