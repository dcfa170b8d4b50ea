//! Time-series and period-comparison analytics over review rows.
//!
//! Everything here is pure: callers load the rows through the store and hand them in.

pub mod daily;
pub mod summary;
pub mod window;

pub use daily::{DailyBucket, daily_metrics, parse_metric_fields, prune_buckets};
pub use summary::{ComparisonMode, MetricsSummary, summarize};
pub use window::{DateWindow, RangeError, local_offset, resolve_range, today};

/// Round to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
