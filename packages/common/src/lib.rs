pub mod classification;
pub mod review_status;

pub use classification::{Priority, Sentiment, Stability};
pub use review_status::{ParseReviewStatusError, ReviewStatus};
