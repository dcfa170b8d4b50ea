mod review;

pub use review::{Page, ReviewFilter, ReviewSort, ReviewSortField, ReviewStore, review_store};
