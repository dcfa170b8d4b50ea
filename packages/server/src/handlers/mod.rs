pub mod export;
pub mod health;
pub mod metrics;
pub mod reviews;
pub mod usage;
