pub mod export;
pub mod health;
pub mod metrics;
pub mod review;
pub mod shared;
pub mod usage;
