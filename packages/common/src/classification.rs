//! Dashboard classifications derived from a review's star rating.
//!
//! Thresholds are fixed: 4-5 stars is positive, 3 is neutral, 1-2 is negative.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Stability {
    Stable,
    Warning,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Sentiment {
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            r if r >= 4 => Self::Positive,
            3 => Self::Neutral,
            _ => Self::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl Stability {
    pub fn from_rating(rating: i32) -> Self {
        match Sentiment::from_rating(rating) {
            Sentiment::Positive => Self::Stable,
            Sentiment::Neutral => Self::Warning,
            Sentiment::Negative => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl Priority {
    pub fn from_rating(rating: i32) -> Self {
        match Sentiment::from_rating(rating) {
            Sentiment::Positive => Self::Low,
            Sentiment::Neutral => Self::Medium,
            Sentiment::Negative => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
