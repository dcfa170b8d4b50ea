use chrono::{DateTime, Utc};
use common::{Priority, ReviewStatus, Sentiment, Stability};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::entity::review;

/// Regions a usage record can be attributed to.
pub const REGIONS: [&str; 4] = ["US-East", "US-West", "EU-Central", "Asia-Pacific"];

/// Synthetic costs are drawn from this range, in cents.
const MIN_COST_CENTS: u32 = 1_000;
const MAX_COST_CENTS: u32 = 6_000;

/// A review denormalized for the usage dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Synthetic currency amount between `$10.00` and `$60.00`.
    #[schema(example = "$42.17")]
    pub costs: String,
    #[schema(example = "EU-Central")]
    pub region: String,
    pub stability: Stability,
    pub sentiment: Sentiment,
    pub priority: Priority,
    /// Same as `customerName`.
    pub owner: String,
    /// Same as `updatedAt`.
    pub last_edited: DateTime<Utc>,
}

/// Where the synthetic `costs` and `region` attributes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticSource {
    /// Fresh values on every read.
    Random,
    /// Values derived from the review id, identical across reads.
    SeededById,
}

impl SyntheticSource {
    pub fn from_config(stable: bool) -> Self {
        if stable { Self::SeededById } else { Self::Random }
    }

    fn attributes(self, id: &str) -> (u32, &'static str) {
        match self {
            Self::Random => roll(&mut rand::rng()),
            Self::SeededById => roll(&mut StdRng::seed_from_u64(id_seed(id))),
        }
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R) -> (u32, &'static str) {
    let cents = rng.random_range(MIN_COST_CENTS..=MAX_COST_CENTS);
    let region = REGIONS[rng.random_range(0..REGIONS.len())];
    (cents, region)
}

fn id_seed(id: &str) -> u64 {
    let digest = Sha256::digest(id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Format cents as `$12.34`.
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Parse a currency string such as `$12.34` into a float. Unparseable values sort as 0.
pub fn parse_currency(raw: &str) -> f64 {
    raw.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

pub fn to_detail_record(review: review::Model, source: SyntheticSource) -> DetailRecord {
    let (cents, region) = source.attributes(&review.id);

    DetailRecord {
        costs: format_cents(u64::from(cents)),
        region: region.to_string(),
        stability: Stability::from_rating(review.rating),
        sentiment: Sentiment::from_rating(review.rating),
        priority: Priority::from_rating(review.rating),
        owner: review.customer_name.clone(),
        last_edited: review.updated_at,
        id: review.id,
        customer_id: review.customer_id,
        customer_name: review.customer_name,
        rating: review.rating,
        title: review.title,
        comment: review.comment,
        status: review.status,
        created_at: review.created_at,
        updated_at: review.updated_at,
    }
}
