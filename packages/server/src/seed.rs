use chrono::{DateTime, Duration, Utc};
use common::ReviewStatus;
use rand::Rng;
use sea_orm::*;
use tracing::info;

use crate::entity::review;
use crate::store::review_store;

const CUSTOMERS: &[(&str, &str)] = &[
    ("cust-1001", "Ada Lovelace"),
    ("cust-1002", "Grace Hopper"),
    ("cust-1003", "Alan Turing"),
    ("cust-1004", "Katherine Johnson"),
    ("cust-1005", "Edsger Dijkstra"),
    ("cust-1006", "Barbara Liskov"),
];

/// Title and comment per star rating, index 0 is 1 star.
const TEMPLATES: &[(&str, &str)] = &[
    ("Very disappointed", "The item arrived broken and support never replied."),
    ("Not great", "Took two weeks to arrive and the fit is off."),
    ("It's okay", "Does the job, nothing special."),
    ("Pretty good", "Good value for the price, would buy again."),
    ("Excellent", "Exactly as described and shipping was fast."),
];

/// Days back from today that seeded reviews are spread over.
const SPREAD_DAYS: i64 = 30;

/// Insert `count` sample reviews when the `review` table is empty.
///
/// Ratings lean positive and older reviews are more likely to have been moderated.
pub async fn seed_sample_reviews(db: &DatabaseConnection, count: u32) -> Result<(), DbErr> {
    if count == 0 {
        return Ok(());
    }

    let existing = review_store(db).count().await?;
    if existing > 0 {
        info!(existing, "Review table not empty, skipping sample data");
        return Ok(());
    }

    let models = sample_models(count, Utc::now());
    review::Entity::insert_many(models)
        .exec_without_returning(db)
        .await?;

    info!(count, "Seeded sample reviews");
    Ok(())
}

fn sample_models(count: u32, now: DateTime<Utc>) -> Vec<review::ActiveModel> {
    let mut rng = rand::rng();
    let mut models = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let (customer_id, customer_name) = CUSTOMERS[rng.random_range(0..CUSTOMERS.len())];
        let rating = match rng.random_range(0..10) {
            0 => 1,
            1 => 2,
            2 | 3 => 3,
            4..=6 => 4,
            _ => 5,
        };
        let (title, comment) = TEMPLATES[(rating - 1) as usize];

        let age = Duration::minutes(rng.random_range(0..SPREAD_DAYS * 24 * 60));
        let created_at = now - age;
        let status = if age < Duration::days(2) || rng.random_bool(0.2) {
            ReviewStatus::Pending
        } else if rating <= 2 && rng.random_bool(0.5) {
            ReviewStatus::Rejected
        } else {
            ReviewStatus::Approved
        };
        let updated_at = if status.is_decided() {
            created_at + Duration::hours(rng.random_range(1..48)).min(age)
        } else {
            created_at
        };

        models.push(review::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            customer_id: Set(customer_id.to_string()),
            customer_name: Set(customer_name.to_string()),
            rating: Set(rating),
            title: Set(title.to_string()),
            comment: Set(comment.to_string()),
            status: Set(status),
            created_at: Set(created_at),
            updated_at: Set(updated_at),
        });
    }

    models
}
