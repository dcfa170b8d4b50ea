use std::time::Duration;

use sea_orm::sea_query::{Index, SqliteQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::review;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections.max(1))
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("review_server::entity::*")
        .sync(&db)
        .await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Ensure the lookup indexes used by listing and time-series queries exist.
///
/// Schema sync only creates the table itself, so these are created manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes = [
        ("idx_review_created_at", review::Column::CreatedAt),
        ("idx_review_status", review::Column::Status),
        ("idx_review_customer_id", review::Column::CustomerId),
    ];

    for (name, column) in indexes {
        let stmt = Index::create()
            .if_not_exists()
            .name(name)
            .table(review::Entity)
            .col(column)
            .to_string(SqliteQueryBuilder);

        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}

/// Cheap liveness probe for the health endpoint.
pub async fn ping(db: &DatabaseConnection) -> bool {
    db.ping().await.is_ok()
}
