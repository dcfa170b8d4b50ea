use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

/// Time-series and comparison settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Offset from UTC used to decide which calendar day a review belongs to.
    pub utc_offset_minutes: i32,
    /// Longest accepted `startDate..=endDate` span, in days.
    pub max_range_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsageConfig {
    /// When true, synthetic `costs`/`region` are seeded from the review id
    /// instead of being re-rolled on every read.
    pub stable_synthetic: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Value reported as `metadata.source` in JSON exports.
    pub source: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Number of sample reviews inserted at startup when the table is empty.
    pub sample_reviews: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub analytics: AnalyticsConfig,
    pub usage: UsageConfig,
    pub export: ExportConfig,
    pub seed: SeedConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Self::builder()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., REVIEWS__DATABASE__URL)
            .add_source(Environment::with_prefix("REVIEWS").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in defaults only, without file or environment sources.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://reviews.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.sqlx_logging", false)?
            .set_default("analytics.utc_offset_minutes", 0)?
            .set_default("analytics.max_range_days", 366)?
            .set_default("usage.stable_synthetic", false)?
            .set_default("export.source", "customer-reviews")?
            .set_default("seed.sample_reviews", 0)?
            .set_default("log.level", "info")
    }
}
