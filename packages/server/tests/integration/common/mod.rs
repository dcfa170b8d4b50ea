use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use ::common::ReviewStatus;
use reqwest::Client;
use reqwest::header::HeaderMap;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use tempfile::TempDir;

use review_server::config::AppConfig;
use review_server::database::init_db;
use review_server::entity::review;
use review_server::state::AppState;

pub mod routes {
    pub const REVIEWS: &str = "/api/reviews";
    pub const TIMESERIES: &str = "/api/metrics/timeseries";
    pub const METRICS_SUMMARY: &str = "/api/metrics/summary";
    pub const USAGE_DETAILS: &str = "/api/usage/details";
    pub const USAGE_SUMMARY: &str = "/api/usage/summary";
    pub const EXPORT: &str = "/api/export";
    pub const EXPORT_CSV: &str = "/api/export/csv";
    pub const EXPORT_JSON: &str = "/api/export/json";
    pub const EXPORT_SUMMARY: &str = "/api/export/summary";
    pub const HEALTH: &str = "/api/health";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn review(id: &str) -> String {
        format!("/api/reviews/{id}")
    }
}

/// A running test server backed by a fresh SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            text,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with configuration tweaks applied on top of the defaults.
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("reviews.db");

        let mut config = AppConfig::defaults().expect("Default config must deserialize");
        config.database.url = format!("sqlite://{}?mode=rwc", db_path.display());
        config.database.max_connections = 1;
        configure(&mut config);

        let db = init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState {
            db: db.clone(),
            config,
        };
        let app = review_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_accept(&self, path: &str, accept: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Accept", accept)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a review through the API and return its JSON representation.
    pub async fn create_review(&self, customer_id: &str, rating: i32) -> Value {
        let res = self
            .post(routes::REVIEWS, &review_payload(customer_id, rating))
            .await;
        assert_eq!(res.status, 201, "Create failed: {}", res.text);
        res.body["data"].clone()
    }

    /// Insert a review row directly, bypassing the API so `created_at` can be chosen.
    pub async fn insert_review_at(
        &self,
        created_at: DateTime<Utc>,
        rating: i32,
        status: ReviewStatus,
    ) -> review::Model {
        review::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            customer_id: Set("cust-seeded".into()),
            customer_name: Set("Seeded Customer".into()),
            rating: Set(rating),
            title: Set(format!("{rating} star review")),
            comment: Set("Inserted by test".into()),
            status: Set(status),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert review")
    }
}

pub fn review_payload(customer_id: &str, rating: i32) -> Value {
    json!({
        "customerId": customer_id,
        "customerName": format!("Customer {customer_id}"),
        "rating": rating,
        "title": "Review title",
        "comment": "Review comment",
    })
}

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}
