use ::common::ReviewStatus;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::{TestApp, review_payload, routes, utc};

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("timestamp string"))
        .expect("RFC 3339 timestamp")
        .with_timezone(&Utc)
}

mod create {
    use super::*;

    #[tokio::test]
    async fn valid_review_is_created_pending() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::REVIEWS, &review_payload("cust-1", 4)).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], true);
        let data = &res.body["data"];
        assert_eq!(data["status"], "pending");
        assert_eq!(data["rating"], 4);
        assert_eq!(data["customerId"], "cust-1");
        assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(data["createdAt"], data["updatedAt"]);
    }

    #[tokio::test]
    async fn explicit_status_is_kept() {
        let app = TestApp::spawn().await;
        let mut payload = review_payload("cust-1", 5);
        payload["status"] = json!("approved");

        let res = app.post(routes::REVIEWS, &payload).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["data"]["status"], "approved");
    }

    #[tokio::test]
    async fn missing_fields_are_all_reported() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::REVIEWS, &json!({ "rating": 9 })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = res.body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec!["customerId", "customerName", "title", "comment", "rating"]
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::REVIEWS, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;
        let mut payload = review_payload("cust-1", 3);
        payload["status"] = json!("archived");

        let res = app.post(routes::REVIEWS, &payload).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["details"][0]["field"], "status");
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn get_returns_created_review() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 5).await;
        let id = created["id"].as_str().unwrap();

        let res = app.get(&routes::review(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], created);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::review("does-not-exist")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(res.body.get("details").is_none());
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 2).await;
        let id = created["id"].as_str().unwrap();

        let res = app
            .put(&routes::review(id), &json!({ "status": "approved" }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["status"], "approved");
        assert_eq!(data["rating"], created["rating"]);
        assert_eq!(data["title"], created["title"]);
        assert_eq!(data["createdAt"], created["createdAt"]);
        assert!(timestamp(&data["updatedAt"]) > timestamp(&created["updatedAt"]));
    }

    #[tokio::test]
    async fn repeated_updates_strictly_increase_updated_at() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 3).await;
        let id = created["id"].as_str().unwrap();

        let first = app.put(&routes::review(id), &json!({ "rating": 4 })).await;
        let second = app.put(&routes::review(id), &json!({ "rating": 5 })).await;

        assert_eq!(second.body["data"]["rating"], 5);
        assert!(
            timestamp(&second.body["data"]["updatedAt"])
                > timestamp(&first.body["data"]["updatedAt"])
        );
    }

    #[tokio::test]
    async fn empty_body_only_moves_updated_at() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 3).await;
        let id = created["id"].as_str().unwrap();

        let res = app.put(&routes::review(id), &json!({})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["rating"], 3);
        assert_eq!(data["status"], created["status"]);
        assert_eq!(data["title"], created["title"]);
        assert!(timestamp(&data["updatedAt"]) > timestamp(&created["updatedAt"]));
    }

    #[tokio::test]
    async fn invalid_rating_is_rejected() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 3).await;
        let id = created["id"].as_str().unwrap();

        let res = app.put(&routes::review(id), &json!({ "rating": 0 })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["details"][0]["field"], "rating");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::review("missing"), &json!({ "rating": 4 }))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleted_review_is_gone() {
        let app = TestApp::spawn().await;
        let created = app.create_review("cust-1", 3).await;
        let id = created["id"].as_str().unwrap();

        let res = app.delete(&routes::review(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["deleted"], true);

        assert_eq!(app.get(&routes::review(id)).await.status, 404);
        assert_eq!(app.delete(&routes::review(id)).await.status, 404);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn filters_by_status_rating_and_customer() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2023-01-01T10:00:00Z"), 5, ReviewStatus::Approved)
            .await;
        app.insert_review_at(utc("2023-01-02T10:00:00Z"), 5, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-01-03T10:00:00Z"), 1, ReviewStatus::Approved)
            .await;
        app.create_review("cust-other", 5).await;

        let res = app
            .get(&format!("{}?status=approved&rating=5", routes::REVIEWS))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["total"], 1);

        let res = app
            .get(&format!("{}?customerId=cust-other", routes::REVIEWS))
            .await;
        assert_eq!(res.body["data"]["total"], 1);
        assert_eq!(res.body["data"]["reviews"][0]["customerId"], "cust-other");
    }

    #[tokio::test]
    async fn defaults_to_newest_first() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2023-01-01T10:00:00Z"), 3, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-03-01T10:00:00Z"), 4, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-02-01T10:00:00Z"), 5, ReviewStatus::Pending)
            .await;

        let res = app.get(routes::REVIEWS).await;

        let ratings: Vec<i64> = res.body["data"]["reviews"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["rating"].as_i64().unwrap())
            .collect();
        assert_eq!(ratings, vec![4, 5, 3]);
        assert_eq!(res.body["data"]["limit"], 20);
        assert_eq!(res.body["data"]["offset"], 0);
    }

    #[tokio::test]
    async fn pagination_reports_total_before_paging() {
        let app = TestApp::spawn().await;
        for day in 1..=5 {
            app.insert_review_at(
                utc(&format!("2023-01-0{day}T10:00:00Z")),
                4,
                ReviewStatus::Pending,
            )
            .await;
        }

        let res = app
            .get(&format!("{}?limit=2&offset=4", routes::REVIEWS))
            .await;

        assert_eq!(res.body["data"]["total"], 5);
        assert_eq!(res.body["data"]["reviews"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sort_by_rating_reverses_with_order() {
        let app = TestApp::spawn().await;
        for (day, rating) in [(1, 3), (2, 5), (3, 1), (4, 4)] {
            app.insert_review_at(
                utc(&format!("2023-01-0{day}T10:00:00Z")),
                rating,
                ReviewStatus::Pending,
            )
            .await;
        }

        let ratings = |body: &serde_json::Value| -> Vec<i64> {
            body["data"]["reviews"]
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r["rating"].as_i64().unwrap())
                .collect()
        };

        let desc = app
            .get(&format!("{}?sortBy=rating&sortOrder=desc", routes::REVIEWS))
            .await;
        let asc = app
            .get(&format!("{}?sortBy=rating&sortOrder=asc", routes::REVIEWS))
            .await;

        let mut reversed = ratings(&desc.body);
        reversed.reverse();
        assert_eq!(ratings(&asc.body), reversed);
        assert_eq!(ratings(&asc.body), vec![1, 3, 4, 5]);
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?sortBy=costs", routes::REVIEWS)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_parameters_are_ignored() {
        let app = TestApp::spawn().await;
        app.create_review("cust-1", 4).await;

        let res = app.get(&format!("{}?colour=blue", routes::REVIEWS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["total"], 1);
    }

    #[tokio::test]
    async fn largest_offset_returns_an_empty_page() {
        let app = TestApp::spawn().await;
        app.create_review("cust-1", 4).await;

        let res = app
            .get(&format!("{}?offset={}", routes::REVIEWS, u64::MAX))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["total"], 1);
        assert_eq!(res.body["data"]["offset"], i64::MAX);
        assert!(res.body["data"]["reviews"].as_array().unwrap().is_empty());
    }
}

mod store {
    use review_server::models::shared::SortOrder;
    use review_server::store::{Page, ReviewFilter, ReviewSort, ReviewSortField, review_store};

    use super::*;

    #[tokio::test]
    async fn all_returns_every_row_newest_first() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2023-01-01T10:00:00Z"), 3, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-01-03T10:00:00Z"), 5, ReviewStatus::Approved)
            .await;
        app.insert_review_at(utc("2023-01-02T10:00:00Z"), 1, ReviewStatus::Rejected)
            .await;

        let all = review_store(&app.db).all().await.expect("unpaged query");

        let ratings: Vec<i32> = all.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5, 1, 3]);
    }

    #[tokio::test]
    async fn filtered_applies_exact_filters() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2023-01-01T10:00:00Z"), 5, ReviewStatus::Approved)
            .await;
        app.insert_review_at(utc("2023-01-02T10:00:00Z"), 5, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-01-03T10:00:00Z"), 2, ReviewStatus::Approved)
            .await;

        let filter = ReviewFilter {
            status: Some(ReviewStatus::Approved),
            ..Default::default()
        };
        let approved = review_store(&app.db)
            .filtered(&filter)
            .await
            .expect("filtered query");

        assert_eq!(approved.len(), 2);
        assert!(approved.iter().all(|r| r.status == ReviewStatus::Approved));
    }

    #[tokio::test]
    async fn offset_without_limit_skips_rows() {
        let app = TestApp::spawn().await;
        for day in 1..=3 {
            app.insert_review_at(
                utc(&format!("2023-01-0{day}T10:00:00Z")),
                day,
                ReviewStatus::Pending,
            )
            .await;
        }
        let sort = ReviewSort {
            field: ReviewSortField::Rating,
            order: SortOrder::Asc,
        };

        let (items, total) = review_store(&app.db)
            .query(&ReviewFilter::default(), sort, Page { limit: None, offset: 1 })
            .await
            .expect("offset-only query");

        assert_eq!(total, 3);
        let ratings: Vec<i32> = items.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![2, 3]);
    }

    #[tokio::test]
    async fn out_of_range_offset_is_clamped() {
        let app = TestApp::spawn().await;
        app.create_review("cust-1", 4).await;

        let (items, total) = review_store(&app.db)
            .query(
                &ReviewFilter::default(),
                ReviewSort::default(),
                Page {
                    limit: Some(10),
                    offset: u64::MAX,
                },
            )
            .await
            .expect("clamped query");

        assert_eq!(total, 1);
        assert!(items.is_empty());
    }
}

mod plumbing {
    use super::*;

    #[tokio::test]
    async fn health_reports_database() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({ "status": "ok", "database": "ok" }));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/reviews"));
        assert!(paths.contains_key("/api/reviews/{id}"));
        assert!(paths.contains_key("/api/metrics/timeseries"));
        assert!(paths.contains_key("/api/export"));
    }
}
