use ::common::ReviewStatus;

use crate::common::{TestApp, routes, utc};

fn timeseries(start: &str, end: &str) -> String {
    format!("{}?startDate={start}&endDate={end}", routes::TIMESERIES)
}

mod timeseries {
    use super::*;

    #[tokio::test]
    async fn empty_day_yields_one_zero_bucket() {
        let app = TestApp::spawn().await;

        let res = app.get(&timeseries("2023-01-01", "2023-01-01")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["date"], "2023-01-01");
        assert_eq!(data[0]["reviewsSubmitted"], 0);
        assert_eq!(data[0]["averageRating"], 0.0);
        assert_eq!(res.body["meta"]["days"], 1);
    }

    #[tokio::test]
    async fn buckets_reviews_by_day() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2023-01-01T08:00:00Z"), 5, ReviewStatus::Approved)
            .await;
        app.insert_review_at(utc("2023-01-01T12:00:00Z"), 2, ReviewStatus::Rejected)
            .await;
        app.insert_review_at(utc("2023-01-01T23:59:59Z"), 5, ReviewStatus::Pending)
            .await;
        app.insert_review_at(utc("2023-01-03T09:00:00Z"), 3, ReviewStatus::Pending)
            .await;

        let res = app.get(&timeseries("2023-01-01", "2023-01-03")).await;

        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        let first = &data[0];
        assert_eq!(first["reviewsSubmitted"], 3);
        assert_eq!(first["fiveStarCount"], 2);
        assert_eq!(first["escalations"], 1);
        assert_eq!(first["averageRating"], 4.0);
        assert_eq!(first["interactions"], 2);
        assert_eq!(data[1]["date"], "2023-01-02");
        assert_eq!(data[1]["reviewsSubmitted"], 0);
        assert_eq!(data[2]["reviewsPending"], 1);
    }

    #[tokio::test]
    async fn metrics_parameter_prunes_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!(
                "{}&metrics=reviewsSubmitted,averageRating",
                timeseries("2023-01-01", "2023-01-02")
            ))
            .await;

        let bucket = res.body["data"][0].as_object().unwrap();
        let mut keys: Vec<&str> = bucket.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["averageRating", "date", "reviewsSubmitted"]);
    }

    #[tokio::test]
    async fn configured_offset_moves_day_boundaries() {
        let app = TestApp::spawn_with(|c| c.analytics.utc_offset_minutes = 120).await;
        app.insert_review_at(utc("2023-01-01T23:30:00Z"), 4, ReviewStatus::Pending)
            .await;

        let res = app.get(&timeseries("2023-01-01", "2023-01-02")).await;

        assert_eq!(res.body["data"][0]["reviewsSubmitted"], 0);
        assert_eq!(res.body["data"][1]["reviewsSubmitted"], 1);
    }

    #[tokio::test]
    async fn defaults_to_last_thirty_days() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::TIMESERIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn rejects_bad_ranges() {
        let app = TestApp::spawn().await;

        let inverted = app.get(&timeseries("2023-02-01", "2023-01-01")).await;
        assert_eq!(inverted.status, 400);
        assert_eq!(inverted.body["code"], "VALIDATION_ERROR");

        let malformed = app.get(&timeseries("01-02-2023", "2023-01-05")).await;
        assert_eq!(malformed.status, 400);

        let too_long = app.get(&timeseries("2020-01-01", "2023-01-01")).await;
        assert_eq!(too_long.status, 400);
    }
}

mod summary {
    use super::*;

    #[tokio::test]
    async fn compares_against_previous_period() {
        let app = TestApp::spawn().await;
        // Current window
        app.insert_review_at(utc("2023-01-15T10:00:00Z"), 5, ReviewStatus::Approved)
            .await;
        app.insert_review_at(utc("2023-01-16T10:00:00Z"), 4, ReviewStatus::Approved)
            .await;
        // Previous window
        app.insert_review_at(utc("2023-01-05T10:00:00Z"), 2, ReviewStatus::Pending)
            .await;

        let res = app
            .get(&format!(
                "{}?startDate=2023-01-11&endDate=2023-01-20",
                routes::METRICS_SUMMARY
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["comparisonMode"], "previous_period");
        assert_eq!(data["current"]["totalReviews"], 2);
        assert_eq!(data["current"]["satisfactionScore"], 100.0);
        assert_eq!(data["previous"]["totalReviews"], 1);
        assert_eq!(data["comparisonPeriod"]["startDate"], "2023-01-01");
        assert_eq!(data["comparisonPeriod"]["endDate"], "2023-01-10");
        assert_eq!(data["changes"]["totalReviews"], 100.0);
        assert_eq!(data["changes"]["fiveStarCount"], 100.0);
        assert_eq!(data["changes"]["pendingCount"], -100.0);
    }

    #[tokio::test]
    async fn comparison_none_omits_previous() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!(
                "{}?startDate=2023-01-01&endDate=2023-01-31&comparison=none",
                routes::METRICS_SUMMARY
            ))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["data"]["previous"].is_null());
        assert!(res.body["data"]["changes"].is_null());
        assert_eq!(res.body["data"]["current"]["totalReviews"], 0);
    }

    #[tokio::test]
    async fn last_year_comparison() {
        let app = TestApp::spawn().await;
        app.insert_review_at(utc("2022-03-10T10:00:00Z"), 4, ReviewStatus::Approved)
            .await;

        let res = app
            .get(&format!(
                "{}?startDate=2023-03-01&endDate=2023-03-31&comparison=last_year",
                routes::METRICS_SUMMARY
            ))
            .await;

        let data = &res.body["data"];
        assert_eq!(data["previous"]["totalReviews"], 1);
        assert_eq!(data["comparisonPeriod"]["startDate"], "2022-03-01");
        assert_eq!(data["changes"]["totalReviews"], -100.0);
    }

    #[tokio::test]
    async fn unknown_comparison_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!("{}?comparison=quarterly", routes::METRICS_SUMMARY))
            .await;

        assert_eq!(res.status, 400);
    }
}
