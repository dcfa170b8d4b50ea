use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Every API route, relative to the `/api` prefix.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(review_routes())
        .merge(metrics_routes())
        .merge(usage_routes())
        .merge(export_routes())
        .routes(routes!(handlers::health::health))
}

fn review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::reviews::list_reviews,
            handlers::reviews::create_review
        ))
        .routes(routes!(
            handlers::reviews::get_review,
            handlers::reviews::update_review,
            handlers::reviews::delete_review
        ))
}

fn metrics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::metrics::get_timeseries))
        .routes(routes!(handlers::metrics::get_summary))
}

fn usage_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::usage::list_details))
        .routes(routes!(handlers::usage::get_usage_summary))
}

fn export_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::export::export_negotiated))
        .routes(routes!(handlers::export::export_csv))
        .routes(routes!(handlers::export::export_json))
        .routes(routes!(handlers::export::get_export_summary))
}
