pub mod dashboard;
pub mod products;
pub mod reviews;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use common::types::Health;
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: u64,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    let (code, body) = backend::observability::encode_metrics();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

/// Build the full application router: health/metrics plus the admin API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let product_routes = Router::new()
        .route("/admin/products", get(products::list).post(products::create))
        .route("/admin/products/recent", get(products::recent))
        .route("/admin/products/count", get(products::count))
        .route(
            "/admin/products/by-id/:id",
            get(products::get).patch(products::update).delete(products::delete),
        );

    let review_routes = Router::new()
        .route("/admin/reviews", get(reviews::list))
        .route("/admin/reviews/latest", get(reviews::latest))
        .route("/admin/reviews/count", get(reviews::count))
        .route("/admin/reviews/average-rating", get(reviews::average_rating))
        .route("/admin/reviews/by-id/:id", delete(reviews::delete));

    public
        .merge(product_routes)
        .merge(review_routes)
        .route("/admin/dashboard", get(dashboard::summary))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
