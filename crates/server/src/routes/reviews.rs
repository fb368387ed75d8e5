use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::LimitQuery;
use models::Review;
use serde::Serialize;

use crate::errors::JsonApiError;
use crate::routes::CountBody;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct AverageRatingBody {
    pub average_rating: f64,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Review>>, JsonApiError> {
    Ok(Json(state.reviews.list_all().await?))
}

pub async fn latest(
    State(state): State<ServerState>,
    Query(q): Query<LimitQuery>,
) -> Result<Json<Vec<Review>>, JsonApiError> {
    Ok(Json(state.reviews.latest(q.resolve()).await?))
}

pub async fn count(State(state): State<ServerState>) -> Result<Json<CountBody>, JsonApiError> {
    let count = state.reviews.count().await?;
    Ok(Json(CountBody { count }))
}

pub async fn average_rating(State(state): State<ServerState>) -> Result<Json<AverageRatingBody>, JsonApiError> {
    let average_rating = state.reviews.average_rating().await?;
    Ok(Json(AverageRatingBody { average_rating }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.reviews.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
