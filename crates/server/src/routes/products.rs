use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::LimitQuery;
use models::{NewProduct, Product, ProductPatch};
use service::errors::FormError;

use crate::errors::JsonApiError;
use crate::routes::CountBody;
use crate::state::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.products.list_all().await?))
}

pub async fn recent(
    State(state): State<ServerState>,
    Query(q): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.products.recent(q.resolve()).await?))
}

pub async fn count(State(state): State<ServerState>) -> Result<Json<CountBody>, JsonApiError> {
    let count = state.products.count().await?;
    Ok(Json(CountBody { count }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.get_by_id(&id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    if input.id.trim().is_empty() {
        return Err(FormError::Required("id").into());
    }
    if input.title.trim().is_empty() {
        return Err(FormError::Required("title").into());
    }
    let stored = state.products.create(&input).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, JsonApiError> {
    if patch.is_empty() {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("no fields to update".into())));
    }
    Ok(Json(state.products.update(&id, &patch).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.products.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
