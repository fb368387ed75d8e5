use axum::{extract::State, Json};
use service::{collect_metrics, DashboardMetrics};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// All four reads run together; any failure fails the whole response.
pub async fn summary(State(state): State<ServerState>) -> Result<Json<DashboardMetrics>, JsonApiError> {
    Ok(Json(collect_metrics(&state.products, &state.reviews).await?))
}
