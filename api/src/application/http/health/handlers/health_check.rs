use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub flows: Vec<String>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness",
    description = "Reports the service as up along with the registered flows.",
    responses(
        (status = 200, body = HealthResponse)
    ),
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Response<HealthResponse>, ApiError> {
    let flows = state
        .service
        .registry()
        .flow_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Response::OK(HealthResponse {
        status: "ok".to_string(),
        flows,
    }))
}
