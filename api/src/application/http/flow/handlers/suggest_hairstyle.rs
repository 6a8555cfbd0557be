use axum::extract::State;
use stylebuddy_core::domain::{flow::FlowService, schema::SuggestHairstyleOutput};

use crate::application::http::{
    flow::validators::SuggestHairstyleValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/suggest-hairstyle",
    tag = "flows",
    summary = "Suggest hairstyles from a photo",
    description = "Runs the hairstyle flow on a data URI and a gender.",
    request_body = SuggestHairstyleValidator,
    responses(
        (status = 200, body = SuggestHairstyleOutput),
        (status = 422, body = ApiErrorResponse, description = "Input does not match the flow schema"),
        (status = 502, body = ApiErrorResponse, description = "Model backend failure")
    ),
)]
pub async fn suggest_hairstyle(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SuggestHairstyleValidator>,
) -> Result<Response<SuggestHairstyleOutput>, ApiError> {
    let suggestion = state
        .service
        .suggest_hairstyle(payload.into_input())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(suggestion))
}
