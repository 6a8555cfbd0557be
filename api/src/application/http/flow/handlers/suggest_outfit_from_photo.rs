use axum::extract::State;
use stylebuddy_core::domain::{flow::FlowService, schema::StructuredPaletteSuggestion};

use crate::application::http::{
    flow::validators::SuggestOutfitFromPhotoValidator,
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
    path = "/suggest-outfit-from-photo",
    tag = "flows",
    summary = "Suggest an outfit from a photo",
    description = "Runs the photo style flow on a data URI and returns a five color palette with outfit pieces.",
    request_body = SuggestOutfitFromPhotoValidator,
    responses(
        (status = 200, body = StructuredPaletteSuggestion),
        (status = 422, body = ApiErrorResponse, description = "Input does not match the flow schema"),
        (status = 502, body = ApiErrorResponse, description = "Model backend failure")
    ),
)]
pub async fn suggest_outfit_from_photo(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SuggestOutfitFromPhotoValidator>,
) -> Result<Response<StructuredPaletteSuggestion>, ApiError> {
    let suggestion = state
        .service
        .suggest_outfit_from_photo(payload.into_input())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(suggestion))
}
