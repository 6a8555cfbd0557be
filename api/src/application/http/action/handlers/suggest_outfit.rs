use axum::extract::{Multipart, State};
use stylebuddy_core::domain::{
    action::{ActionEnvelope, ActionService},
    schema::OutfitSuggestion,
};

use crate::application::http::{
    action::form::{SuggestOutfitForm, read_form},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/suggest-outfit",
    tag = "actions",
    summary = "Generate a style guide",
    description = "With `submissionType=manual` suggests an outfit from skin tone, face shape, body shape and gender. With `submissionType=photo` derives a five color palette and outfit pieces from `styleImage`.",
    request_body(content = SuggestOutfitForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ActionEnvelope<OutfitSuggestion>),
        (status = 400, description = "Unreadable multipart body")
    ),
)]
pub async fn suggest_outfit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<ActionEnvelope<OutfitSuggestion>>, ApiError> {
    let form = read_form(multipart).await?;

    Ok(Response::OK(state.service.suggest_outfit_action(form).await))
}
