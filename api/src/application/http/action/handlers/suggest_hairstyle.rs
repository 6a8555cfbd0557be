use axum::extract::{Multipart, State};
use stylebuddy_core::domain::{
    action::{ActionEnvelope, ActionService},
    schema::SuggestHairstyleOutput,
};

use crate::application::http::{
    action::form::{SuggestHairstyleForm, read_form},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/suggest-hairstyle",
    tag = "actions",
    summary = "Suggest hairstyles",
    description = "Detects the face shape in the uploaded photo and suggests flattering hairstyles.",
    request_body(content = SuggestHairstyleForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ActionEnvelope<SuggestHairstyleOutput>),
        (status = 400, description = "Unreadable multipart body")
    ),
)]
pub async fn suggest_hairstyle(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<ActionEnvelope<SuggestHairstyleOutput>>, ApiError> {
    let form = read_form(multipart).await?;

    Ok(Response::OK(
        state.service.suggest_hairstyle_action(form).await,
    ))
}
