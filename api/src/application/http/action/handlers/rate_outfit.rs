use axum::extract::{Multipart, State};
use stylebuddy_core::domain::{
    action::{ActionEnvelope, ActionService},
    schema::RateOutfitOutput,
};

use crate::application::http::{
    action::form::{RateOutfitForm, read_form},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/rate-outfit",
    tag = "actions",
    summary = "Rate an outfit",
    description = "Rates the outfit in the uploaded photo from 1 to 10 with feedback. Field and backend failures are reported inside the envelope.",
    request_body(content = RateOutfitForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ActionEnvelope<RateOutfitOutput>),
        (status = 400, description = "Unreadable multipart body")
    ),
)]
pub async fn rate_outfit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<ActionEnvelope<RateOutfitOutput>>, ApiError> {
    let form = read_form(multipart).await?;

    Ok(Response::OK(state.service.rate_outfit_action(form).await))
}
