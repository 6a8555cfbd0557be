use super::handlers::{
    suggest_hairstyle::{__path_suggest_hairstyle, suggest_hairstyle},
    suggest_outfit_from_photo::{__path_suggest_outfit_from_photo, suggest_outfit_from_photo},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use stylebuddy_core::domain::action::helpers::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(suggest_outfit_from_photo, suggest_hairstyle))]
pub struct FlowApiDoc;

pub fn flow_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/suggest-outfit-from-photo", state.args.server.root_path),
            post(suggest_outfit_from_photo),
        )
        .route(
            &format!("{}/api/suggest-hairstyle", state.args.server.root_path),
            post(suggest_hairstyle),
        )
        // base64 inflates payloads by a third
        .layer(DefaultBodyLimit::max(2 * MAX_IMAGE_SIZE))
}
