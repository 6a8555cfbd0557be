use super::handlers::{
    rate_outfit::{__path_rate_outfit, rate_outfit},
    suggest_hairstyle::{__path_suggest_hairstyle, suggest_hairstyle},
    suggest_outfit::{__path_suggest_outfit, suggest_outfit},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use stylebuddy_core::domain::action::helpers::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(rate_outfit, suggest_outfit, suggest_hairstyle))]
pub struct ActionApiDoc;

pub fn action_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/actions/rate-outfit", state.args.server.root_path),
            post(rate_outfit),
        )
        .route(
            &format!("{}/actions/suggest-outfit", state.args.server.root_path),
            post(suggest_outfit),
        )
        .route(
            &format!("{}/actions/suggest-hairstyle", state.args.server.root_path),
            post(suggest_hairstyle),
        )
        // Oversized images must reach the action so it can report the field.
        .layer(DefaultBodyLimit::max(2 * MAX_IMAGE_SIZE))
}
