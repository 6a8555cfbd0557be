use super::handlers::get_messages::{__path_get_messages, get_messages};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_messages))]
pub struct LocaleApiDoc;

pub fn locale_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/messages/{{locale}}", state.args.server.root_path),
        get(get_messages),
    )
}
