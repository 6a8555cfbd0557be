use axum::extract::Path;
use stylebuddy_core::domain::locale::{Locale, MessageBundle};

use crate::application::http::server::api_entities::{api_error::ApiError, response::Response};

#[utoipa::path(
    get,
    path = "/{locale}",
    tag = "messages",
    summary = "Get page messages",
    description = "Returns the page title and description for a locale. Unknown locales fall back to English.",
    responses(
        (status = 200, body = MessageBundle)
    ),
    params(
        ("locale" = String, Path, description = "Locale tag such as en, es or es-MX"),
    ),
)]
pub async fn get_messages(Path(locale): Path<String>) -> Result<Response<MessageBundle>, ApiError> {
    Ok(Response::OK(Locale::resolve(&locale).bundle()))
}
