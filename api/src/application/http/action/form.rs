use axum::extract::Multipart;
use serde::{Deserialize, Serialize};
use stylebuddy_core::domain::action::{FormSubmission, UploadedFile};
use tracing::debug;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Reads every multipart part into a [`FormSubmission`]. Parts carrying a file
/// name or content type are files, the rest are text fields. Field rules are
/// left to the boundary action.
pub async fn read_form(mut multipart: Multipart) -> Result<FormSubmission, ApiError> {
    let mut form = FormSubmission::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name.is_empty() {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        if file_name.is_some() || content_type.is_some() {
            let data = field.bytes().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read file {}: {}", name, e))
            })?;
            debug!(field = %name, size = data.len(), "received upload");

            form.insert_file(
                name,
                UploadedFile {
                    file_name,
                    content_type,
                    data,
                },
            );
        } else {
            let value = field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read field {}: {}", name, e))
            })?;
            form.insert_field(name, value);
        }
    }

    Ok(form)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateOutfitForm {
    #[schema(value_type = String, format = Binary)]
    pub outfit_image: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutfitForm {
    #[schema(example = "manual")]
    pub submission_type: String,
    pub skin_tone: Option<String>,
    pub face_shape: Option<String>,
    pub body_shape: Option<String>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub style_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestHairstyleForm {
    #[schema(value_type = String, format = Binary)]
    pub face_image: String,
    #[schema(example = "male")]
    pub gender: String,
}
