use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use stylebuddy_core::domain::action::helpers::{IMAGE_TOO_LARGE_MESSAGE, MAX_IMAGE_SIZE};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Base64 of the largest accepted image plus room for the `data:` header.
const MAX_DATA_URI_LENGTH: usize = MAX_IMAGE_SIZE.div_ceil(3) * 4 + 256;

// Members stay untyped so the flow's input schema reports type and shape
// errors per field.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutfitFromPhotoValidator {
    #[validate(custom(function = "within_image_size"))]
    #[schema(value_type = String, example = "data:image/jpeg;base64,/9j/4AAQSkZJRg==")]
    pub photo_data_uri: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestHairstyleValidator {
    #[validate(custom(function = "within_image_size"))]
    #[schema(value_type = String, example = "data:image/png;base64,iVBORw0KGgo=")]
    pub photo_data_uri: Option<Value>,
    #[schema(value_type = String, example = "female")]
    pub gender: Option<Value>,
}

fn within_image_size(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(uri) if uri.len() > MAX_DATA_URI_LENGTH => {
            Err(ValidationError::new("image_size").with_message(IMAGE_TOO_LARGE_MESSAGE.into()))
        }
        _ => Ok(()),
    }
}

impl SuggestOutfitFromPhotoValidator {
    pub fn into_input(self) -> Value {
        json!({ "photoDataUri": self.photo_data_uri })
    }
}

impl SuggestHairstyleValidator {
    pub fn into_input(self) -> Value {
        json!({ "photoDataUri": self.photo_data_uri, "gender": self.gender })
    }
}
