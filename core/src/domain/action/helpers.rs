use crate::domain::{
    action::entities::{FormSubmission, UploadedFile},
    schema::{DataUri, FieldErrors, Gender},
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const OUTFIT_IMAGE_FIELD: &str = "outfitImage";
pub const STYLE_IMAGE_FIELD: &str = "styleImage";
pub const FACE_IMAGE_FIELD: &str = "faceImage";
pub const SUBMISSION_TYPE_FIELD: &str = "submissionType";
pub const SKIN_TONE_FIELD: &str = "skinTone";
pub const FACE_SHAPE_FIELD: &str = "faceShape";
pub const BODY_SHAPE_FIELD: &str = "bodyShape";
pub const GENDER_FIELD: &str = "gender";

pub const PHOTO_DATA_URI_FIELD: &str = "photoDataUri";

pub const INVALID_FORM_MESSAGE: &str = "Invalid form data.";
pub const INVALID_SUBMISSION_TYPE_MESSAGE: &str = "Invalid submission type.";
pub const SELECT_SUBMISSION_TYPE_MESSAGE: &str = "Please select a valid submission type.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const OUTFIT_RATED_MESSAGE: &str = "Outfit rated successfully!";
pub const STYLE_GUIDE_MESSAGE: &str = "Style guide generated!";
pub const HAIRSTYLES_MESSAGE: &str = "Hairstyles suggested!";

pub const IMAGE_REQUIRED_MESSAGE: &str = "An image is required.";
pub const IMAGE_TYPE_MESSAGE: &str = "Only image files are allowed.";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "Image must be 10 MB or smaller.";
pub const GENDER_REQUIRED_MESSAGE: &str = "Please select a gender.";

/// Presence, size and MIME checks on an uploaded image. Records at most one
/// message for the field.
pub fn check_image<'a>(
    form: &'a FormSubmission,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a UploadedFile> {
    let file = match form.file(field) {
        Some(file) if file.size() > 0 => file,
        _ => {
            errors.add(field, IMAGE_REQUIRED_MESSAGE);
            return None;
        }
    };

    if !file.mime_type().starts_with("image/") {
        errors.add(field, IMAGE_TYPE_MESSAGE);
        return None;
    }

    if file.size() > MAX_IMAGE_SIZE {
        errors.add(field, IMAGE_TOO_LARGE_MESSAGE);
        return None;
    }

    Some(file)
}

pub fn check_text(
    form: &FormSubmission,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match form.field(field).map(str::trim) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

pub fn check_gender(form: &FormSubmission, errors: &mut FieldErrors) -> Option<Gender> {
    let gender = form
        .field(GENDER_FIELD)
        .and_then(|value| value.parse::<Gender>().ok());

    if gender.is_none() {
        errors.add(GENDER_FIELD, GENDER_REQUIRED_MESSAGE);
    }
    gender
}

/// The one binary-to-text transform in the system.
pub fn file_to_data_uri(file: &UploadedFile) -> DataUri {
    DataUri::from_bytes(file.mime_type(), &file.data)
}
