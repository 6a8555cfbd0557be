use serde_json::json;
use tracing::{error, info};

use crate::domain::{
    action::{
        entities::{ActionEnvelope, FormSubmission, SubmissionType},
        helpers::{
            BODY_SHAPE_FIELD, FACE_IMAGE_FIELD, FACE_SHAPE_FIELD, HAIRSTYLES_MESSAGE,
            INVALID_FORM_MESSAGE, INVALID_SUBMISSION_TYPE_MESSAGE, OUTFIT_IMAGE_FIELD,
            OUTFIT_RATED_MESSAGE, PHOTO_DATA_URI_FIELD, SELECT_SUBMISSION_TYPE_MESSAGE,
            SKIN_TONE_FIELD, STYLE_GUIDE_MESSAGE, STYLE_IMAGE_FIELD, SUBMISSION_TYPE_FIELD,
            UNEXPECTED_ERROR_MESSAGE, check_gender, check_image, check_text, file_to_data_uri,
        },
        ports::ActionService,
    },
    common::services::Service,
    flow::{
        entities::{FlowError, InvocationResult},
        ports::{FlowService, LLMClient},
    },
    schema::{FieldErrors, OutfitSuggestion, RateOutfitOutput, SuggestHairstyleOutput},
};

/// Folds a flow outcome into an envelope. Schema errors on the generated data
/// URI are reported against the form field the image came from.
fn settle<T>(
    result: InvocationResult<T>,
    success_message: &str,
    image_field: Option<&str>,
) -> ActionEnvelope<T> {
    match result {
        Ok(output) => ActionEnvelope::success(success_message, output),
        Err(FlowError::Validation(errors)) => {
            let errors = match image_field {
                Some(field) => errors.rename(PHOTO_DATA_URI_FIELD, field),
                None => errors,
            };
            ActionEnvelope::invalid(INVALID_FORM_MESSAGE, errors)
        }
        Err(FlowError::Invocation(detail)) => {
            error!(detail = %detail, "flow invocation failed");
            ActionEnvelope::error(UNEXPECTED_ERROR_MESSAGE)
        }
    }
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    async fn suggest_outfit_from_attributes(
        &self,
        form: &FormSubmission,
    ) -> ActionEnvelope<OutfitSuggestion> {
        let mut errors = FieldErrors::new();
        let skin_tone = check_text(form, SKIN_TONE_FIELD, "Skin tone is required.", &mut errors);
        let face_shape = check_text(form, FACE_SHAPE_FIELD, "Face shape is required.", &mut errors);
        let body_shape = check_text(form, BODY_SHAPE_FIELD, "Body shape is required.", &mut errors);
        let gender = check_gender(form, &mut errors);

        let (Some(skin_tone), Some(face_shape), Some(body_shape), Some(gender)) =
            (skin_tone, face_shape, body_shape, gender)
        else {
            return ActionEnvelope::invalid(INVALID_FORM_MESSAGE, errors);
        };

        let result = self
            .suggest_outfit(json!({
                "skinTone": skin_tone,
                "faceShape": face_shape,
                "bodyShape": body_shape,
                "gender": gender,
            }))
            .await;

        settle(result, STYLE_GUIDE_MESSAGE, None).map(OutfitSuggestion::LegacyText)
    }

    async fn suggest_outfit_from_upload(
        &self,
        form: &FormSubmission,
    ) -> ActionEnvelope<OutfitSuggestion> {
        let mut errors = FieldErrors::new();
        let Some(image) = check_image(form, STYLE_IMAGE_FIELD, &mut errors) else {
            return ActionEnvelope::invalid(INVALID_FORM_MESSAGE, errors);
        };

        let result = self
            .suggest_outfit_from_photo(json!({
                "photoDataUri": file_to_data_uri(image).to_string(),
            }))
            .await;

        settle(result, STYLE_GUIDE_MESSAGE, Some(STYLE_IMAGE_FIELD))
            .map(OutfitSuggestion::StructuredPalette)
    }
}

impl<LLM> ActionService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn rate_outfit_action(&self, form: FormSubmission) -> ActionEnvelope<RateOutfitOutput> {
        let mut errors = FieldErrors::new();
        let Some(image) = check_image(&form, OUTFIT_IMAGE_FIELD, &mut errors) else {
            return ActionEnvelope::invalid(INVALID_FORM_MESSAGE, errors);
        };

        info!(size = image.size(), mime_type = image.mime_type(), "rating outfit");
        let result = self
            .rate_outfit(json!({
                "photoDataUri": file_to_data_uri(image).to_string(),
            }))
            .await;

        settle(result, OUTFIT_RATED_MESSAGE, Some(OUTFIT_IMAGE_FIELD))
    }

    async fn suggest_outfit_action(
        &self,
        form: FormSubmission,
    ) -> ActionEnvelope<OutfitSuggestion> {
        let submission_type = form
            .field(SUBMISSION_TYPE_FIELD)
            .and_then(|value| value.parse::<SubmissionType>().ok());

        match submission_type {
            Some(SubmissionType::Manual) => self.suggest_outfit_from_attributes(&form).await,
            Some(SubmissionType::Photo) => self.suggest_outfit_from_upload(&form).await,
            None => ActionEnvelope::invalid(
                INVALID_SUBMISSION_TYPE_MESSAGE,
                FieldErrors::single(SUBMISSION_TYPE_FIELD, SELECT_SUBMISSION_TYPE_MESSAGE),
            ),
        }
    }

    async fn suggest_hairstyle_action(
        &self,
        form: FormSubmission,
    ) -> ActionEnvelope<SuggestHairstyleOutput> {
        let mut errors = FieldErrors::new();
        let image = check_image(&form, FACE_IMAGE_FIELD, &mut errors);
        let gender = check_gender(&form, &mut errors);

        let (Some(image), Some(gender)) = (image, gender) else {
            return ActionEnvelope::invalid(INVALID_FORM_MESSAGE, errors);
        };

        let result = self
            .suggest_hairstyle(json!({
                "photoDataUri": file_to_data_uri(image).to_string(),
                "gender": gender,
            }))
            .await;

        settle(result, HAIRSTYLES_MESSAGE, Some(FACE_IMAGE_FIELD))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use serde_json::json;

    use super::*;
    use crate::domain::{
        action::{
            entities::{ActionStatus, UploadedFile},
            helpers::{GENDER_FIELD, IMAGE_REQUIRED_MESSAGE, IMAGE_TYPE_MESSAGE},
        },
        common::entities::app_errors::CoreError,
        flow::{ports::MockLLMClient, registry::FlowRegistry, value_objects::GenerationRequest},
    };

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    struct CannedLLMClient {
        reply: Result<String, CoreError>,
        calls: Arc<AtomicUsize>,
    }

    impl LLMClient for CannedLLMClient {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn canned_service(
        reply: Result<String, CoreError>,
    ) -> (Service<CannedLLMClient>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = CannedLLMClient {
            reply,
            calls: Arc::clone(&calls),
        };
        (Service::new(client, FlowRegistry::new().unwrap()), calls)
    }

    fn silent_service() -> Service<MockLLMClient> {
        let mut client = MockLLMClient::new();
        client.expect_generate().never();
        Service::new(client, FlowRegistry::new().unwrap())
    }

    #[tokio::test]
    async fn rates_a_valid_jpeg() {
        let (service, calls) = canned_service(Ok(
            json!({ "rating": 7.5, "feedback": "Great layering, try a bolder belt." }).to_string(),
        ));
        let form = FormSubmission::new()
            .with_file(OUTFIT_IMAGE_FIELD, UploadedFile::new("image/jpeg", JPEG_BYTES));

        let envelope = service.rate_outfit_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Success);
        assert_eq!(envelope.message.as_deref(), Some(OUTFIT_RATED_MESSAGE));
        let result = envelope.result.unwrap();
        assert!((1.0..=10.0).contains(&result.rating));
        assert!(!result.feedback.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_outfit_image_is_rejected_without_model_call() {
        let form = FormSubmission::new()
            .with_file(OUTFIT_IMAGE_FIELD, UploadedFile::new("image/jpeg", Vec::<u8>::new()));

        let envelope = silent_service().rate_outfit_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Error);
        assert_eq!(envelope.message.as_deref(), Some(INVALID_FORM_MESSAGE));
        let errors = envelope.errors.unwrap();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![OUTFIT_IMAGE_FIELD]);
        assert_eq!(errors.get(OUTFIT_IMAGE_FIELD).unwrap()[0], IMAGE_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn manual_style_guide_returns_text_suggestion() {
        let (service, _) = canned_service(Ok(json!({
            "outfitSuggestion": "A belted wrap dress with block heels.",
            "colorSuggestion": "Soft pastels and cool jewel tones."
        })
        .to_string()));
        let form = FormSubmission::new()
            .with_field(SUBMISSION_TYPE_FIELD, "manual")
            .with_field(SKIN_TONE_FIELD, "Fair")
            .with_field(FACE_SHAPE_FIELD, "Oval")
            .with_field(BODY_SHAPE_FIELD, "Hourglass")
            .with_field(GENDER_FIELD, "female");

        let envelope = service.suggest_outfit_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Success);
        match envelope.result.unwrap() {
            OutfitSuggestion::LegacyText(suggestion) => {
                assert!(!suggestion.color_suggestion.is_empty());
                assert!(!suggestion.outfit_suggestion.is_empty());
            }
            other => panic!("expected legacy text suggestion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn manual_style_guide_reports_each_missing_field() {
        let form = FormSubmission::new()
            .with_field(SUBMISSION_TYPE_FIELD, "manual")
            .with_field(SKIN_TONE_FIELD, "Fair")
            .with_field(GENDER_FIELD, "nonbinary");

        let envelope = silent_service().suggest_outfit_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Error);
        assert_eq!(
            envelope.errors.unwrap().fields().collect::<Vec<_>>(),
            vec![BODY_SHAPE_FIELD, FACE_SHAPE_FIELD, GENDER_FIELD]
        );
    }

    #[tokio::test]
    async fn photo_style_guide_returns_structured_palette() {
        let (service, _) = canned_service(Ok(json!({
            "colorPalette": ["#1B3A4B", "#F2E8CF", "#A7C957", "#6A994E", "#BC4749"],
            "outfitSuggestion": {
                "top": "Olive overshirt",
                "bottom": "Cream chinos",
                "wearables": "Tortoiseshell sunglasses"
            }
        })
        .to_string()));
        let form = FormSubmission::new()
            .with_field(SUBMISSION_TYPE_FIELD, "photo")
            .with_file(STYLE_IMAGE_FIELD, UploadedFile::new("image/png", PNG_BYTES));

        let envelope = service.suggest_outfit_action(form).await;

        match envelope.result {
            Some(OutfitSuggestion::StructuredPalette(suggestion)) => {
                assert_eq!(suggestion.color_palette.len(), 5);
                assert_eq!(suggestion.outfit_suggestion.top, "Olive overshirt");
            }
            other => panic!("expected palette suggestion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn photo_style_guide_rejects_non_images() {
        let form = FormSubmission::new()
            .with_field(SUBMISSION_TYPE_FIELD, "photo")
            .with_file(STYLE_IMAGE_FIELD, UploadedFile::new("application/pdf", "%PDF-1.7"));

        let envelope = silent_service().suggest_outfit_action(form).await;

        assert_eq!(
            envelope.errors.unwrap().get(STYLE_IMAGE_FIELD).unwrap()[0],
            IMAGE_TYPE_MESSAGE
        );
    }

    #[tokio::test]
    async fn unknown_submission_type_is_rejected() {
        let form = FormSubmission::new().with_field(SUBMISSION_TYPE_FIELD, "bogus");

        let envelope = silent_service().suggest_outfit_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Error);
        assert_eq!(envelope.message.as_deref(), Some(INVALID_SUBMISSION_TYPE_MESSAGE));
        assert_eq!(
            envelope.errors.unwrap().get(SUBMISSION_TYPE_FIELD).unwrap()[0],
            SELECT_SUBMISSION_TYPE_MESSAGE
        );
    }

    #[tokio::test]
    async fn suggests_hairstyles_for_a_png() {
        let (service, _) = canned_service(Ok(json!({
            "faceShape": "Square",
            "suggestedHairstyles": ["Textured crop", "Side part", "Buzz cut"]
        })
        .to_string()));
        let form = FormSubmission::new()
            .with_field(GENDER_FIELD, "male")
            .with_file(FACE_IMAGE_FIELD, UploadedFile::new("image/png", PNG_BYTES));

        let envelope = service.suggest_hairstyle_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Success);
        assert_eq!(envelope.message.as_deref(), Some(HAIRSTYLES_MESSAGE));
        let result = envelope.result.unwrap();
        assert_eq!(result.face_shape, "Square");
        assert_eq!(result.suggested_hairstyles[0], "Textured crop");
    }

    #[tokio::test]
    async fn backend_failure_becomes_generic_error() {
        let (service, calls) = canned_service(Err(CoreError::ExternalServiceError(
            "LLM API returned error: 401".to_string(),
        )));
        let form = FormSubmission::new()
            .with_field(GENDER_FIELD, "female")
            .with_file(FACE_IMAGE_FIELD, UploadedFile::new("image/png", PNG_BYTES));

        let envelope = service.suggest_hairstyle_action(form).await;

        assert_eq!(envelope.status, ActionStatus::Error);
        assert_eq!(envelope.message.as_deref(), Some(UNEXPECTED_ERROR_MESSAGE));
        assert!(envelope.errors.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn schema_errors_on_the_data_uri_point_at_the_form_field() {
        let errors = FieldErrors::single(PHOTO_DATA_URI_FIELD, "Invalid data URI");

        let envelope: ActionEnvelope<()> = settle(
            Err(FlowError::Validation(errors)),
            OUTFIT_RATED_MESSAGE,
            Some(OUTFIT_IMAGE_FIELD),
        );

        assert!(envelope.errors.unwrap().get(OUTFIT_IMAGE_FIELD).is_some());
    }
}
