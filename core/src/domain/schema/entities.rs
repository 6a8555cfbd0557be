use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::schema::{
    definition::{FieldKind, FieldSpec, ObjectSchema, ROOT_PATH},
    value_objects::{FieldErrors, Gender},
};

const PHOTO_OF_OUTFIT: &str = "A photo of the outfit, as a data URI that must include a MIME type and use Base64 encoding.";
const PHOTO_OF_PERSON: &str = "A photo of a person, as a data URI that must include a MIME type and use Base64 encoding.";
const PHOTO_OF_FACE: &str = "A clear photo of the person's face, as a data URI that must include a MIME type and use Base64 encoding.";

/// A typed value bound to a declarative [`ObjectSchema`].
pub trait Contract: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn schema() -> ObjectSchema;

    /// Validates an untyped value against `schema` and converts it.
    fn parse(schema: &ObjectSchema, raw: Value) -> Result<Self, FieldErrors> {
        schema.validate(&raw)?;
        serde_json::from_value(raw).map_err(|e| FieldErrors::single(ROOT_PATH, e.to_string()))
    }
}

fn text(min_length: usize) -> FieldKind {
    FieldKind::Text { min_length }
}

fn gender_field() -> FieldSpec {
    FieldSpec::required(
        "gender",
        FieldKind::Enum(Gender::VALUES),
        "The person's gender, either male or female.",
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateOutfitInput {
    pub photo_data_uri: String,
}

impl Contract for RateOutfitInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![FieldSpec::required(
            "photoDataUri",
            FieldKind::DataUri,
            PHOTO_OF_OUTFIT,
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateOutfitOutput {
    pub rating: f64,
    pub feedback: String,
}

impl Contract for RateOutfitOutput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required(
                "rating",
                FieldKind::Number {
                    min: Some(1.0),
                    max: Some(10.0),
                },
                "The overall rating of the outfit, from 1 to 10.",
            ),
            FieldSpec::required("feedback", text(1), "Detailed feedback on the outfit."),
        ])
        .describe("An outfit rating with feedback.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutfitInput {
    pub skin_tone: String,
    pub face_shape: String,
    pub body_shape: String,
    pub gender: Gender,
}

impl Contract for SuggestOutfitInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required(
                "skinTone",
                text(1),
                "The user provided skin tone (e.g., fair, medium, dark).",
            ),
            FieldSpec::required(
                "faceShape",
                text(1),
                "The user provided face shape (e.g., round, oval, square).",
            ),
            FieldSpec::required(
                "bodyShape",
                text(1),
                "The user provided body shape (e.g., apple, pear, rectangle).",
            ),
            gender_field(),
        ])
    }
}

/// Plain-text outfit suggestion, produced from user supplied attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTextSuggestion {
    pub outfit_suggestion: String,
    pub color_suggestion: String,
}

impl Contract for LegacyTextSuggestion {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required(
                "outfitSuggestion",
                text(1),
                "Outfit suggestions based on the provided characteristics.",
            ),
            FieldSpec::required(
                "colorSuggestion",
                text(1),
                "Color suggestions based on the provided characteristics.",
            ),
        ])
        .describe("An outfit and color suggestion in free text.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestOutfitFromPhotoInput {
    pub photo_data_uri: String,
}

impl Contract for SuggestOutfitFromPhotoInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![FieldSpec::required(
            "photoDataUri",
            FieldKind::DataUri,
            PHOTO_OF_PERSON,
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OutfitPieces {
    pub top: String,
    pub bottom: String,
    pub wearables: String,
}

/// Palette plus a top/bottom/wearables breakdown, produced from a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPaletteSuggestion {
    pub color_palette: Vec<String>,
    pub outfit_suggestion: OutfitPieces,
}

impl Contract for StructuredPaletteSuggestion {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required(
                "colorPalette",
                FieldKind::Array {
                    items: Box::new(FieldKind::HexColor),
                    min_items: 1,
                },
                "An array of hex color codes for the suggested color palette.",
            ),
            FieldSpec::required(
                "outfitSuggestion",
                FieldKind::Object(ObjectSchema::new(vec![
                    FieldSpec::required("top", text(1), "Suggestion for the top wear."),
                    FieldSpec::required("bottom", text(1), "Suggestion for the bottom wear."),
                    FieldSpec::required(
                        "wearables",
                        text(1),
                        "Suggestions for accessories like sunglasses, watches, etc.",
                    ),
                ])),
                "Outfit suggestions categorized by top, bottom, and wearables.",
            ),
        ])
        .describe("A color palette and outfit pieces derived from a photo.")
    }
}

/// The two outfit suggestion shapes. Which one a caller gets is fixed by the
/// capability it invoked, never inferred from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum OutfitSuggestion {
    LegacyText(LegacyTextSuggestion),
    StructuredPalette(StructuredPaletteSuggestion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestHairstyleInput {
    pub photo_data_uri: String,
    pub gender: Gender,
}

impl Contract for SuggestHairstyleInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required("photoDataUri", FieldKind::DataUri, PHOTO_OF_FACE),
            gender_field(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestHairstyleOutput {
    pub face_shape: String,
    pub suggested_hairstyles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_photos: Option<Vec<String>>,
}

impl Contract for SuggestHairstyleOutput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required(
                "faceShape",
                text(1),
                "The detected face shape (e.g., oval, round, square, heart).",
            ),
            FieldSpec::required(
                "suggestedHairstyles",
                FieldKind::Array {
                    items: Box::new(text(1)),
                    min_items: 1,
                },
                "Hairstyle names that suit the face shape, best match first.",
            ),
            FieldSpec::optional(
                "referencePhotos",
                FieldKind::Array {
                    items: Box::new(text(1)),
                    min_items: 0,
                },
                "Optional image URLs illustrating the suggested hairstyles.",
            ),
        ])
        .describe("Face shape and hairstyle suggestions.")
    }
}
