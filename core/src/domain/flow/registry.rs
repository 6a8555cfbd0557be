use crate::domain::{
    common::entities::app_errors::CoreError,
    flow::entities::{Capability, Flow},
    schema::{
        LegacyTextSuggestion, RateOutfitInput, RateOutfitOutput, StructuredPaletteSuggestion,
        SuggestHairstyleInput, SuggestHairstyleOutput, SuggestOutfitFromPhotoInput,
        SuggestOutfitInput,
    },
};

const RATE_OUTFIT_TEMPLATE: &str = r#"You are a professional fashion stylist. You will be provided with a photo of an outfit.

You will rate the outfit on a scale of 1 to 10, and provide detailed feedback on the outfit.

Here is the photo of the outfit:

{{media url=photoDataUri}}
"#;

const SUGGEST_OUTFIT_TEMPLATE: &str = r#"You are a personal stylist. Suggest an outfit and color combinations based on the user's skin tone, face shape, body shape and gender.

Skin Tone: {{{skinTone}}}
Face Shape: {{{faceShape}}}
Body Shape: {{{bodyShape}}}
Gender: {{{gender}}}

Output your response by suggesting an outfit and a color combination for this person.
"#;

const SUGGEST_OUTFIT_FROM_PHOTO_TEMPLATE: &str = r#"You are a personal stylist. Analyze the provided photo to determine the person's skin tone, face shape, and body shape. Then, suggest an outfit and color combinations that would suit them.

Photo: {{media url=photoDataUri}}

Provide a color palette with 5 hex codes.
Also, provide outfit suggestions broken down into top, bottom, and wearables (e.g., sunglasses, watch).
"#;

const SUGGEST_HAIRSTYLE_TEMPLATE: &str = r#"You are an expert hairstylist. Analyze the face in the provided photo and determine the person's face shape.

Gender: {{{gender}}}
Photo: {{media url=photoDataUri}}

Identify the face shape, then suggest 3 to 5 hairstyles for a {{gender}} person that flatter it, best match first.
Only include reference photo URLs if they point to real, publicly reachable images.
"#;

/// Every flow the application exposes. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct FlowRegistry {
    pub rate_outfit: Flow<RateOutfitInput, RateOutfitOutput>,
    pub suggest_outfit: Flow<SuggestOutfitInput, LegacyTextSuggestion>,
    pub suggest_outfit_from_photo: Flow<SuggestOutfitFromPhotoInput, StructuredPaletteSuggestion>,
    pub suggest_hairstyle: Flow<SuggestHairstyleInput, SuggestHairstyleOutput>,
}

impl FlowRegistry {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            rate_outfit: Flow::new(Capability::RateOutfit, RATE_OUTFIT_TEMPLATE)?,
            suggest_outfit: Flow::new(
                Capability::SuggestOutfitFromAttributes,
                SUGGEST_OUTFIT_TEMPLATE,
            )?,
            suggest_outfit_from_photo: Flow::new(
                Capability::SuggestOutfitFromPhoto,
                SUGGEST_OUTFIT_FROM_PHOTO_TEMPLATE,
            )?,
            suggest_hairstyle: Flow::new(
                Capability::SuggestHairstyle,
                SUGGEST_HAIRSTYLE_TEMPLATE,
            )?,
        })
    }

    pub fn flow_names(&self) -> Vec<&'static str> {
        Capability::ALL.iter().map(Capability::flow_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bundled_templates_match_their_input_schemas() {
        let registry = FlowRegistry::new().expect("bundled flows are valid");

        assert_eq!(
            registry.suggest_hairstyle.template().placeholders(),
            vec!["gender", "photoDataUri", "gender"]
        );
        assert_eq!(
            registry.suggest_outfit.template().placeholders(),
            vec!["skinTone", "faceShape", "bodyShape", "gender"]
        );
        assert_eq!(registry.flow_names().len(), 4);
    }

    #[test]
    fn photo_suggestion_response_schema_describes_the_palette() {
        let registry = FlowRegistry::new().unwrap();

        let schema = registry.suggest_outfit_from_photo.response_schema();

        assert_eq!(
            schema["description"],
            "A color palette and outfit pieces derived from a photo."
        );
        assert_eq!(schema["properties"]["colorPalette"]["type"], "array");
        assert_eq!(
            schema["properties"]["outfitSuggestion"]["required"],
            serde_json::json!(["top", "bottom", "wearables"])
        );
    }
}
