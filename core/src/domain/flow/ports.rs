use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    flow::{entities::InvocationResult, value_objects::GenerationRequest},
    schema::{
        LegacyTextSuggestion, RateOutfitOutput, StructuredPaletteSuggestion,
        SuggestHairstyleOutput,
    },
};

/// Model backend. Returns the raw JSON text the model produced.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// One validated operation per capability. Each call makes at most one backend request.
#[cfg_attr(test, mockall::automock)]
pub trait FlowService: Send + Sync {
    fn rate_outfit(
        &self,
        raw_input: Value,
    ) -> impl Future<Output = InvocationResult<RateOutfitOutput>> + Send;

    fn suggest_outfit(
        &self,
        raw_input: Value,
    ) -> impl Future<Output = InvocationResult<LegacyTextSuggestion>> + Send;

    fn suggest_outfit_from_photo(
        &self,
        raw_input: Value,
    ) -> impl Future<Output = InvocationResult<StructuredPaletteSuggestion>> + Send;

    fn suggest_hairstyle(
        &self,
        raw_input: Value,
    ) -> impl Future<Output = InvocationResult<SuggestHairstyleOutput>> + Send;
}
