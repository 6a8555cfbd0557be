use serde_json::Value;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::domain::{
    common::{generate_uuid_v7, services::Service},
    flow::{
        entities::{Flow, FlowError, InvocationResult},
        ports::{FlowService, LLMClient},
        value_objects::GenerationRequest,
    },
    schema::{
        Contract, LegacyTextSuggestion, RateOutfitOutput, StructuredPaletteSuggestion,
        SuggestHairstyleOutput,
    },
};

/// Validate, render, call the backend once, validate the response.
pub(crate) async fn invoke_flow<LLM, I, O>(
    llm_client: &LLM,
    flow: &Flow<I, O>,
    raw_input: Value,
) -> InvocationResult<O>
where
    LLM: LLMClient,
    I: Contract,
    O: Contract,
{
    let invocation_id = generate_uuid_v7();
    let span = info_span!("flow_invocation", flow = flow.name(), %invocation_id);

    async move {
        let input = flow.validate_input(raw_input).map_err(|errors| {
            debug!(%errors, "input rejected before model call");
            FlowError::Validation(errors)
        })?;

        let parts = flow.render(&input)?;

        let raw_response = llm_client
            .generate(GenerationRequest {
                capability: flow.capability(),
                parts,
                response_schema: flow.response_schema().clone(),
            })
            .await
            .map_err(|e| {
                error!(error = %e, "model backend call failed");
                FlowError::from(e)
            })?;

        let parsed: Value = serde_json::from_str(&raw_response).map_err(|e| {
            error!(error = %e, "model response is not JSON");
            FlowError::Invocation(format!("Failed to parse model response: {}", e))
        })?;

        let output = flow.validate_output(parsed).map_err(|errors| {
            warn!(%errors, "model response does not match the output schema");
            FlowError::Invocation(format!(
                "Model response does not match the output schema: {}",
                errors
            ))
        })?;

        debug!("flow completed");
        Ok(output)
    }
    .instrument(span)
    .await
}

impl<LLM> FlowService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn rate_outfit(&self, raw_input: Value) -> InvocationResult<RateOutfitOutput> {
        invoke_flow(self.llm_client.as_ref(), &self.registry.rate_outfit, raw_input).await
    }

    async fn suggest_outfit(&self, raw_input: Value) -> InvocationResult<LegacyTextSuggestion> {
        invoke_flow(
            self.llm_client.as_ref(),
            &self.registry.suggest_outfit,
            raw_input,
        )
        .await
    }

    async fn suggest_outfit_from_photo(
        &self,
        raw_input: Value,
    ) -> InvocationResult<StructuredPaletteSuggestion> {
        invoke_flow(
            self.llm_client.as_ref(),
            &self.registry.suggest_outfit_from_photo,
            raw_input,
        )
        .await
    }

    async fn suggest_hairstyle(
        &self,
        raw_input: Value,
    ) -> InvocationResult<SuggestHairstyleOutput> {
        invoke_flow(
            self.llm_client.as_ref(),
            &self.registry.suggest_hairstyle,
            raw_input,
        )
        .await
    }
}
