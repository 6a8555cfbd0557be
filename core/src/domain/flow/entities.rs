use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    flow::{template::PromptTemplate, value_objects::PromptPart},
    schema::{Contract, FieldErrors, ObjectSchema},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    RateOutfit,
    SuggestOutfitFromAttributes,
    SuggestOutfitFromPhoto,
    SuggestHairstyle,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::RateOutfit,
        Capability::SuggestOutfitFromAttributes,
        Capability::SuggestOutfitFromPhoto,
        Capability::SuggestHairstyle,
    ];

    pub fn flow_name(&self) -> &'static str {
        match self {
            Capability::RateOutfit => "rateOutfitFlow",
            Capability::SuggestOutfitFromAttributes => "suggestOutfitFlow",
            Capability::SuggestOutfitFromPhoto => "suggestOutfitFromPhotoFlow",
            Capability::SuggestHairstyle => "suggestHairstyleFlow",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flow_name())
    }
}

/// Outcome of a failed flow invocation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlowError {
    /// The caller's input did not satisfy the input schema. The model was not contacted.
    #[error("Input failed validation: {0}")]
    Validation(FieldErrors),

    /// The backend call failed or returned something that did not satisfy the output schema.
    #[error("Invocation failed: {0}")]
    Invocation(String),
}

impl From<CoreError> for FlowError {
    fn from(error: CoreError) -> Self {
        FlowError::Invocation(error.to_string())
    }
}

pub type InvocationResult<T> = Result<T, FlowError>;

/// A prompt template bound to its input and output contracts.
#[derive(Debug, Clone)]
pub struct Flow<I, O> {
    capability: Capability,
    template: PromptTemplate,
    input_schema: ObjectSchema,
    output_schema: ObjectSchema,
    response_schema: Value,
    _contract: PhantomData<fn(I) -> O>,
}

impl<I, O> Flow<I, O>
where
    I: Contract,
    O: Contract,
{
    pub fn new(capability: Capability, template: &str) -> Result<Self, CoreError> {
        let input_schema = I::schema();
        let output_schema = O::schema();
        let template = PromptTemplate::parse(template)?;
        template.check_against(&input_schema)?;
        let response_schema = output_schema.to_response_schema();

        Ok(Self {
            capability,
            template,
            input_schema,
            output_schema,
            response_schema,
            _contract: PhantomData,
        })
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn name(&self) -> &'static str {
        self.capability.flow_name()
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn response_schema(&self) -> &Value {
        &self.response_schema
    }

    pub fn validate_input(&self, raw: Value) -> Result<I, FieldErrors> {
        I::parse(&self.input_schema, raw)
    }

    pub fn validate_output(&self, raw: Value) -> Result<O, FieldErrors> {
        O::parse(&self.output_schema, raw)
    }

    pub fn render(&self, input: &I) -> Result<Vec<PromptPart>, CoreError> {
        let bound = serde_json::to_value(input).map_err(|e| {
            tracing::error!("Failed to bind input for {}: {}", self.name(), e);
            CoreError::InternalServerError
        })?;
        self.template.render(&bound)
    }
}
