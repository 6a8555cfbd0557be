use std::sync::Arc;

use crate::domain::flow::{ports::LLMClient, registry::FlowRegistry};

/// Shared service handle. The registry is built once at startup and only read afterwards.
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) registry: Arc<FlowRegistry>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, registry: FlowRegistry) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            registry: Arc::clone(&self.registry),
        }
    }
}
