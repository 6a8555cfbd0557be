use tracing::{info, warn};

use crate::{
    domain::{
        common::{StyleBuddyConfig, entities::app_errors::CoreError, services::Service},
        flow::registry::FlowRegistry,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type StyleBuddyService = Service<GeminiLLMClient>;

/// Builds the flow registry and the backend client once at startup.
pub fn create_service(config: StyleBuddyConfig) -> Result<StyleBuddyService, CoreError> {
    let registry = FlowRegistry::new()?;
    let llm_client = GeminiLLMClient::from_config(&config.llm);

    if config.llm.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, flow invocations will fail");
    }
    info!(
        flows = ?registry.flow_names(),
        model = %config.llm.gemini_model,
        "flow registry ready"
    );

    Ok(Service::new(llm_client, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::LLMConfig;

    #[test]
    fn starts_without_a_credential() {
        let service = create_service(StyleBuddyConfig {
            llm: LLMConfig::default(),
        })
        .unwrap();

        assert_eq!(service.registry().flow_names().len(), 4);
    }
}
