use serde_json::Value;

use crate::domain::flow::entities::Capability;

/// One piece of a rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    /// Inline media the backend resolves itself; never flattened into text.
    Media { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub capability: Capability,
    pub parts: Vec<PromptPart>,
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                PromptPart::Text(text) => Some(text.as_str()),
                PromptPart::Media { .. } => None,
            })
            .collect()
    }

    pub fn media_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, PromptPart::Media { .. }))
            .count()
    }
}
