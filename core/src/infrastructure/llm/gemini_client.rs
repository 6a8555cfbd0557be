use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    flow::{
        ports::LLMClient,
        value_objects::{GenerationRequest, PromptPart},
    },
};

/// Gemini `generateContent` REST client. The credential is optional at
/// construction; a missing key fails the first call instead of startup.
#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl From<PromptPart> for Part {
    fn from(part: PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => Part::Text { text },
            PromptPart::Media { mime_type, data } => Part::InlineData {
                inline_data: InlineData { mime_type, data },
            },
        }
    }
}

impl GeminiRequest {
    fn from_generation(request: GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: request.parts.into_iter().map(Part::from).collect(),
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema,
            }),
        }
    }
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, CoreError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(CoreError::ExternalServiceError(format!(
                "Prompt blocked by LLM: {}",
                reason
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(CoreError::ExternalServiceError(format!(
                "Empty response from LLM (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

impl GeminiLLMClient {
    pub fn new(api_key: Option<String>, model_name: String, base_url: String) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("Gemini API key is not configured");
            CoreError::MissingCredential
        })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response.into_text()
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, CoreError> {
        debug!(
            capability = %request.capability,
            model = %self.model_name,
            media_parts = request.media_count(),
            "calling Gemini"
        );

        self.call_gemini_api(GeminiRequest::from_generation(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::flow::entities::Capability;

    #[test]
    fn media_parts_become_inline_data() {
        let request = GeminiRequest::from_generation(GenerationRequest {
            capability: Capability::RateOutfit,
            parts: vec![
                PromptPart::Text("Rate this:".to_string()),
                PromptPart::Media {
                    mime_type: "image/png".to_string(),
                    data: "iVBORw==".to_string(),
                },
            ],
            response_schema: json!({ "type": "object" }),
        });

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["parts"][0], json!({ "text": "Rate this:" }));
        assert_eq!(
            body["contents"][0]["parts"][1],
            json!({ "inline_data": { "mime_type": "image/png", "data": "iVBORw==" } })
        );
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"rating\":" }, { "text": " 7}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text().unwrap(), "{\"rating\": 7}");
    }

    #[test]
    fn blocked_and_empty_responses_are_errors() {
        let blocked: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let empty: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();

        assert!(matches!(
            blocked.into_text(),
            Err(CoreError::ExternalServiceError(ref m)) if m.contains("SAFETY")
        ));
        assert!(matches!(
            empty.into_text(),
            Err(CoreError::ExternalServiceError(ref m)) if m.contains("MAX_TOKENS")
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = GeminiLLMClient::new(
            Some("  ".to_string()),
            "gemini-2.0-flash".to_string(),
            "http://127.0.0.1:9".to_string(),
        );

        let result = client
            .generate(GenerationRequest {
                capability: Capability::SuggestHairstyle,
                parts: vec![PromptPart::Text("hello".to_string())],
                response_schema: json!({}),
            })
            .await;

        assert_eq!(result, Err(CoreError::MissingCredential));
    }
}
