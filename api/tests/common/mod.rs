#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};
use stylebuddy_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use test_context::AsyncTestContext;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const API_KEY: &str = "test-key";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

/// API wired to a mocked Gemini endpoint.
pub struct ApiContext {
    pub server: TestServer,
    pub gemini: MockServer,
}

impl ApiContext {
    pub async fn build(api_key: Option<&str>) -> Self {
        let gemini = MockServer::start().await;

        let mut args = Args::default();
        args.llm.gemini_api_key = api_key.map(str::to_string);
        args.llm.gemini_base_url = gemini.uri();

        let state = state(Arc::new(args)).await.expect("state builds");
        let server = TestServer::new(router(state).expect("router builds")).expect("server starts");

        Self { server, gemini }
    }

    /// Gemini answers every call with `reply` as the generated text.
    pub async fn gemini_replies(&self, reply: Value, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": reply.to_string() }] },
                    "finishReason": "STOP"
                }]
            })))
            .expect(expected_calls)
            .mount(&self.gemini)
            .await;
    }

    pub async fn gemini_fails(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "code": status, "message": "API key not valid" }
            })))
            .expect(1)
            .mount(&self.gemini)
            .await;
    }

    pub async fn gemini_calls(&self) -> Vec<Value> {
        self.gemini
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.body_json::<Value>().expect("gemini body is JSON"))
            .collect()
    }
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        Self::build(Some(API_KEY)).await
    }
}
