use super::mocks::{MockAnswerClient, MockExtractor, MockFetcher};
use axum::Router;
use hackrx_query::{
    config::LlmConfig,
    pipeline::QueryPipeline,
    server::{AppState, router},
};
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_TOKEN: &str = "Bearer test-token";
pub const TEST_DOCUMENT_URL: &str = "https://example.com/doc.pdf";
pub const TEST_DOCUMENT_TEXT: &str = "The term is 12 months. The premium is $500.";

pub fn test_questions() -> Vec<String> {
    vec![
        "What is the term?".to_string(),
        "What is the premium?".to_string(),
    ]
}

pub fn run_body() -> Value {
    json!({
        "documents": TEST_DOCUMENT_URL,
        "questions": test_questions(),
    })
}

/// Mocks wired for the happy-path scenario
pub struct TestDoubles {
    pub fetcher: MockFetcher,
    pub extractor: MockExtractor,
    pub answers: MockAnswerClient,
}

impl Default for TestDoubles {
    fn default() -> Self {
        Self {
            fetcher: MockFetcher::new(b"%PDF-1.4 fake"),
            extractor: MockExtractor::new(TEST_DOCUMENT_TEXT),
            answers: MockAnswerClient::new(&["The term is 12 months.", "The premium is $500."]),
        }
    }
}

impl TestDoubles {
    pub fn pipeline(&self) -> QueryPipeline {
        QueryPipeline::new(
            Arc::new(self.fetcher.clone()),
            Arc::new(self.extractor.clone()),
            Arc::new(self.answers.clone()),
            Some(TEST_TOKEN.to_string()),
        )
    }

    pub fn app(&self) -> Router {
        router(AppState {
            pipeline: Arc::new(self.pipeline()),
        })
    }
}

/// LLM config pointing at a local mock server
pub fn llm_config_for(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "gemini-test".to_string(),
        ..LlmConfig::default()
    }
}

/// A generateContent body whose first part carries `text`
pub fn gemini_text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}
