use super::prompt::build_batch_prompt;
use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Answers every question about `document_text` in a single upstream call.
    ///
    /// On success the result has exactly one answer per question, in order.
    async fn answer_questions(&self, document_text: &str, questions: &[String])
    -> Result<Vec<String>>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(config: LlmConfig, timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AnswerClient for GeminiClient {
    async fn answer_questions(
        &self,
        document_text: &str,
        questions: &[String],
    ) -> Result<Vec<String>> {
        let prompt = build_batch_prompt(document_text, questions);
        let request =
            GenerateContentRequest::single_prompt(prompt, self.max_output_tokens, self.temperature);

        info!(
            "Sending a single batch request for {} questions to {}",
            questions.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::service(format!(
                    "Failed to process questions with LLM. Details: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("LLM API responded with {}: {}", status, body);
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(Error::service(format!(
                "LLM API error: {} - {}",
                status.as_u16(),
                message
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            Error::service(format!(
                "Failed to process questions with LLM. Details: {}",
                e.without_url()
            ))
        })?;

        parse_answers(&body, questions.len())
    }
}

/// Interprets a generateContent response as exactly `expected` ordered answers.
pub fn parse_answers(response: &GenerateContentResponse, expected: usize) -> Result<Vec<String>> {
    let Some(text) = response.first_text() else {
        if let Some(reason) = response.block_reason() {
            return Err(Error::service(format!(
                "Request was blocked by the API. Reason: {reason}."
            )));
        }
        return Err(Error::service(
            "The API returned an empty or invalid response structure.",
        ));
    };

    debug!("Received raw JSON string from LLM: {}", text);

    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        Error::service(format!(
            "Failed to process questions with LLM. Details: {e}"
        ))
    })?;

    match parsed {
        Value::Array(items) if items.len() == expected => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(answer) => answer,
                other => other.to_string(),
            })
            .collect()),
        _ => Err(Error::service(
            "Parsed response is not a valid array or has a mismatched number of answers.",
        )),
    }
}
