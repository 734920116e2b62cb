use super::fsm::{FailureKind, RunEvent, RunStateMachine};
use crate::{
    Error, Result,
    config::Config,
    document::{DocumentFetcher, HttpFetcher, PdfTextExtractor, TextExtractor},
    llm::{AnswerClient, GeminiClient},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// A validated run request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunRequest {
    pub documents: String,
    pub questions: Vec<String>,
}

impl RunRequest {
    /// Parses a raw body, rejecting anything that is not a non-empty `documents`
    /// string together with a non-empty array of string `questions`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        if !value.is_object() {
            return None;
        }
        let request: RunRequest = serde_json::from_value(value).ok()?;
        if request.documents.is_empty() || request.questions.is_empty() {
            return None;
        }
        Some(request)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub details: Option<String>,
}

impl RunFailure {
    fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            details: None,
        }
    }

    fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::Fetch(_) => FailureKind::Fetch,
            Error::Extraction(_) => FailureKind::Extraction,
            Error::Service(_) => FailureKind::Service,
            _ => FailureKind::Internal,
        };
        Self {
            kind,
            details: Some(err.to_string()),
        }
    }
}

/// Fetch → extract → query, guarded by the auth and body checks.
///
/// Holds no per-request state; every call to [`QueryPipeline::run`] drives its
/// own [`RunStateMachine`].
pub struct QueryPipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn TextExtractor>,
    answer_client: Arc<dyn AnswerClient>,
    auth_token: Option<String>,
}

impl QueryPipeline {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: Arc<dyn TextExtractor>,
        answer_client: Arc<dyn AnswerClient>,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            answer_client,
            auth_token,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.server.request_timeout_secs;
        Ok(Self::new(
            Arc::new(HttpFetcher::new(timeout)?),
            Arc::new(PdfTextExtractor::new()),
            Arc::new(GeminiClient::new(config.llm.clone(), timeout)?),
            config.auth.token.clone(),
        ))
    }

    /// Exact comparison of the `Authorization` header value with the configured token.
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        match (&self.auth_token, header) {
            (Some(expected), Some(provided)) => provided == expected,
            _ => false,
        }
    }

    pub async fn run(
        &self,
        auth_header: Option<&str>,
        body: &[u8],
    ) -> std::result::Result<Vec<String>, RunFailure> {
        let mut fsm = RunStateMachine::new();

        if !self.is_authorized(auth_header) {
            return Err(fail(&mut fsm, RunFailure::new(FailureKind::Unauthorized)));
        }
        advance(&mut fsm, RunEvent::Authorized)?;

        let Some(request) = RunRequest::from_body(body) else {
            return Err(fail(&mut fsm, RunFailure::new(FailureKind::BadRequest)));
        };
        advance(&mut fsm, RunEvent::BodyValidated)?;

        info!(
            "Step 1: Extracting text from {} for {} questions",
            request.documents,
            request.questions.len()
        );
        let bytes = match self.fetcher.fetch(&request.documents).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(fail_with(&mut fsm, &e)),
        };
        advance(&mut fsm, RunEvent::DocumentFetched)?;

        let text = match self.extractor.extract(bytes).await {
            Ok(text) => text,
            Err(e) => return Err(fail_with(&mut fsm, &e)),
        };
        advance(&mut fsm, RunEvent::TextExtracted)?;
        info!("PDF text extracted successfully");

        info!("Step 2: Processing all questions with LLM in a single batch");
        let answers = match self
            .answer_client
            .answer_questions(&text, &request.questions)
            .await
        {
            Ok(answers) => answers,
            Err(e) => return Err(fail_with(&mut fsm, &e)),
        };

        if answers.len() != request.questions.len() {
            let e = Error::service(
                "Parsed response is not a valid array or has a mismatched number of answers.",
            );
            return Err(fail_with(&mut fsm, &e));
        }
        advance(&mut fsm, RunEvent::AnswersReceived)?;
        info!("Received {} answers from LLM", answers.len());

        Ok(answers)
    }
}

fn advance(fsm: &mut RunStateMachine, event: RunEvent) -> std::result::Result<(), RunFailure> {
    fsm.transition(event).map_err(|e| {
        error!("Run state machine rejected transition: {}", e);
        RunFailure::from_error(&e)
    })
}

fn fail(fsm: &mut RunStateMachine, failure: RunFailure) -> RunFailure {
    if let Err(e) = fsm.transition(RunEvent::Failed(failure.kind)) {
        error!("Run state machine rejected failure: {}", e);
    }
    failure
}

fn fail_with(fsm: &mut RunStateMachine, err: &Error) -> RunFailure {
    error!("Run failed at {:?} ({}): {}", fsm.current_state(), err.kind(), err);
    fail(fsm, RunFailure::from_error(err))
}
