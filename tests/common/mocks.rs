use async_trait::async_trait;
use hackrx_query::{
    Error, Result,
    document::{DocumentFetcher, TextExtractor},
    llm::AnswerClient,
};
use std::sync::{Arc, Mutex};

/// Mock fetcher returning fixed bytes or a fetch error
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    pub bytes: Vec<u8>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        match &self.error {
            Some(error) => Err(Error::fetch(error.clone())),
            None => Ok(self.bytes.clone()),
        }
    }
}

/// Mock extractor returning fixed text regardless of input
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    pub text: String,
    pub error: Option<String>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract(&self, _bytes: Vec<u8>) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        match &self.error {
            Some(error) => Err(Error::extraction(error.clone())),
            None => Ok(self.text.clone()),
        }
    }
}

/// A recorded call to the answer service
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCall {
    pub document_text: String,
    pub questions: Vec<String>,
}

/// Mock answer client returning canned answers or a service error
#[derive(Debug, Clone, Default)]
pub struct MockAnswerClient {
    pub answers: Vec<String>,
    pub error: Option<String>,
    pub calls: Arc<Mutex<Vec<AnswerCall>>>,
}

impl MockAnswerClient {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<AnswerCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerClient for MockAnswerClient {
    async fn answer_questions(
        &self,
        document_text: &str,
        questions: &[String],
    ) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(AnswerCall {
            document_text: document_text.to_string(),
            questions: questions.to_vec(),
        });
        match &self.error {
            Some(error) => Err(Error::service(error.clone())),
            None => Ok(self.answers.clone()),
        }
    }
}

/// Answer client that panics mid-request
#[derive(Debug, Clone, Default)]
pub struct PanickingAnswerClient;

#[async_trait]
impl AnswerClient for PanickingAnswerClient {
    async fn answer_questions(
        &self,
        _document_text: &str,
        _questions: &[String],
    ) -> Result<Vec<String>> {
        panic!("answer client exploded");
    }
}
