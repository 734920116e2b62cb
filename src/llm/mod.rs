pub mod client;
pub mod prompt;
pub mod types;

pub use client::{AnswerClient, GeminiClient, parse_answers};
pub use prompt::{NOT_AVAILABLE_ANSWER, build_batch_prompt};
pub use types::*;
