//! Batch prompt construction.
//!
//! One prompt carries the whole document and every question. The model is
//! told to reply with a bare JSON array of strings in question order, which
//! is what [`super::client::parse_answers`] validates on the way back.

/// Answer the model must give for questions the document does not cover.
pub const NOT_AVAILABLE_ANSWER: &str = "The information is not available in the document.";

/// Renders `questions` as a 1-indexed list, one per line.
pub fn format_questions(questions: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| format!("{}. {}", index + 1, question))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_batch_prompt(document_text: &str, questions: &[String]) -> String {
    let formatted_questions = format_questions(questions);

    format!(
        r#"You are an expert document analyst. Your task is to answer a series of questions based strictly on the provided document content.

DOCUMENT CONTEXT:
---
{document_text}
---

Based *only* on the document context provided above, answer the following questions.
Provide your response as a single, valid JSON array of strings, where each string is the answer to a question in the corresponding order.

For example, for 2 questions, the output should be a JSON block like:
["Answer to question 1.", "Answer to question 2."]

If the information for a question is not available in the document, the string for that answer must be "{NOT_AVAILABLE_ANSWER}"

Do not include any text, explanation, or markdown formatting (like ```json) before or after the JSON array. Your entire response must be the JSON array itself.

QUESTIONS:
{formatted_questions}
"#
    )
}
