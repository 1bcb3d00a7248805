//! Evaluation prompt and score-response parsing.

use crate::domain::error::ScorerError;
use crate::domain::models::ScoreRecord;

/// System message pinning the scorer to strict JSON output.
pub const SYSTEM_PROMPT: &str =
    "You are an expert document quality evaluator. Respond only with valid JSON.";

const EVALUATION_INSTRUCTIONS: &str = r#"You are an expert evaluator assessing document quality for use with Large Language Models (LLMs) and Retrieval-Augmented Generation (RAG) systems.

Evaluate the following document text on these criteria (score 0-5 for each):

1. **Relevance** (0-5): How relevant and focused is the content? Does it stay on topic?
2. **Factual Accuracy** (0-5): Does the content appear factually accurate and well-researched?
3. **Clarity** (0-5): Is the writing clear, well-structured, and easy to understand?
4. **Hallucination Risk** (0-5): How likely is this content to cause LLM hallucinations? (0=very likely, 5=very unlikely)
5. **Style Match** (0-5): Is the writing style consistent and professional?
6. **RAG Usability** (0-5): How useful would this be as context for a RAG system? Is it well-structured for retrieval?
7. **Citation Quality** (0-5): Are sources, references, and citations properly included and formatted?

Respond ONLY with a JSON object in this exact format:
{
  "relevance": <score>,
  "factual_accuracy": <score>,
  "clarity": <score>,
  "hallucination": <score>,
  "style_match": <score>,
  "rag_usability": <score>,
  "citation_quality": <score>
}"#;

/// Build the user message for one chunk of document text.
pub fn build_user_prompt(text: &str) -> String {
    format!("{EVALUATION_INSTRUCTIONS}\n\nDocument text to evaluate:\n\n{text}")
}

/// Parse the model's JSON reply into a [`ScoreRecord`].
///
/// All seven fields must be present and in `[0.0, 5.0]`; anything else is
/// a permanent [`ScorerError::MalformedResponse`]. A missing criterion is
/// never silently scored as zero.
pub fn parse_score_response(content: &str) -> Result<ScoreRecord, ScorerError> {
    let record: ScoreRecord = serde_json::from_str(content)
        .map_err(|e| ScorerError::MalformedResponse(format!("invalid score JSON: {e}")))?;

    if !record.in_range() {
        return Err(ScorerError::MalformedResponse(format!(
            "score outside [0, 5]: {record:?}"
        )));
    }

    Ok(record)
}
