//! Grounded answer synthesis from retrieved context.
//!
//! The synthesizer receives only the question and the retrieved chunk texts.
//! It has no access to the full corpus, so the generated answer can only
//! draw on what retrieval surfaced.

use std::sync::Arc;

use tracing::{debug, error};

use crate::document::SearchResult;
use crate::error::Result;
use crate::generation::GenerationProvider;

/// Synthesizes a natural-language answer grounded in retrieved chunks.
pub struct AnswerSynthesizer {
    provider: Arc<dyn GenerationProvider>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer backed by the given generation provider.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Generate an answer to `question` using only the text of `results`.
    ///
    /// With an empty `results` slice the prompt states that no passages were
    /// retrieved and instructs the model to say it has no information; an
    /// empty retrieval is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Generation`](crate::RagError::Generation) if the
    /// generation provider is unavailable or reports a failure.
    pub async fn synthesize(&self, question: &str, results: &[SearchResult]) -> Result<String> {
        let prompt = build_prompt(question, results);

        debug!(
            model = self.provider.model(),
            context_chunks = results.len(),
            prompt_len = prompt.len(),
            "synthesizing answer"
        );

        let answer = self.provider.generate(&prompt).await.inspect_err(|e| {
            error!(model = self.provider.model(), error = %e, "answer generation failed");
        })?;

        Ok(answer)
    }
}

/// Build the grounding prompt from the question and retrieved chunks.
///
/// Each context block is numbered and tagged with its source identifier so
/// the model can stay close to the retrieved text.
fn build_prompt(question: &str, results: &[SearchResult]) -> String {
    let context = if results.is_empty() {
        "(no passages were retrieved)".to_string()
    } else {
        results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                format!("[{}] Source: {}\n{}", i + 1, result.chunk.source_id, result.chunk.text)
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    };

    format!(
        "Use only the context passages below to answer the question. \
         If the context does not contain the answer, say that you do not \
         have that information; do not use outside knowledge.\n\n\
         Context:\n{context}\n\nQuestion: {question}\n\nAnswer:"
    )
}
