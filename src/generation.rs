//! Generation provider trait for synthesizing answer text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates text from a prompt.
///
/// Implementations wrap a concrete text-generation backend. Providers are
/// expected to run in a deterministic (temperature-zero) mode so that
/// repeated calls on identical input produce identical or near-identical
/// output.
///
/// Failures must surface as [`RagError::Generation`](crate::RagError::Generation)
/// so that callers can distinguish a synthesis failure from a retrieval
/// failure.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Return the model identifier of this provider.
    fn model(&self) -> &str;
}
