//! Deterministic mock providers for tests and offline demos.
//!
//! These are the stub implementations behind the provider seams: the mock
//! embedder hashes text into a normalized direction, so equal inputs always
//! map to equal vectors and retrieval behaves deterministically without any
//! network access.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::generation::GenerationProvider;

/// Deterministic hash-based embedding provider.
///
/// Hashes the text bytes and derives a normalized vector whose direction
/// depends on the content. Identical inputs yield identical embeddings.
pub struct MockEmbeddingProvider {
    model: String,
    dimensions: usize,
}

impl MockEmbeddingProvider {
    /// Create a mock embedder producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { model: "mock-embedding".to_string(), dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let hash = text.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
        });
        let mut embedding = vec![0.0f32; self.dimensions];
        for (i, v) in embedding.iter_mut().enumerate() {
            // The component index must be mixed in before the float cast;
            // f32 cannot represent an offset of `i` on a full-range u64.
            let mixed = hash
                .wrapping_add((i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
                .wrapping_mul(0x9e37_79b9_7f4a_7c15);
            *v = ((mixed >> 40) as f32) / ((1u64 << 23) as f32) - 1.0;
        }
        // L2-normalize so cosine similarity is just the dot product.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Canned generation provider that echoes how much context it received.
///
/// The reply embeds the prompt length and whether the prompt reported an
/// empty retrieval, which is enough for pipeline tests to assert on.
pub struct MockGenerationProvider {
    model: String,
}

impl MockGenerationProvider {
    /// Create a mock generator.
    pub fn new() -> Self {
        Self { model: "mock-generation".to_string() }
    }
}

impl Default for MockGenerationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.contains("no passages were retrieved") {
            Ok("I do not have that information in the indexed corpus.".to_string())
        } else {
            Ok(format!("Grounded answer derived from {} prompt characters.", prompt.len()))
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn different_texts_embed_in_different_directions() {
        let provider = MockEmbeddingProvider::new(16);
        let a = provider
            .embed("the quick brown fox jumps over the lazy dog today")
            .await
            .unwrap();
        let b = provider
            .embed("neural networks learn layered representations of data")
            .await
            .unwrap();
        // Both vectors are unit length, so cosine is the plain dot product.
        let cos: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!(cos.abs() < 0.999, "embeddings are near-parallel: cos = {cos}");
    }

    #[tokio::test]
    async fn components_within_one_embedding_vary() {
        let provider = MockEmbeddingProvider::new(16);
        let e = provider
            .embed("a reasonably long input text for a hash-based embedding")
            .await
            .unwrap();
        let min = e.iter().copied().fold(f32::INFINITY, f32::min);
        let max = e.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 1e-3, "all components collapsed to {min}");
    }

    #[tokio::test]
    async fn identical_texts_embed_identically() {
        let provider = MockEmbeddingProvider::new(16);
        let a = provider.embed("determinism matters for reload tests").await.unwrap();
        let b = provider.embed("determinism matters for reload tests").await.unwrap();
        assert_eq!(a, b);
    }
}
