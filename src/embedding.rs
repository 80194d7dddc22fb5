//! Embedder trait for turning text into fixed-dimension vectors.
//!
//! Retrieval is only meaningful when the corpus and the query are embedded
//! by the same function: vectors from different embedders (or different
//! dimensionalities) are not comparable under cosine similarity. The
//! indexer and the query pipeline must therefore share one [`Embedder`].

use async_trait::async_trait;

use crate::error::Result;

/// A function that maps text to a fixed-dimension embedding vector.
///
/// The default [`embed_batch`](Embedder::embed_batch) implementation calls
/// [`embed`](Embedder::embed) sequentially; backends with native batching
/// should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of [`dimensions()`](Embedder::dimensions) length.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}

/// The default dimensionality for [`HashEmbedder`].
const DEFAULT_DIMENSIONS: usize = 256;

/// A deterministic local embedder using token feature hashing.
///
/// Lowercases the input, splits on non-alphanumeric boundaries, hashes each
/// token into one of `dimensions` buckets, and L2-normalizes the resulting
/// term-count vector. Texts sharing tokens get proportionally similar
/// vectors; disjoint texts are (up to hash collisions) orthogonal.
///
/// No network, no model files, fully deterministic — suitable for tests and
/// self-contained deployments. For semantic similarity beyond lexical
/// overlap, use a model-backed embedder such as
/// [`OllamaEmbedder`](crate::ollama::OllamaEmbedder).
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dimensions: DEFAULT_DIMENSIONS }
    }
}

impl HashEmbedder {
    /// Create an embedder producing vectors of the default dimensionality (256).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an embedder producing vectors of the given dimensionality.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            let bucket = (fnv1a(token.as_bytes()) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }
        // L2-normalize so cosine similarity reduces to a dot product.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

/// FNV-1a, used instead of `DefaultHasher` so bucket assignment is stable
/// across builds (embeddings are persisted and compared across runs).
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn embeddings_are_deterministic() {
        let embedder = HashEmbedder::new();
        let a = embedder.embed("Kubernetes is a container orchestration platform.").await.unwrap();
        let b = embedder.embed("Kubernetes is a container orchestration platform.").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), embedder.dimensions());
    }

    #[tokio::test]
    async fn non_empty_text_is_unit_length() {
        let embedder = HashEmbedder::new();
        let v = embedder.embed("hello world").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new();
        let v = embedder.embed("").await.unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn shared_tokens_beat_disjoint_tokens() {
        let embedder = HashEmbedder::new();
        let query = embedder.embed("What is Kubernetes?").await.unwrap();
        let related =
            embedder.embed("Kubernetes is a container orchestration platform.").await.unwrap();
        let unrelated = embedder.embed("Bread rises because yeast ferments sugar.").await.unwrap();
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[tokio::test]
    async fn batch_matches_single_calls() {
        let embedder = HashEmbedder::new();
        let batch = embedder.embed_batch(&["alpha", "beta"]).await.unwrap();
        assert_eq!(batch[0], embedder.embed("alpha").await.unwrap());
        assert_eq!(batch[1], embedder.embed("beta").await.unwrap());
    }
}
