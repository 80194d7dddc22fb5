//! Vector store trait for persisting documents and searching by similarity.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::document::{Document, Scored};
use crate::error::Result;

/// A storage backend holding one logical collection of embedded documents.
///
/// Implementations map document `id` to [`Document`] and support upserting,
/// atomic full replacement, clearing, and nearest-neighbor queries. The
/// distance metric (cosine similarity) is fixed for the store's lifetime.
///
/// # Example
///
/// ```rust,ignore
/// use corpusqa::{MemoryVectorStore, VectorStore};
///
/// let store = MemoryVectorStore::new();
/// store.upsert(document).await?;
/// let results = store.query(&query_embedding, 1).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or overwrite a document by its `id`. Never duplicates.
    async fn upsert(&self, document: Document) -> Result<()>;

    /// Atomically replace the entire contents with `documents`.
    ///
    /// Concurrent readers observe either the previous contents or the new
    /// ones, never a partially populated state. This is the reindex path.
    async fn replace_all(&self, documents: Vec<Document>) -> Result<()>;

    /// Remove all documents.
    async fn clear(&self) -> Result<()>;

    /// Return the `k` documents most similar to `embedding`.
    ///
    /// Results are ordered by descending similarity; documents with equal
    /// scores are ordered by ascending `id`. An empty store yields an empty
    /// vec, not an error.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Scored>>;

    /// The number of stored documents.
    async fn count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score `documents` against `probe`, order them, and keep the top `k`.
///
/// Shared by every [`VectorStore`] implementation so the ranking contract
/// cannot drift between backends: descending score, ties broken by
/// ascending `id`, NaN scores sorted last.
pub(crate) fn rank<'a, I>(documents: I, probe: &[f32], k: usize) -> Vec<Scored>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut scored: Vec<Scored> = documents
        .into_iter()
        .map(|document| Scored {
            score: cosine_similarity(&document.embedding, probe),
            document: document.clone(),
        })
        .collect();

    scored.sort_by(|a, b| match b.score.partial_cmp(&a.score) {
        Some(Ordering::Equal) | None => a.document.id.cmp(&b.document.id),
        Some(ordering) => ordering,
    });
    scored.truncate(k);
    scored
}
