//! In-memory vector store.
//!
//! [`MemoryVectorStore`] holds documents in a `HashMap` behind a
//! `tokio::sync::RwLock`. It is the fixture store for tests and the natural
//! choice for short-lived processes; durable deployments use
//! [`FileVectorStore`](crate::file::FileVectorStore).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Document, Scored};
use crate::error::Result;
use crate::store::{VectorStore, rank};

/// An in-memory vector store using cosine similarity for queries.
///
/// All operations are async-safe via `tokio::sync::RwLock`; concurrent
/// readers are never blocked by each other, and [`replace_all`] swaps the
/// whole map under one write lock so readers see either the old corpus or
/// the new one.
///
/// [`replace_all`]: VectorStore::replace_all
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryVectorStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document);
        Ok(())
    }

    async fn replace_all(&self, new_documents: Vec<Document>) -> Result<()> {
        let replacement: HashMap<String, Document> =
            new_documents.into_iter().map(|d| (d.id.clone(), d)).collect();
        let mut documents = self.documents.write().await;
        *documents = replacement;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.clear();
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Scored>> {
        let documents = self.documents.read().await;
        Ok(rank(documents.values(), embedding, k))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.documents.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str, embedding: Vec<f32>) -> Document {
        Document::new(id, text, embedding)
    }

    #[tokio::test]
    async fn upsert_overwrites_by_id() {
        let store = MemoryVectorStore::new();
        store.upsert(doc("a", "old", vec![1.0, 0.0])).await.unwrap();
        store.upsert(doc("a", "new", vec![0.0, 1.0])).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        let results = store.query(&[0.0, 1.0], 1).await.unwrap();
        assert_eq!(results[0].document.text, "new");
    }

    #[tokio::test]
    async fn replace_all_drops_absent_documents() {
        let store = MemoryVectorStore::new();
        store.upsert(doc("stale", "old", vec![1.0, 0.0])).await.unwrap();
        store.replace_all(vec![doc("fresh", "new", vec![0.0, 1.0])]).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let results = store.query(&[0.0, 1.0], 5).await.unwrap();
        assert_eq!(results[0].document.id, "fresh");
    }

    #[tokio::test]
    async fn query_on_empty_store_returns_empty() {
        let store = MemoryVectorStore::new();
        assert!(store.query(&[1.0, 0.0], 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = MemoryVectorStore::new();
        store.upsert(doc("a", "text", vec![1.0])).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
