//! Corpus indexer: read a directory of text files → embed → populate a store.
//!
//! Indexing is a full rebuild: the resulting store contains exactly one
//! document per readable file currently in the directory, and nothing else.
//! It is idempotent — two runs over an unchanged corpus produce identical
//! `(id, text, embedding)` sets.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use crate::store::VectorStore;

/// A corpus file that could not be indexed, with the reason it was skipped.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedFile {
    /// The file name relative to the corpus directory.
    pub name: String,
    /// Why the file was skipped (e.g. unreadable, not valid UTF-8).
    pub reason: String,
}

/// The outcome of one indexing run.
///
/// Skipped files are reported here rather than failing the run; a partial
/// index over the readable corpus is more useful than no index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexReport {
    /// Number of documents written to the store.
    pub indexed: usize,
    /// Files that could not be read and were excluded from the store.
    pub skipped: Vec<SkippedFile>,
}

impl IndexReport {
    /// True if at least one corpus file had to be skipped.
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Rebuilds a [`VectorStore`] from a directory of plain-text files.
///
/// Each regular file becomes one [`Document`] whose `id` is the file name.
/// The indexer and the query pipeline must share the same [`Embedder`], or
/// stored and probe vectors will not be comparable.
pub struct CorpusIndexer {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl CorpusIndexer {
    /// Create an indexer writing to `store` with vectors from `embedder`.
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Rebuild the store from the files in `dir`.
    ///
    /// The new contents are fully built (read + embedded) before the store
    /// is touched, then swapped in atomically via
    /// [`replace_all`](VectorStore::replace_all); concurrent readers never
    /// observe a partially populated store. Documents whose source files are
    /// gone are dropped by the swap.
    ///
    /// Unreadable files are skipped and reported in the [`IndexReport`];
    /// embedding or store failures abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Pipeline`] if the directory itself cannot be read,
    /// or propagates [`QaError::Embedding`] / [`QaError::Store`] from the
    /// embed and swap steps.
    pub async fn index_dir(&self, dir: impl AsRef<Path>) -> Result<IndexReport> {
        let dir = dir.as_ref();
        let mut names = Vec::new();

        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            QaError::Pipeline(format!("failed to read corpus directory {}: {e}", dir.display()))
        })?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            QaError::Pipeline(format!("failed to read corpus directory {}: {e}", dir.display()))
        })? {
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        // Sorted order keeps runs deterministic regardless of readdir order.
        names.sort();

        let mut ids = Vec::new();
        let mut texts = Vec::new();
        let mut skipped = Vec::new();
        for name in names {
            match tokio::fs::read_to_string(dir.join(&name)).await {
                Ok(text) => {
                    ids.push(name);
                    texts.push(text);
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "skipping unreadable corpus file");
                    skipped.push(SkippedFile { name, reason: e.to_string() });
                }
            }
        }

        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&text_refs).await?;

        let documents: Vec<Document> = ids
            .into_iter()
            .zip(texts)
            .zip(embeddings)
            .map(|((id, text), embedding)| Document::new(id, text, embedding))
            .collect();

        let indexed = documents.len();
        self.store.replace_all(documents).await?;

        info!(indexed, skipped = skipped.len(), dir = %dir.display(), "corpus reindexed");
        Ok(IndexReport { indexed, skipped })
    }
}
