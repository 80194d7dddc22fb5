//! File-backed durable vector store.
//!
//! [`FileVectorStore`] keeps the full collection in memory and mirrors every
//! mutation to a JSON snapshot on disk, so the corpus survives process
//! restarts. Snapshots are written to a temp file and renamed into place, so
//! a crash mid-write leaves the previous snapshot intact.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{Document, Scored};
use crate::error::{QaError, Result};
use crate::store::{VectorStore, rank};

const BACKEND: &str = "file";

/// The on-disk snapshot shape.
///
/// Documents are stored sorted by `id` so an unchanged corpus always
/// serializes to identical bytes.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    dimensions: usize,
    documents: Vec<Document>,
}

/// A durable [`VectorStore`] persisting one collection to a JSON file.
///
/// The snapshot records the embedding dimensionality it was built with;
/// opening it under a different dimensionality fails instead of silently
/// comparing incomparable vectors.
///
/// # Example
///
/// ```rust,ignore
/// use corpusqa::FileVectorStore;
///
/// let store = FileVectorStore::open("corpus.json", embedder.dimensions()).await?;
/// ```
#[derive(Debug)]
pub struct FileVectorStore {
    path: PathBuf,
    dimensions: usize,
    documents: RwLock<HashMap<String, Document>>,
}

impl FileVectorStore {
    /// Open a store at `path`, loading the existing snapshot if present.
    ///
    /// `dimensions` must match the embedder that produced (and will probe)
    /// the stored vectors.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Store`] if the snapshot cannot be read or parsed,
    /// or if it records a different dimensionality than requested.
    pub async fn open(path: impl AsRef<Path>, dimensions: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot =
                    serde_json::from_slice(&bytes).map_err(|e| QaError::Store {
                        backend: BACKEND.into(),
                        message: format!("corrupt snapshot at {}: {e}", path.display()),
                    })?;
                if snapshot.dimensions != dimensions {
                    return Err(QaError::Store {
                        backend: BACKEND.into(),
                        message: format!(
                            "snapshot at {} was built with {}-dimensional embeddings, \
                             but the configured embedder produces {}; reindex the corpus",
                            path.display(),
                            snapshot.dimensions,
                            dimensions
                        ),
                    });
                }
                debug!(path = %path.display(), count = snapshot.documents.len(), "loaded snapshot");
                snapshot.documents.into_iter().map(|d| (d.id.clone(), d)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(QaError::Store {
                    backend: BACKEND.into(),
                    message: format!("failed to read {}: {e}", path.display()),
                });
            }
        };

        Ok(Self { path, dimensions, documents: RwLock::new(documents) })
    }

    /// The dimensionality this store was opened with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Serialize `documents` and atomically replace the snapshot on disk.
    async fn persist(&self, documents: &HashMap<String, Document>) -> Result<()> {
        let mut sorted: Vec<&Document> = documents.values().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        let snapshot = Snapshot {
            dimensions: self.dimensions,
            documents: sorted.into_iter().cloned().collect(),
        };

        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|e| QaError::Store {
            backend: BACKEND.into(),
            message: format!("failed to serialize snapshot: {e}"),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let map_io = |op: &str, e: std::io::Error| QaError::Store {
            backend: BACKEND.into(),
            message: format!("failed to {op} {}: {e}", self.path.display()),
        };
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| map_io("write", e))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| map_io("replace", e))?;

        debug!(path = %self.path.display(), count = snapshot.documents.len(), "wrote snapshot");
        Ok(())
    }
}

#[async_trait]
impl VectorStore for FileVectorStore {
    async fn upsert(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document);
        self.persist(&documents).await
    }

    async fn replace_all(&self, new_documents: Vec<Document>) -> Result<()> {
        let replacement: HashMap<String, Document> =
            new_documents.into_iter().map(|d| (d.id.clone(), d)).collect();
        // The write lock is held across the disk write, so readers see
        // either the old contents or the new ones, and the snapshot on disk
        // always matches what readers observe next.
        let mut documents = self.documents.write().await;
        self.persist(&replacement).await?;
        *documents = replacement;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut documents = self.documents.write().await;
        let empty = HashMap::new();
        self.persist(&empty).await?;
        *documents = empty;
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
