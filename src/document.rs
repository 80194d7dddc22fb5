//! Data types for indexed documents, retrieval results, and answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An indexed corpus document with its vector embedding.
///
/// The `id` is derived from the source file name and is unique within a
/// store; re-indexing the same `id` overwrites, never duplicates. Once
/// indexed, a document is owned by the vector store and replaced wholesale
/// on the next corpus rebuild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier, derived from the source file name.
    pub id: String,
    /// The full text content of the document.
    pub text: String,
    /// The vector embedding of `text`.
    pub embedding: Vec<f32>,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self { id: id.into(), text: text.into(), embedding, metadata: HashMap::new() }
    }
}

/// A retrieved [`Document`] paired with its similarity score.
///
/// A query returns these ordered by descending score; documents with equal
/// scores are ordered by ascending `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scored {
    /// The retrieved document.
    pub document: Document,
    /// Cosine similarity to the query embedding (higher is more relevant).
    pub score: f32,
}

/// The text produced by an answer generator for one question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The answer text. Empty when nothing was retrieved in mock mode.
    pub text: String,
}

/// The wire shape handed to an external transport layer.
///
/// Serializes to `{"answer": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    /// The answer text.
    pub answer: String,
}

impl From<Answer> for QueryResponse {
    fn from(answer: Answer) -> Self {
        Self { answer: answer.text }
    }
}
