//! Error types for the `corpusqa` crate.

use thiserror::Error;

/// Errors that can occur while indexing or answering questions.
#[derive(Debug, Error)]
pub enum QaError {
    /// The embedder failed to produce a vector.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedder that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The vector store could not complete an operation.
    ///
    /// Fatal to the current index or query; surfaced to the caller.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The answer generator could not reach its model or service.
    ///
    /// Not retried automatically; the caller decides.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration or builder validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error in pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for corpus QA operations.
pub type Result<T> = std::result::Result<T, QaError>;
