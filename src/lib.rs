//! # corpusqa
//!
//! Retrieval-augmented question answering over a small plain-text corpus.
//!
//! ## Overview
//!
//! A question is answered in two steps: retrieve the most relevant corpus
//! passage by embedding similarity, then generate an answer grounded in it.
//! The crate covers the full pipeline:
//!
//! - [`Embedder`] — maps text to fixed-dimension vectors ([`HashEmbedder`]
//!   locally, [`ollama::OllamaEmbedder`] via a model server)
//! - [`VectorStore`] — holds embedded documents and answers
//!   nearest-neighbor queries ([`MemoryVectorStore`], [`FileVectorStore`])
//! - [`CorpusIndexer`] — rebuilds a store from a directory of text files
//! - [`QaPipeline`] — embed → retrieve → assemble context → generate
//! - [`Generator`] — answer strategy, chosen once at startup via
//!   [`GenerationMode`] ([`MockGenerator`] echoes context verbatim;
//!   [`ollama::OllamaGenerator`] prompts a model)
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use corpusqa::{
//!     CorpusIndexer, GenerationMode, HashEmbedder, MemoryVectorStore, QaConfig, QaPipeline,
//! };
//!
//! # async fn run() -> corpusqa::Result<()> {
//! let embedder = Arc::new(HashEmbedder::new());
//! let store = Arc::new(MemoryVectorStore::new());
//!
//! let indexer = CorpusIndexer::new(embedder.clone(), store.clone());
//! let report = indexer.index_dir("./corpus").await?;
//! println!("indexed {} documents", report.indexed);
//!
//! let pipeline = QaPipeline::builder()
//!     .config(QaConfig::default())
//!     .embedder(embedder)
//!     .store(store)
//!     .generator(GenerationMode::Mock.into_generator())
//!     .build()?;
//!
//! let response = pipeline.respond("What is Kubernetes?").await?;
//! println!("{}", response.answer);
//! # Ok(())
//! # }
//! ```
//!
//! ## Consistency invariant
//!
//! Stored and query vectors are only comparable when produced by the same
//! embedder. Share one [`Embedder`] between the [`CorpusIndexer`] and the
//! [`QaPipeline`]; [`FileVectorStore`] additionally records its
//! dimensionality and refuses to open under a different one.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod file;
pub mod generate;
pub mod indexer;
pub mod memory;
#[cfg(feature = "ollama")]
pub mod ollama;
pub mod pipeline;
pub mod store;

pub use config::{GenerationMode, QaConfig, QaConfigBuilder};
pub use document::{Answer, Document, QueryResponse, Scored};
pub use embedding::{Embedder, HashEmbedder};
pub use error::{QaError, Result};
pub use file::FileVectorStore;
pub use generate::{Generator, MockGenerator};
pub use indexer::{CorpusIndexer, IndexReport, SkippedFile};
pub use memory::MemoryVectorStore;
pub use pipeline::{QaPipeline, QaPipelineBuilder};
pub use store::{VectorStore, cosine_similarity};
