//! Query pipeline orchestrator.
//!
//! [`QaPipeline`] coordinates one question end to end: embed the question,
//! retrieve the nearest documents, assemble their texts into a context
//! string, and hand context plus question to the configured [`Generator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use corpusqa::{GenerationMode, HashEmbedder, MemoryVectorStore, QaConfig, QaPipeline};
//!
//! let pipeline = QaPipeline::builder()
//!     .config(QaConfig::default())
//!     .embedder(Arc::new(HashEmbedder::new()))
//!     .store(Arc::new(MemoryVectorStore::new()))
//!     .generator(GenerationMode::Mock.into_generator())
//!     .build()?;
//!
//! let response = pipeline.respond("What is Kubernetes?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::QaConfig;
use crate::document::{Answer, QueryResponse, Scored};
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use crate::generate::Generator;
use crate::store::VectorStore;

/// The retrieval-augmented question-answering pipeline.
///
/// Construct one via [`QaPipeline::builder()`]. The embedder must be the
/// same one the corpus was indexed with.
pub struct QaPipeline {
    config: QaConfig,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
}

impl QaPipeline {
    /// Create a new [`QaPipelineBuilder`].
    pub fn builder() -> QaPipelineBuilder {
        QaPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Return a reference to the vector store.
    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Retrieve the documents most relevant to `question`.
    ///
    /// Embeds the question and queries the store with the configured
    /// `top_k`, preserving the store's ranked order. An empty store yields
    /// an empty vec.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Pipeline`] if embedding or the store query fails.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<Scored>> {
        self.retrieve_k(question, self.config.top_k).await
    }

    /// Retrieve the `k` documents most relevant to `question`, ignoring the
    /// configured `top_k`.
    pub async fn retrieve_k(&self, question: &str, k: usize) -> Result<Vec<Scored>> {
        let embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "question embedding failed");
            QaError::Pipeline(format!("question embedding failed: {e}"))
        })?;

        self.store.query(&embedding, k).await.map_err(|e| {
            error!(error = %e, "vector store query failed");
            QaError::Pipeline(format!("retrieval failed: {e}"))
        })
    }

    /// Join retrieved document texts into one context string.
    ///
    /// Texts are concatenated in ranked order with the configured
    /// separator; an empty retrieval yields the empty string.
    pub fn context_text(&self, retrieved: &[Scored]) -> String {
        retrieved
            .iter()
            .map(|s| s.document.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.config.separator)
    }

    /// Answer `question`: retrieve → assemble context → generate.
    ///
    /// An empty retrieval is not an error: the generator receives an empty
    /// context (and in mock mode echoes it back as an empty answer).
    ///
    /// # Errors
    ///
    /// Propagates retrieval failures as [`QaError::Pipeline`] and generator
    /// failures as [`QaError::Generation`]; no automatic retry.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let retrieved = self.retrieve(question).await?;
        let context = self.context_text(&retrieved);

        let answer = self.generator.generate(&context, question).await?;

        info!(
            retrieved = retrieved.len(),
            context_len = context.len(),
            answer_len = answer.text.len(),
            "answered question"
        );
        Ok(answer)
    }

    /// Answer `question` in the shape handed to a transport layer.
    ///
    /// Serializes to `{"answer": "..."}`.
    pub async fn respond(&self, question: &str) -> Result<QueryResponse> {
        Ok(self.answer(question).await?.into())
    }
}

/// Builder for constructing a [`QaPipeline`].
///
/// All fields are required except `config`, which defaults to
/// [`QaConfig::default()`].
#[derive(Default)]
pub struct QaPipelineBuilder {
    config: Option<QaConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    store: Option<Arc<dyn VectorStore>>,
    generator: Option<Arc<dyn Generator>>,
}

impl QaPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: QaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedder. Must match the one used at index time.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the answer-generation strategy.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`QaPipeline`], validating that all required parts are set.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if the embedder, store, or generator is
    /// missing.
    pub fn build(self) -> Result<QaPipeline> {
        let embedder =
            self.embedder.ok_or_else(|| QaError::Config("embedder is required".to_string()))?;
        let store = self.store.ok_or_else(|| QaError::Config("store is required".to_string()))?;
        let generator =
            self.generator.ok_or_else(|| QaError::Config("generator is required".to_string()))?;

        Ok(QaPipeline { config: self.config.unwrap_or_default(), embedder, store, generator })
    }
}
