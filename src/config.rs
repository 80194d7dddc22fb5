//! Configuration for the question-answering pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};
use crate::generate::{Generator, MockGenerator};

/// Configuration parameters for the query pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaConfig {
    /// Number of documents to retrieve per question.
    pub top_k: usize,
    /// Separator joining retrieved document texts into one context string.
    pub separator: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { top_k: 1, separator: "\n\n".to_string() }
    }
}

impl QaConfig {
    /// Create a new builder for constructing a [`QaConfig`].
    pub fn builder() -> QaConfigBuilder {
        QaConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`QaConfig`].
#[derive(Debug, Clone, Default)]
pub struct QaConfigBuilder {
    config: QaConfig,
}

impl QaConfigBuilder {
    /// Set the number of documents retrieved per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the separator joining retrieved texts into the context string.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Build the [`QaConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if `top_k == 0`.
    pub fn build(self) -> Result<QaConfig> {
        if self.config.top_k == 0 {
            return Err(QaError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

/// The answer-generation strategy, resolved once at startup.
///
/// The variant is process-wide configuration, not a per-request choice:
/// a pipeline built in mock mode stays in mock mode for its lifetime, which
/// keeps retrieval quality testable independent of any model.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Echo the retrieved context verbatim; no model required.
    Mock,
    /// Prompt a generative model served by Ollama.
    #[cfg(feature = "ollama")]
    Ollama {
        /// The Ollama server base URL, e.g. `http://localhost:11434`.
        base_url: String,
        /// The generation model name, e.g. `llama3.2`.
        model: String,
    },
}

impl GenerationMode {
    /// Convert the mode into the generator strategy injected into the pipeline.
    pub fn into_generator(self) -> Arc<dyn Generator> {
        match self {
            GenerationMode::Mock => Arc::new(MockGenerator::new()),
            #[cfg(feature = "ollama")]
            GenerationMode::Ollama { base_url, model } => Arc::new(
                crate::ollama::OllamaGenerator::new().with_base_url(base_url).with_model(model),
            ),
        }
    }
}
