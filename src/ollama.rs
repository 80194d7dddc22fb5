//! Ollama-backed embedder and answer generator.
//!
//! Talks to a local [Ollama](https://ollama.com/) server over HTTP using
//! `reqwest`. This module is only available when the `ollama` feature is
//! enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::document::Answer;
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use crate::generate::{Generator, render_prompt};

/// The default Ollama server URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default embedding model.
const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// The dimensionality of `nomic-embed-text` embeddings.
const DEFAULT_EMBED_DIMENSIONS: usize = 768;

/// The default generation model.
const DEFAULT_GENERATE_MODEL: &str = "llama3.2";

const PROVIDER: &str = "Ollama";

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// An [`Embedder`] backed by the Ollama `/api/embeddings` endpoint.
///
/// The corpus must be indexed and queried with the same model; the
/// dimensionality configured here is recorded by
/// [`FileVectorStore`](crate::file::FileVectorStore) so a model swap that
/// changes dimensions fails at open rather than producing garbage scores.
///
/// # Example
///
/// ```rust,ignore
/// use corpusqa::ollama::OllamaEmbedder;
///
/// let embedder = OllamaEmbedder::new();
/// let embedding = embedder.embed("hello world").await?;
/// ```
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl Default for OllamaEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaEmbedder {
    /// Create an embedder for `nomic-embed-text` on `http://localhost:11434`.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_EMBED_MODEL.into(),
            dimensions: DEFAULT_EMBED_DIMENSIONS,
        }
    }

    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the embedding model and the dimensionality it produces.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = PROVIDER, model = %self.model, text_len = text.len(), "embedding text");

        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingsRequest { model: &self.model, prompt: text };

        let response =
            self.client.post(&url).json(&request).send().await.map_err(|e| {
                error!(provider = PROVIDER, error = %e, "embeddings request failed");
                QaError::Embedding {
                    provider: PROVIDER.into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = PROVIDER, %status, "embeddings API error");
            return Err(QaError::Embedding {
                provider: PROVIDER.into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            QaError::Embedding {
                provider: PROVIDER.into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(parsed.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`Generator`] backed by the Ollama `/api/generate` endpoint.
///
/// Renders the fixed context/question prompt template and requests a
/// non-streaming completion. An unreachable server surfaces
/// [`QaError::Generation`]; there is no automatic retry.
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaGenerator {
    /// Create a generator for `llama3.2` on `http://localhost:11434`.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_GENERATE_MODEL.into(),
        }
    }

    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the generation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, context: &str, question: &str) -> Result<Answer> {
        let prompt = render_prompt(context, question);
        debug!(provider = PROVIDER, model = %self.model, prompt_len = prompt.len(), "generating answer");

        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest { model: &self.model, prompt: &prompt, stream: false };

        let response =
            self.client.post(&url).json(&request).send().await.map_err(|e| {
                error!(provider = PROVIDER, error = %e, "generate request failed");
                QaError::Generation {
                    provider: PROVIDER.into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(provider = PROVIDER, %status, "generate API error");
            return Err(QaError::Generation {
                provider: PROVIDER.into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            QaError::Generation {
                provider: PROVIDER.into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(Answer { text: parsed.response })
    }
}
