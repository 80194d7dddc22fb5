//! Answer generation strategies.
//!
//! The pipeline is polymorphic over [`Generator`]: the variant is chosen
//! once at configuration time (see [`GenerationMode`](crate::config::GenerationMode)),
//! never per request. [`MockGenerator`] echoes the retrieved context
//! verbatim, which makes retrieval quality testable without a model;
//! [`OllamaGenerator`](crate::ollama::OllamaGenerator) prompts a local
//! generative model.

use async_trait::async_trait;

use crate::document::Answer;
use crate::error::Result;

/// A strategy for producing an answer from retrieved context and a question.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer grounded in `context` for `question`.
    async fn generate(&self, context: &str, question: &str) -> Result<Answer>;
}

/// Render the prompt handed to a generative model.
///
/// One template for every model-backed generator, so answers stay
/// comparable across backends.
pub(crate) fn render_prompt(context: &str, question: &str) -> String {
    format!("Context: {context}\nQuestion: {question}\nAnswer:")
}

/// A [`Generator`] that returns the retrieved context verbatim.
///
/// No I/O, no randomness: for any context `C`, the answer text is exactly
/// `C` (and `""` when nothing was retrieved). Used to exercise the
/// retrieval pipeline deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    /// Create a mock generator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, context: &str, _question: &str) -> Result<Answer> {
        Ok(Answer { text: context.to_string() })
    }
}
