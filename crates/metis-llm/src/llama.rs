//! Local LLaMA backend (placeholder).

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::router::{count_tokens, GenerateOptions, Generation, LlmProvider};

/// Placeholder local LLaMA provider.
pub struct LlamaProvider {
    model_path: String,
}

impl LlamaProvider {
    /// Create a provider for the configured weights path.
    pub fn new(model_path: String) -> Self {
        Self { model_path }
    }
}

#[async_trait]
impl LlmProvider for LlamaProvider {
    fn name(&self) -> &str {
        "llama_local"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Generation> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(Generation {
            text: format!("[LLaMA echo]: {prompt}"),
            provider: Some("llama_local".to_owned()),
            metadata: serde_json::json!({
                "model": self.model_path,
                "tokens": count_tokens(prompt),
                "options": options,
            }),
        })
    }
}
