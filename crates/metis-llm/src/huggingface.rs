//! HuggingFace backend (placeholder).

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::router::{count_tokens, GenerateOptions, Generation, LlmProvider};

/// Placeholder HuggingFace provider.
pub struct HuggingFaceProvider {
    model: String,
}

impl HuggingFaceProvider {
    /// Create a provider for the configured model id.
    pub fn new(model: String) -> Self {
        Self { model }
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Generation> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(Generation {
            text: format!("[HuggingFace echo]: {prompt}"),
            provider: Some("huggingface".to_owned()),
            metadata: serde_json::json!({
                "model": self.model,
                "tokens": count_tokens(prompt),
                "options": options,
            }),
        })
    }
}
