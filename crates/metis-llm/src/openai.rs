//! OpenAI backend (placeholder).
//!
//! Holds the configured key but never calls out; the response is a
//! canned echo shaped like a chat completion.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::router::{count_tokens, GenerateOptions, Generation, LlmProvider};

/// Placeholder OpenAI provider.
pub struct OpenAiProvider {
    #[allow(dead_code)]
    api_key: String,
}

impl OpenAiProvider {
    /// Create a provider around the configured API key.
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Generation> {
        // Simulated network round-trip.
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(Generation {
            text: format!("[OpenAI echo]: {prompt}"),
            provider: Some("openai".to_owned()),
            metadata: serde_json::json!({
                "model": "gpt-4",
                "tokens": count_tokens(prompt),
                "options": options,
            }),
        })
    }
}
