//! Demo backend: no external dependencies, never fails.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::router::{count_tokens, GenerateOptions, Generation, LlmProvider};

/// Always-available echo provider used when nothing else is configured.
#[derive(Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Create the demo provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo_mode"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Generation> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Generation {
            text: format!("[Demo echo]: {prompt}"),
            provider: Some("demo_mode".to_owned()),
            metadata: serde_json::json!({
                "model": "demo-v1",
                "mode": "development",
                "tokens": count_tokens(prompt),
                "options": options,
            }),
        })
    }
}
