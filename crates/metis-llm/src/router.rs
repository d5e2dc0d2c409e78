//! Provider trait, settings, and the ordered fallback chain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::{DemoProvider, HuggingFaceProvider, LlamaProvider, OpenAiProvider};

/// Generation tuning options passed through to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Completion length cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Generated text plus backend attribution.
///
/// `provider` is `None` only on the exhaustion payload (every backend in
/// the chain failed) — exhaustion is data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text
    pub text: String,
    /// Backend that produced the text
    pub provider: Option<String>,
    /// Backend-specific details (model, token count, ...)
    pub metadata: serde_json::Value,
}

/// Text-generation backend seam.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Backend name ("openai", "huggingface", "llama_local", "demo_mode").
    fn name(&self) -> &str;

    /// Produce text for the prompt.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Generation>;
}

/// Provider configuration section (`[llm]` in config files).
///
/// Each backend is enabled by the presence of its setting. The timeout
/// is declared for parity with a real deployment; the placeholder
/// backends never take long enough to hit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Enables the OpenAI backend
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Enables the HuggingFace backend
    #[serde(default)]
    pub hf_model: Option<String>,
    /// Enables the local LLaMA backend
    #[serde(default)]
    pub llama_path: Option<String>,
    /// Request deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            hf_model: None,
            llama_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Ordered fallback chain over the configured backends.
pub struct ProviderRouter {
    providers: Vec<Arc<dyn LlmProvider>>,
}

impl ProviderRouter {
    /// Build the chain from settings. Demo mode is appended only when no
    /// real backend is configured, so there is always at least one entry.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();
        if let Some(key) = &settings.openai_api_key {
            providers.push(Arc::new(OpenAiProvider::new(key.clone())));
        }
        if let Some(model) = &settings.hf_model {
            providers.push(Arc::new(HuggingFaceProvider::new(model.clone())));
        }
        if let Some(path) = &settings.llama_path {
            providers.push(Arc::new(LlamaProvider::new(path.clone())));
        }
        if providers.is_empty() {
            providers.push(Arc::new(DemoProvider::new()));
        }
        Self { providers }
    }

    /// Names of the chain entries, in fallback order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Walk the chain until a backend produces text.
    ///
    /// Backend failures are logged and skipped; if every backend fails
    /// the exhaustion payload (`provider: null`) is returned rather than
    /// an error.
    pub async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Generation {
        for provider in &self.providers {
            match provider.generate(prompt, options).await {
                Ok(generation) => {
                    debug!(provider = provider.name(), "Generation complete");
                    return generation;
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider failed, trying next");
                }
            }
        }
        Generation {
            text: "[ERROR] No provider available".to_owned(),
            provider: None,
            metadata: serde_json::json!({ "error": "All providers failed" }),
        }
    }
}

/// Whitespace token count used by the placeholder backends' metadata.
pub(crate) fn count_tokens(prompt: &str) -> usize {
    prompt.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct BrokenProvider;

    #[async_trait]
    impl LlmProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        async fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> Result<Generation> {
            Err(Error::Generation {
                provider: "broken".into(),
                message: "always down".into(),
            })
        }
    }

    #[test]
    fn test_chain_defaults_to_demo_mode() {
        let router = ProviderRouter::from_settings(&ProviderSettings::default());
        assert_eq!(router.provider_names(), ["demo_mode"]);
    }

    #[test]
    fn test_chain_order_follows_settings() {
        let settings = ProviderSettings {
            openai_api_key: Some("sk-test".into()),
            hf_model: Some("gpt2".into()),
            llama_path: Some("/models/llama".into()),
            ..ProviderSettings::default()
        };
        let router = ProviderRouter::from_settings(&settings);
        assert_eq!(
            router.provider_names(),
            ["openai", "huggingface", "llama_local"]
        );
    }

    #[tokio::test]
    async fn test_generate_via_demo_mode() {
        let router = ProviderRouter::from_settings(&ProviderSettings::default());
        let generation = router.generate("hello world", &GenerateOptions::default()).await;

        assert_eq!(generation.text, "[Demo echo]: hello world");
        assert_eq!(generation.provider.as_deref(), Some("demo_mode"));
        assert_eq!(generation.metadata["tokens"], 2);
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_null_provider() {
        let router = ProviderRouter {
            providers: vec![Arc::new(BrokenProvider)],
        };
        let generation = router.generate("hello", &GenerateOptions::default()).await;

        assert_eq!(generation.text, "[ERROR] No provider available");
        assert!(generation.provider.is_none());
        assert_eq!(generation.metadata["error"], "All providers failed");
    }
}
