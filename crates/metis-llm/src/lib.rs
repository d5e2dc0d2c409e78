//! Metis LLM - Text Generation Provider Abstraction
//!
//! This crate provides the `generate(prompt, options) -> text` seam for
//! Metis. Every backend is a placeholder that returns a canned echo
//! string; the router walks the configured chain and falls back to demo
//! mode when nothing else is available:
//! - OpenAI: enabled by `openai_api_key`
//! - HuggingFace: enabled by `hf_model`
//! - LLaMA local: enabled by `llama_path`
//! - Demo: no external dependencies, always works

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod demo;
pub mod error;
pub mod huggingface;
pub mod llama;
pub mod openai;
pub mod router;

pub use demo::DemoProvider;
pub use error::{Error, Result};
pub use huggingface::HuggingFaceProvider;
pub use llama::LlamaProvider;
pub use openai::OpenAiProvider;
pub use router::{GenerateOptions, Generation, LlmProvider, ProviderRouter, ProviderSettings};
