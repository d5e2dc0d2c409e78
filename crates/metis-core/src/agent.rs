//! Agent seam: the `Agent` trait and the placeholder echo implementation.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::controller::{AgentOutcome, AgentStatus, Context};

/// How much of the prompt the echo response repeats back.
const PROMPT_PREVIEW_CHARS: usize = 50;

/// A named unit of work.
///
/// Implementations must recover their own failures: `run` returns a
/// `Failed` outcome instead of panicking, and leaves the agent in
/// `Error` status. The dispatcher still defends against implementations
/// that break this contract.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Immutable identity key.
    fn name(&self) -> &str;

    /// Current lifecycle status.
    async fn status(&self) -> AgentStatus;

    /// Most recent outcome, overwritten each run (not historized).
    async fn last_result(&self) -> Option<AgentOutcome>;

    /// Process a prompt. Sets status to `Running` for the duration and
    /// settles back to `Idle` (or `Error` on failure).
    async fn run(&self, prompt: &str, context: &Context) -> AgentOutcome;
}

struct AgentState {
    status: AgentStatus,
    last_result: Option<AgentOutcome>,
}

/// Placeholder agent that echoes truncated input.
///
/// Stands in for a real model-backed agent; the response is a
/// deterministic string derived from the agent name and the first
/// [`PROMPT_PREVIEW_CHARS`] characters of the prompt.
pub struct EchoAgent {
    name: String,
    state: RwLock<AgentState>,
}

impl EchoAgent {
    /// Create an idle agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(AgentState {
                status: AgentStatus::Idle,
                last_result: None,
            }),
        }
    }

    fn render_response(&self, prompt: &str) -> String {
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("[{}] processed: {}...", self.name, preview)
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn status(&self) -> AgentStatus {
        self.state.read().await.status
    }

    async fn last_result(&self) -> Option<AgentOutcome> {
        self.state.read().await.last_result.clone()
    }

    async fn run(&self, prompt: &str, context: &Context) -> AgentOutcome {
        self.state.write().await.status = AgentStatus::Running;

        // Stand-in for provider I/O in a real implementation.
        tokio::task::yield_now().await;

        let outcome = AgentOutcome::Success {
            agent: self.name.clone(),
            prompt: prompt.to_owned(),
            response: self.render_response(prompt),
            context_used: context.keys().cloned().collect(),
        };

        let mut state = self.state.write().await;
        state.last_result = Some(outcome.clone());
        state.status = AgentStatus::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_agent_run_success() {
        let agent = EchoAgent::new("Aelira");
        let mut context = Context::new();
        context.insert("user".into(), serde_json::json!("alice"));

        let outcome = agent.run("hello", &context).await;

        match &outcome {
            AgentOutcome::Success {
                agent: name,
                prompt,
                response,
                context_used,
            } => {
                assert_eq!(name, "Aelira");
                assert_eq!(prompt, "hello");
                assert_eq!(response, "[Aelira] processed: hello...");
                assert_eq!(context_used, &["user".to_string()]);
            }
            AgentOutcome::Failed { .. } => panic!("echo agent should not fail"),
        }
        assert_eq!(agent.status().await, AgentStatus::Idle);
        assert_eq!(agent.last_result().await, Some(outcome));
    }

    #[tokio::test]
    async fn test_echo_agent_truncates_long_prompts() {
        let agent = EchoAgent::new("Zyra");
        let prompt = "x".repeat(200);

        let outcome = agent.run(&prompt, &Context::new()).await;

        let AgentOutcome::Success { response, .. } = outcome else {
            panic!("expected success");
        };
        assert_eq!(response, format!("[Zyra] processed: {}...", "x".repeat(50)));
    }

    #[tokio::test]
    async fn test_fresh_agent_is_idle_with_no_result() {
        let agent = EchoAgent::new("Orryn");
        assert_eq!(agent.status().await, AgentStatus::Idle);
        assert!(agent.last_result().await.is_none());
    }
}
