use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::types::{Context, DispatchResult, ExecutionRecord};
use super::Controller;
use crate::agent::Agent;

impl Controller {
    /// Fan a prompt out to the resolved working set and join all runs.
    ///
    /// `target_agents = None` targets every registered agent; otherwise
    /// the targets are intersected with the registry and unknown names
    /// are dropped silently. Results come back in registry enumeration
    /// order regardless of completion order, one per resolved agent; a
    /// run that panics or exceeds the per-agent deadline occupies its
    /// slot as an `{"error": ...}` entry instead of aborting siblings.
    ///
    /// An empty working set short-circuits to a single synthetic error
    /// result (listing the available names) and is not recorded in
    /// history. This method never fails.
    pub async fn run_agents(
        &self,
        prompt: &str,
        context: &Context,
        target_agents: Option<&[String]>,
    ) -> Vec<DispatchResult> {
        let resolved: Vec<(String, Arc<dyn Agent>)> = {
            let registry = self.registry.read().await;
            registry
                .iter()
                .filter(|(name, _)| match target_agents {
                    Some(targets) => targets.iter().any(|t| t == name),
                    None => true,
                })
                .map(|(name, agent)| (name.to_owned(), agent.clone()))
                .collect()
        };

        if resolved.is_empty() {
            let available = self.agent_names().await;
            warn!(?target_agents, ?available, "Dispatch resolved no agents");
            return vec![DispatchResult::Error {
                error: format!("No valid agents found. Available: {:?}", available),
            }];
        }

        debug!(agents = resolved.len(), "Dispatching prompt");

        let timeout_secs = self.config.agent_timeout_secs;
        let handles: Vec<JoinHandle<DispatchResult>> = resolved
            .iter()
            .map(|(name, agent)| {
                let name = name.clone();
                let agent = agent.clone();
                let prompt = prompt.to_owned();
                let context = context.clone();
                tokio::spawn(async move {
                    run_one(name, agent, prompt, context, timeout_secs).await
                })
            })
            .collect();

        // Join barrier: every launched run settles before we return. A
        // panicking task surfaces as a JoinError here and fills its slot.
        let results: Vec<DispatchResult> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "Agent task aborted unexpectedly");
                    DispatchResult::Error {
                        error: e.to_string(),
                    }
                }
            })
            .collect();

        let agents_run: Vec<String> = resolved.into_iter().map(|(name, _)| name).collect();
        let success = results.iter().all(DispatchResult::is_success);
        info!(
            agents = agents_run.len(),
            success, "Dispatch complete"
        );

        self.record_execution(ExecutionRecord {
            prompt: prompt.to_owned(),
            agents_run,
            results: results.clone(),
            success,
        })
        .await;

        results
    }
}

async fn run_one(
    name: String,
    agent: Arc<dyn Agent>,
    prompt: String,
    context: Context,
    timeout_secs: u64,
) -> DispatchResult {
    if timeout_secs == 0 {
        return DispatchResult::Outcome(agent.run(&prompt, &context).await);
    }
    match tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        agent.run(&prompt, &context),
    )
    .await
    {
        Ok(outcome) => DispatchResult::Outcome(outcome),
        Err(_) => {
            warn!(agent = %name, timeout_secs, "Agent run timed out");
            DispatchResult::Error {
                error: format!("Agent {name} timed out after {timeout_secs}s"),
            }
        }
    }
}
