//! Controller: registry, concurrent dispatch, and bookkeeping.
//!
//! One `Controller` is constructed at process start and shared with
//! every request handler; there are no module-level singletons. The
//! registry is read-mostly, history and upgrade queue serialize their
//! mutations behind locks so concurrent dispatches stay consistent.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

mod dispatch;
mod history;
mod registry;
mod types;
mod upgrades;

pub use types::{
    AgentOutcome, AgentReport, AgentStatus, AgentStatusView, Context, ControllerConfig,
    ControllerStatus, DispatchResult, ExecutionRecord, UpgradeRequest, UpgradeStatus,
};

use crate::agent::Agent;
use crate::error::{Error, Result};
use history::HistoryLedger;
use registry::Registry;
use upgrades::UpgradeQueue;

/// Central controller owning the agent registry, the execution history
/// ledger, and the upgrade-request queue.
pub struct Controller {
    registry: RwLock<Registry>,
    history: Mutex<HistoryLedger>,
    upgrades: Mutex<UpgradeQueue>,
    config: ControllerConfig,
}

impl Controller {
    /// Create a controller with the given configuration.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            history: Mutex::new(HistoryLedger::new(config.max_history)),
            upgrades: Mutex::new(UpgradeQueue::default()),
            config,
        }
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Register an agent under its own name (silent last-write-wins).
    ///
    /// Returns the updated agent count. Registering a NEW name past
    /// `max_agents` fails; replacing an existing one always succeeds.
    pub async fn register(&self, agent: Arc<dyn Agent>) -> Result<usize> {
        let name = agent.name().to_owned();
        let mut registry = self.registry.write().await;
        if self.config.max_agents > 0
            && !registry.contains(&name)
            && registry.len() >= self.config.max_agents
        {
            return Err(Error::AgentLimitReached {
                max: self.config.max_agents,
            });
        }
        let replaced = registry.insert(name.clone(), agent);
        info!(agent = %name, replaced, total = registry.len(), "Registered agent");
        Ok(registry.len())
    }

    /// Remove an agent, returning the updated count.
    pub async fn unregister(&self, name: &str) -> Result<usize> {
        let mut registry = self.registry.write().await;
        if !registry.remove(name) {
            return Err(Error::AgentNotFound {
                name: name.to_owned(),
            });
        }
        info!(agent = %name, total = registry.len(), "Unregistered agent");
        Ok(registry.len())
    }

    /// Registered names in registration order.
    pub async fn agent_names(&self) -> Vec<String> {
        self.registry.read().await.names()
    }

    /// Registered agent count.
    pub async fn agent_count(&self) -> usize {
        self.registry.read().await.len()
    }

    /// Status of a single agent, or `AgentNotFound`.
    pub async fn agent_status(&self, name: &str) -> Result<AgentReport> {
        let agent = {
            let registry = self.registry.read().await;
            registry.get(name).cloned()
        };
        match agent {
            Some(agent) => Ok(AgentReport {
                agent: name.to_owned(),
                status: agent.status().await,
                last_result: agent.last_result().await,
            }),
            None => Err(Error::AgentNotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// Full read-only aggregation for the status/health endpoints.
    pub async fn status(&self) -> ControllerStatus {
        let snapshot: Vec<(String, Arc<dyn Agent>)> = {
            let registry = self.registry.read().await;
            registry
                .iter()
                .map(|(n, a)| (n.to_owned(), a.clone()))
                .collect()
        };

        let mut agents = std::collections::BTreeMap::new();
        for (name, agent) in snapshot {
            agents.insert(
                name,
                AgentStatusView {
                    status: agent.status().await,
                    last_result: agent.last_result().await,
                },
            );
        }
        let total_agents = agents.len();

        ControllerStatus {
            agents,
            total_agents,
            upgrade_requests: self.upgrades.lock().await.all().to_vec(),
            execution_history_size: self.history.lock().await.len(),
            controller_status: "active",
        }
    }

    /// Submit an upgrade request on behalf of `user`.
    pub async fn submit_upgrade(&self, user: &str, proposal: &str) -> UpgradeRequest {
        let request = self.upgrades.lock().await.submit(user, proposal);
        info!(id = request.id, user = %request.user, "Upgrade request submitted");
        request
    }

    /// Approve request `id` (overwrites any previous resolution).
    pub async fn approve_upgrade(&self, id: usize) -> Result<UpgradeRequest> {
        self.upgrades
            .lock()
            .await
            .set_status(id, UpgradeStatus::Approved)
    }

    /// Reject request `id` (overwrites any previous resolution).
    pub async fn reject_upgrade(&self, id: usize) -> Result<UpgradeRequest> {
        self.upgrades
            .lock()
            .await
            .set_status(id, UpgradeStatus::Rejected)
    }

    /// Every upgrade request ever submitted, in id order.
    pub async fn upgrade_requests(&self) -> Vec<UpgradeRequest> {
        self.upgrades.lock().await.all().to_vec()
    }

    /// Number of execution records currently retained.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Clone out the retained execution records, oldest first.
    pub async fn history_snapshot(&self) -> Vec<ExecutionRecord> {
        self.history.lock().await.snapshot()
    }

    pub(crate) async fn record_execution(&self, record: ExecutionRecord) {
        self.history.lock().await.append(record);
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
