use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context map handed to every agent in a dispatch.
///
/// Agents only ever report which keys were visible to them; values are
/// opaque JSON.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Agent lifecycle status.
///
/// Transitions idle -> running -> {idle, error}; each `run` call owns the
/// transition start to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Not currently processing
    Idle,
    /// A `run` call is in flight
    Running,
    /// The most recent `run` failed
    Error,
}

/// Outcome of one agent's `run` invocation. Never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome {
    /// Normal completion
    Success {
        /// Agent name
        agent: String,
        /// The prompt that was processed
        prompt: String,
        /// Derived response text
        response: String,
        /// Context keys visible during the run
        context_used: Vec<String>,
    },
    /// Recovered failure
    Failed {
        /// Agent name
        agent: String,
        /// Error message
        error: String,
    },
}

impl AgentOutcome {
    /// Name of the agent this outcome belongs to.
    pub fn agent(&self) -> &str {
        match self {
            AgentOutcome::Success { agent, .. } | AgentOutcome::Failed { agent, .. } => agent,
        }
    }

    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Success { .. })
    }
}

/// One slot of a dispatch result list.
///
/// Either an agent outcome, or an error the dispatcher produced itself
/// (empty working set, timeout, panic caught at the join barrier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DispatchResult {
    /// An agent ran to a (success or failed) outcome
    Outcome(AgentOutcome),
    /// Dispatcher-level error slot
    Error {
        /// Error message
        error: String,
    },
}

impl DispatchResult {
    /// True iff this slot is a successful agent outcome (carries no error).
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Outcome(outcome) if outcome.is_success())
    }
}

/// Immutable record of one dispatch, as appended to the history ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Dispatched prompt
    pub prompt: String,
    /// Resolved working set, in enumeration order
    pub agents_run: Vec<String>,
    /// One result per resolved agent
    pub results: Vec<DispatchResult>,
    /// True iff no result carries an error
    pub success: bool,
}

/// Tri-state status of an upgrade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeStatus {
    /// Awaiting review
    Pending,
    /// Approved by a reviewer
    Approved,
    /// Rejected by a reviewer
    Rejected,
}

/// Human-submitted change proposal.
///
/// `id` doubles as the queue index: requests are never removed, so ids
/// are dense and stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRequest {
    /// Dense, stable id (= index at submission time)
    pub id: usize,
    /// Submitting user
    pub user: String,
    /// Proposal text
    pub proposal: String,
    /// Current review status
    pub status: UpgradeStatus,
    /// Submission time (UTC)
    pub submitted_at: DateTime<Utc>,
}

/// Per-agent view in the controller status payload.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatusView {
    /// Current lifecycle status
    pub status: AgentStatus,
    /// Most recent outcome, overwritten each run
    pub last_result: Option<AgentOutcome>,
}

/// Single-agent status report.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    /// Agent name
    pub agent: String,
    /// Current lifecycle status
    pub status: AgentStatus,
    /// Most recent outcome, overwritten each run
    pub last_result: Option<AgentOutcome>,
}

/// Full read-only aggregation over registry, history, and upgrade queue.
#[derive(Debug, Serialize)]
pub struct ControllerStatus {
    /// Status and last result per registered agent
    pub agents: BTreeMap<String, AgentStatusView>,
    /// Registered agent count
    pub total_agents: usize,
    /// Every upgrade request ever submitted
    pub upgrade_requests: Vec<UpgradeRequest>,
    /// Number of execution records currently retained
    pub execution_history_size: usize,
    /// Fixed liveness marker
    pub controller_status: &'static str,
}

/// Controller tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Registry capacity; 0 = unlimited
    #[serde(default = "default_max_agents")]
    pub max_agents: usize,
    /// Per-agent run deadline in seconds; 0 = unbounded
    #[serde(default = "default_agent_timeout")]
    pub agent_timeout_secs: u64,
    /// History ledger capacity
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_agents() -> usize {
    10
}

fn default_agent_timeout() -> u64 {
    60
}

fn default_max_history() -> usize {
    500
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_agents: default_max_agents(),
            agent_timeout_secs: default_agent_timeout(),
            max_history: default_max_history(),
        }
    }
}
