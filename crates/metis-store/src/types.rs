use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat message inside a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message id
    pub id: Uuid,
    /// Message text
    pub text: String,
    /// Who sent it ("user", "agent", "system")
    pub sender: String,
    /// Persona the message is attributed to, if any
    pub character: Option<String>,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// A user/agent conversation shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation id
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Agent the conversation is with
    pub agent_id: String,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
    /// Last mutation time (UTC)
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a stored execution row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Queued, not yet started
    Pending,
    /// In flight
    Running,
    /// Finished with a result
    Completed,
    /// Finished with an error
    Failed,
}

/// One generation/dispatch execution tracked in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRow {
    /// Execution id
    pub id: Uuid,
    /// Agent or persona that ran
    pub agent_id: String,
    /// Input prompt
    pub prompt: String,
    /// Output text, when completed
    pub result: Option<String>,
    /// Current lifecycle status
    pub status: ExecutionStatus,
    /// Start time (UTC)
    pub started_at: DateTime<Utc>,
    /// Last update time (UTC)
    pub updated_at: Option<DateTime<Utc>>,
}

/// A known user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// Optional contact address
    pub email: Option<String>,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

/// Aggregate row counts across the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    /// Messages across every conversation
    pub total_messages: usize,
    /// Conversation shells
    pub total_conversations: usize,
    /// Execution rows
    pub total_executions: usize,
    /// Known users
    pub total_users: usize,
}
