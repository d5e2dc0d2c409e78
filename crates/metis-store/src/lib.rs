//! Metis Store - In-Memory Persistence Helpers
//!
//! Process-lifetime storage for conversations, messages, executions,
//! and users. Everything lives in RwLock-guarded maps; a restart loses
//! all contents. This is the development-stage stand-in for a real
//! database, exposed as opaque create/read/update operations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod types;

pub use types::{Conversation, ExecutionRow, ExecutionStatus, MessageRecord, StoreStats, UserRecord};

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory database.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<HashMap<String, Vec<MessageRecord>>>,
    conversations: RwLock<HashMap<Uuid, Conversation>>,
    executions: RwLock<HashMap<Uuid, ExecutionRow>>,
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Append a message to a conversation (created implicitly).
    pub async fn add_message(
        &self,
        conversation_id: &str,
        text: &str,
        sender: &str,
        character: Option<&str>,
    ) -> MessageRecord {
        let record = MessageRecord {
            id: Uuid::new_v4(),
            text: text.to_owned(),
            sender: sender.to_owned(),
            character: character.map(str::to_owned),
            timestamp: Utc::now(),
        };
        self.messages
            .write()
            .await
            .entry(conversation_id.to_owned())
            .or_default()
            .push(record.clone());
        record
    }

    /// Messages in a conversation, oldest first, capped at `limit`
    /// most recent entries when given.
    pub async fn messages(&self, conversation_id: &str, limit: Option<usize>) -> Vec<MessageRecord> {
        let messages = self.messages.read().await;
        let all = messages.get(conversation_id).cloned().unwrap_or_default();
        match limit {
            Some(limit) if all.len() > limit => all[all.len() - limit..].to_vec(),
            _ => all,
        }
    }

    /// Drop every message in a conversation. False if it had none.
    pub async fn clear_messages(&self, conversation_id: &str) -> bool {
        self.messages
            .write()
            .await
            .remove(conversation_id)
            .is_some()
    }

    // ------------------------------------------------------------------
    // Conversations
    // ------------------------------------------------------------------

    /// Create a conversation shell between a user and an agent.
    pub async fn create_conversation(&self, user_id: &str, agent_id: &str) -> Conversation {
        let now = Utc::now();
        let conversation = Conversation {
            id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            agent_id: agent_id.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation.clone());
        conversation
    }

    /// Look up a conversation by id.
    pub async fn conversation(&self, id: Uuid) -> Option<Conversation> {
        self.conversations.read().await.get(&id).cloned()
    }

    // ------------------------------------------------------------------
    // Executions
    // ------------------------------------------------------------------

    /// Record a pending execution.
    pub async fn record_execution(&self, agent_id: &str, prompt: &str) -> ExecutionRow {
        let row = ExecutionRow {
            id: Uuid::new_v4(),
            agent_id: agent_id.to_owned(),
            prompt: prompt.to_owned(),
            result: None,
            status: ExecutionStatus::Pending,
            started_at: Utc::now(),
            updated_at: None,
        };
        self.executions.write().await.insert(row.id, row.clone());
        row
    }

    /// Look up an execution by id.
    pub async fn execution(&self, id: Uuid) -> Option<ExecutionRow> {
        self.executions.read().await.get(&id).cloned()
    }

    /// Update an execution's status and result. False if the id is
    /// unknown.
    pub async fn update_execution(
        &self,
        id: Uuid,
        status: ExecutionStatus,
        result: Option<&str>,
    ) -> bool {
        let mut executions = self.executions.write().await;
        match executions.get_mut(&id) {
            Some(row) => {
                row.status = status;
                row.result = result.map(str::to_owned);
                row.updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Create a user.
    pub async fn create_user(&self, username: &str, email: Option<&str>) -> UserRecord {
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.map(str::to_owned),
            created_at: Utc::now(),
        };
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    /// Look up a user by id.
    pub async fn user(&self, id: Uuid) -> Option<UserRecord> {
        self.users.read().await.get(&id).cloned()
    }

    /// Find a user by name, creating them on first sight.
    pub async fn ensure_user(&self, username: &str) -> UserRecord {
        {
            let users = self.users.read().await;
            if let Some(user) = users.values().find(|u| u.username == username) {
                return user.clone();
            }
        }
        self.create_user(username, None).await
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Aggregate row counts.
    pub async fn stats(&self) -> StoreStats {
        StoreStats {
            total_messages: self.messages.read().await.values().map(Vec::len).sum(),
            total_conversations: self.conversations.read().await.len(),
            total_executions: self.executions.read().await.len(),
            total_users: self.users.read().await.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_message_round_trip() {
        let store = MemoryStore::new();
        store.add_message("main", "hello", "user", None).await;
        store
            .add_message("main", "hi there", "agent", Some("aelira"))
            .await;

        let messages = store.messages("main", None).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].character.as_deref(), Some("aelira"));
    }

    #[tokio::test]
    async fn test_messages_limit_keeps_most_recent() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .add_message("main", &format!("m{i}"), "user", None)
                .await;
        }

        let recent = store.messages("main", Some(2)).await;
        let texts: Vec<_> = recent.iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, ["m3", "m4"]);
    }

    #[tokio::test]
    async fn test_clear_messages() {
        let store = MemoryStore::new();
        store.add_message("main", "hello", "user", None).await;

        assert!(store.clear_messages("main").await);
        assert!(!store.clear_messages("main").await);
        assert!(store.messages("main", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_execution_lifecycle() {
        let store = MemoryStore::new();
        let row = store.record_execution("aelira", "say hi").await;
        assert_eq!(row.status, ExecutionStatus::Pending);

        assert!(
            store
                .update_execution(row.id, ExecutionStatus::Completed, Some("hi"))
                .await
        );
        let updated = store.execution(row.id).await.unwrap();
        assert_eq!(updated.status, ExecutionStatus::Completed);
        assert_eq!(updated.result.as_deref(), Some("hi"));
        assert!(updated.updated_at.is_some());

        assert!(
            !store
                .update_execution(Uuid::new_v4(), ExecutionStatus::Failed, None)
                .await
        );
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.ensure_user("alice").await;
        let second = store.ensure_user("alice").await;
        assert_eq!(first.id, second.id);
        assert_eq!(store.stats().await.total_users, 1);
    }

    #[tokio::test]
    async fn test_stats_counts_everything() {
        let store = MemoryStore::new();
        store.add_message("a", "one", "user", None).await;
        store.add_message("b", "two", "user", None).await;
        store.create_conversation("alice", "aelira").await;
        store.record_execution("aelira", "go").await;
        store.create_user("alice", Some("alice@example.com")).await;

        let stats = store.stats().await;
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.total_conversations, 1);
        assert_eq!(stats.total_executions, 1);
        assert_eq!(stats.total_users, 1);
    }
}
