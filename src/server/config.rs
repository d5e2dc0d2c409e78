//! Server configuration types
//!
//! Contains all configuration structures for the Metis server. Loaded
//! by `loader::load_config` from the embedded defaults, optional config
//! files, and `METIS_`-prefixed environment variables.

use metis_llm::ProviderSettings;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: ProviderSettings,
    #[serde(default)]
    pub ws: WsSettings,
    #[serde(default)]
    pub agents: AgentSettings,
}

/// API metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_true")]
    pub debug: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            debug: true,
        }
    }
}

fn default_title() -> String {
    "Metis API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Listen address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// WebSocket settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsSettings {
    /// Seconds between keepalive pings on the console socket
    #[serde(default = "default_heartbeat")]
    pub heartbeat_secs: u64,
}

impl Default for WsSettings {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat(),
        }
    }
}

fn default_heartbeat() -> u64 {
    30
}

/// Agent registry/dispatch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Registry capacity; 0 = unlimited
    #[serde(default = "default_max_agents")]
    pub max_agents: usize,
    /// Per-agent run deadline in seconds; 0 = unbounded
    #[serde(default = "default_agent_timeout")]
    pub timeout_secs: u64,
    /// Agents registered at startup
    #[serde(default = "default_agents")]
    pub defaults: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_agents: default_max_agents(),
            timeout_secs: default_agent_timeout(),
            defaults: default_agents(),
        }
    }
}

fn default_max_agents() -> usize {
    10
}

fn default_agent_timeout() -> u64 {
    60
}

fn default_agents() -> Vec<String> {
    ["Aelira", "Zyra", "Xyron", "Orryn"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_true() -> bool {
    true
}

/// User-facing configuration view (excludes key material)
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub api_title: String,
    pub api_version: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub llm_providers: ProviderFlags,
    pub max_agents: usize,
}

/// Which LLM backends are configured (never the credentials themselves)
#[derive(Debug, Clone, Serialize)]
pub struct ProviderFlags {
    pub openai: bool,
    pub huggingface: bool,
    pub llama_local: bool,
}

impl AppConfig {
    /// Build the sanitized `/config` payload.
    pub fn sanitized(&self) -> ConfigView {
        ConfigView {
            api_title: self.api.title.clone(),
            api_version: self.api.version.clone(),
            debug: self.api.debug,
            host: self.server.host.clone(),
            port: self.server.port,
            llm_providers: ProviderFlags {
                openai: self.llm.openai_api_key.is_some(),
                huggingface: self.llm.hf_model.is_some(),
                llama_local: self.llm.llama_path.is_some(),
            },
            max_agents: self.agents.max_agents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.title, "Metis API");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.agents.max_agents, 10);
        assert_eq!(config.agents.defaults.len(), 4);
    }

    #[test]
    fn test_sanitized_view_hides_keys() {
        let mut config = AppConfig::default();
        config.llm.openai_api_key = Some("sk-secret".into());

        let view = config.sanitized();
        assert!(view.llm_providers.openai);
        assert!(!view.llm_providers.huggingface);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
