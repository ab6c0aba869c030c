//! Configuration file types for Coffee Chats.
//!
//! `FileConfig` mirrors the optional `config.toml`. Every field has a
//! default, so an empty or missing file means "talk to a local backend with
//! empty static credentials".

use serde::{Deserialize, Serialize};

/// Default backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Top-level shape of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub auth: AuthSettings,
}

/// Where the backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Static Basic Auth credentials.
///
/// When `basic` is true the `Authorization` header is sent on every request,
/// even if username and password are both empty.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_basic")]
    pub basic: bool,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

fn default_basic() -> bool {
    true
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            basic: default_basic(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("basic", &self.basic)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
