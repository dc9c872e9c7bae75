use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the records service (e.g., "http://127.0.0.1:8000/").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeouts: TimeoutSettings,
    #[serde(default)]
    pub page: PageSettings,
}

/// Transport timeouts, applied to every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutSettings {
    /// Connection timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub connect_seconds: u64,
    /// Read timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub read_seconds: u64,
    /// Write timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub write_seconds: u64,
}

/// Skip/limit passed through on list calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_limit() -> u32 {
    100
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeouts: TimeoutSettings::default(),
            page: PageSettings::default(),
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            connect_seconds: default_timeout(),
            read_seconds: default_timeout(),
            write_seconds: default_timeout(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}
