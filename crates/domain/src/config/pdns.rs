use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PdnsConfig {
    #[serde(default = "default_auth")]
    pub auth: PdnsEndpoint,

    #[serde(default = "default_recursor")]
    pub recursor: PdnsEndpoint,
}

impl Default for PdnsConfig {
    fn default() -> Self {
        Self {
            auth: default_auth(),
            recursor: default_recursor(),
        }
    }
}

/// HTTP API of one PowerDNS process.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PdnsEndpoint {
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_auth() -> PdnsEndpoint {
    PdnsEndpoint {
        base_url: "http://127.0.0.1:8081".to_string(),
        api_key: String::new(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_recursor() -> PdnsEndpoint {
    PdnsEndpoint {
        base_url: "http://127.0.0.1:8082".to_string(),
        api_key: String::new(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    10
}
