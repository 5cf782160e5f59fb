use serde::{Deserialize, Serialize};

/// One HTTP listener. The public API and the internal peer API each get one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    pub port: u16,
}

impl HttpConfig {
    pub fn public_default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: 8080,
        }
    }

    pub fn internal_default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: 8090,
        }
    }

    /// `host:port`, with IPv6 hosts bracketed.
    pub fn socket_address(&self) -> String {
        if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, self.port)
        } else {
            format!("{}:{}", self.bind_address, self.port)
        }
    }
}

pub(crate) fn default_public_http() -> HttpConfig {
    HttpConfig::public_default()
}

pub(crate) fn default_internal_http() -> HttpConfig {
    HttpConfig::internal_default()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
