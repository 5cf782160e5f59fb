use serde::{Deserialize, Serialize};

/// PEM material shared by the internal listener and the peer dialer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub ca_cert: String,

    #[serde(default)]
    pub cert: String,

    #[serde(default)]
    pub key: String,
}

impl TlsConfig {
    pub fn is_configured(&self) -> bool {
        !self.ca_cert.is_empty() && !self.cert.is_empty() && !self.key.is_empty()
    }
}
