use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessConfig {
    /// When false every caller that identifies itself is allowed.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub allowed_uids: Vec<String>,
}
