use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct FlushCacheQuery {
    #[serde(default)]
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetFlushResponse {
    pub domain: String,
    pub result: String,
}
