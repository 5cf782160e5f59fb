use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardZonesConfig {
    #[serde(default = "default_file")]
    pub file: String,

    #[serde(default = "default_kv_key")]
    pub kv_key: String,

    /// Program plus arguments run after every successful file write.
    #[serde(default = "default_reload_command")]
    pub reload_command: Vec<String>,

    #[serde(default = "default_reverse_zone")]
    pub reverse_zone: String,

    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ForwardZonesConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            kv_key: default_kv_key(),
            reload_command: default_reload_command(),
            reverse_zone: default_reverse_zone(),
            max_search_results: default_max_search_results(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_file() -> String {
    "/etc/powerdns/forward-zones.conf".to_string()
}

fn default_kv_key() -> String {
    "forward-zones".to_string()
}

fn default_reload_command() -> Vec<String> {
    vec![
        "systemctl".to_string(),
        "restart".to_string(),
        "pdns-recursor".to_string(),
    ]
}

fn default_reverse_zone() -> String {
    "10.in-addr.arpa.".to_string()
}

fn default_max_search_results() -> usize {
    10
}

fn default_max_in_flight() -> usize {
    32
}
