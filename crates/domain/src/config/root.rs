use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::access::AccessConfig;
use super::consul::ConsulConfig;
use super::errors::ConfigError;
use super::forward_zones::ForwardZonesConfig;
use super::http::{default_internal_http, default_public_http, HttpConfig};
use super::logging::LoggingConfig;
use super::pdns::PdnsConfig;
use super::tls::TlsConfig;

/// Which half of the control plane this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Public API: validates, authorizes and broadcasts mutations.
    Api,
    /// Fleet member: applies mutations to its local resolver.
    #[default]
    Worker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Api => f.write_str("api"),
            Role::Worker => f.write_str("worker"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(Role::Api),
            "worker" => Ok(Role::Worker),
            other => Err(ConfigError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub role: Role,

    #[serde(default = "default_environment")]
    pub environment: String,

    /// Budget for one peer attempt and for one nameserver call.
    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,

    #[serde(default = "default_public_http")]
    pub public_http: HttpConfig,

    #[serde(default = "default_internal_http")]
    pub internal_http: HttpConfig,

    #[serde(default)]
    pub pdns: PdnsConfig,

    #[serde(default)]
    pub consul: ConsulConfig,

    #[serde(default)]
    pub tls: TlsConfig,

    #[serde(default)]
    pub forward_zones: ForwardZonesConfig,

    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: Role::default(),
            environment: default_environment(),
            backend_timeout_secs: default_backend_timeout_secs(),
            public_http: default_public_http(),
            internal_http: default_internal_http(),
            pdns: PdnsConfig::default(),
            consul: ConsulConfig::default(),
            tls: TlsConfig::default(),
            forward_zones: ForwardZonesConfig::default(),
            access: AccessConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zonesync.toml in current directory
    /// 3. /etc/zonesync/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(role) = overrides.role {
            self.role = role;
        }
        if let Some(port) = overrides.public_port {
            self.public_http.port = port;
        }
        if let Some(port) = overrides.internal_port {
            self.internal_http.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.public_http.bind_address = bind.clone();
            self.internal_http.bind_address = bind;
        }
        if let Some(file) = overrides.forward_zones_file {
            self.forward_zones.file = file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_http.port == 0 || self.internal_http.port == 0 {
            return Err(ConfigError::Validation("HTTP ports cannot be 0".to_string()));
        }

        if self.public_http.port == self.internal_http.port
            && self.public_http.bind_address == self.internal_http.bind_address
        {
            return Err(ConfigError::Validation(
                "Public and internal listeners cannot share an address".to_string(),
            ));
        }

        if self.backend_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.forward_zones.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "forward_zones.max_in_flight must be at least 1".to_string(),
            ));
        }

        if self.forward_zones.file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "forward_zones.file cannot be empty".to_string(),
            ));
        }

        if self.forward_zones.kv_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "forward_zones.kv_key cannot be empty".to_string(),
            ));
        }

        if !self.forward_zones.reverse_zone.ends_with('.') {
            return Err(ConfigError::Validation(format!(
                "forward_zones.reverse_zone '{}' must be canonical",
                self.forward_zones.reverse_zone
            )));
        }

        if self.access.enabled && self.access.allowed_uids.is_empty() {
            return Err(ConfigError::Validation(
                "access.enabled requires at least one allowed uid".to_string(),
            ));
        }

        Ok(())
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("zonesync.toml").exists() {
            Some("zonesync.toml".to_string())
        } else if std::path::Path::new("/etc/zonesync/config.toml").exists() {
            Some("/etc/zonesync/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub role: Option<Role>,
    pub public_port: Option<u16>,
    pub internal_port: Option<u16>,
    pub bind_address: Option<String>,
    pub forward_zones_file: Option<String>,
    pub log_level: Option<String>,
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    10
}
