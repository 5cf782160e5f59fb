mod access;
mod consul;
mod errors;
mod forward_zones;
mod http;
mod logging;
mod pdns;
mod root;
mod tls;

pub use access::AccessConfig;
pub use consul::ConsulConfig;
pub use errors::ConfigError;
pub use forward_zones::ForwardZonesConfig;
pub use http::HttpConfig;
pub use logging::LoggingConfig;
pub use pdns::{PdnsConfig, PdnsEndpoint};
pub use root::{CliOverrides, Config, Role};
pub use tls::TlsConfig;
