use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid forward zone: {0}")]
    InvalidForwardZone(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Forward zone not found: {0}")]
    ForwardZoneNotFound(String),

    #[error("Forward zone already exists: {0}")]
    ForwardZoneAlreadyExists(String),

    #[error("Service directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Transport error with peer {peer}: {message}")]
    Transport { peer: String, message: String },

    #[error("Peer {peer} did not present service identity {expected}")]
    IdentityMismatch { peer: String, expected: String },

    #[error("Peer {peer} rejected mutation with HTTP {status}: {message}")]
    RemoteApply {
        peer: String,
        status: u16,
        message: String,
    },

    #[error("Propagation incomplete: {failed} of {total} peers failed ({})", failures.join("; "))]
    PropagationIncomplete {
        failed: usize,
        total: usize,
        failures: Vec<String>,
    },

    #[error("Backend write failed: {0}")]
    BackendWrite(String),

    #[error("Upstream DNS server error: {0}")]
    UpstreamDns(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
