//! zonesync domain layer: forward zones, record changes and fleet peers.
pub mod config;
pub mod errors;
pub mod forward_zone;
pub mod forward_zone_set;
pub mod name;
pub mod peer;
pub mod record_set;

pub use config::{CliOverrides, Config, ConfigError, Role};
pub use errors::DomainError;
pub use forward_zone::ForwardZone;
pub use forward_zone_set::ForwardZoneSet;
pub use peer::{HttpMethod, PropagationRequest, ServiceIdentity, ServiceInstance};
pub use record_set::{
    ChangeType, FlushResult, Record, RecordType, ResourceRecordChange, SearchObjectType,
    SearchResult, ZonePatch,
};
