pub mod cache;
pub mod forward_zone;
pub mod system;

pub use cache::{FlushCacheQuery, FleetFlushResponse};
pub use forward_zone::{parse_zone, parse_zone_set, parse_zone_patch};
pub use system::{HealthResponse, VersionResponse};
