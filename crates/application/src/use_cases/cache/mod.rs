mod flush_cache;
mod flush_fleet_cache;

pub use flush_cache::{FlushCacheUseCase, FLUSHED_MESSAGE};
pub use flush_fleet_cache::FlushFleetCacheUseCase;
