mod consul_kv;
mod file_backend;
mod reload;

pub use consul_kv::ConsulKvForwardZoneWriter;
pub use file_backend::FileForwardZoneBackend;
pub use reload::CommandReloader;
