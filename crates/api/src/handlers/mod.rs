pub mod cache;
pub mod forward_zones;
pub mod internal;
pub mod system;
pub mod zones;
