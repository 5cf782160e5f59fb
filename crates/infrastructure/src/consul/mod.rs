mod client;
mod directory;

pub use client::{ConsulClient, ServiceCheck, ServiceRegistration};
pub use directory::ConsulServiceDirectory;
