//! Adapters behind the application ports: PowerDNS, Consul, the forward-zones
//! file and the mutual TLS peer transport.
pub mod access;
pub mod consul;
pub mod forward_zones;
pub mod pdns;
pub mod transport;
