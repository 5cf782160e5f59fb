mod access_policy;
mod forward_zone_backend;
mod nameserver;
mod resolver_reloader;
mod secure_dialer;
mod service_directory;

pub use access_policy::{AccessAction, AccessPolicy};
pub use forward_zone_backend::{ForwardZoneSource, ForwardZoneWriter};
pub use nameserver::{AuthoritativeNameserver, CacheFlusher};
pub use resolver_reloader::ResolverReloader;
pub use secure_dialer::{BoxedPeerStream, PeerStream, PeerTransport, SecureDialer};
pub use service_directory::ServiceDirectory;
