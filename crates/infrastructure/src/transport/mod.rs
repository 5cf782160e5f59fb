mod mtls_dialer;
mod peer_transport;
mod spiffe_verifier;
mod tls_material;

pub use mtls_dialer::MtlsDialer;
pub use peer_transport::HttpsPeerTransport;
pub use spiffe_verifier::{uri_sans, SpiffeServerVerifier};
pub use tls_material::TlsMaterial;
