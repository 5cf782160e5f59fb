use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use zonesync_domain::{DomainError, PropagationRequest, ServiceIdentity, ServiceInstance};

pub trait PeerStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> PeerStream for T {}

pub type BoxedPeerStream = Box<dyn PeerStream>;

/// Opens a connection only when the peer proves `expected`; fails closed
/// otherwise.
#[async_trait]
pub trait SecureDialer: Send + Sync {
    async fn dial(
        &self,
        peer: &ServiceInstance,
        expected: &ServiceIdentity,
    ) -> Result<BoxedPeerStream, DomainError>;
}

/// Delivers one propagation request to one peer and checks the status.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn send(
        &self,
        peer: &ServiceInstance,
        expected: &ServiceIdentity,
        request: &PropagationRequest,
    ) -> Result<(), DomainError>;
}
