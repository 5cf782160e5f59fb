use async_trait::async_trait;
use rustls::pki_types::ServerName;
use rustls::{CertificateError, Error as TlsError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tokio_rustls::TlsConnector;
use tracing::debug;
use zonesync_application::ports::{BoxedPeerStream, SecureDialer};
use zonesync_domain::{DomainError, ServiceIdentity, ServiceInstance};

use super::tls_material::TlsMaterial;

/// Dials peers over mutual TLS and fails closed unless the peer proves the
/// expected service identity.
pub struct MtlsDialer {
    material: Arc<TlsMaterial>,
    connect_timeout: Duration,
    connectors: RwLock<HashMap<String, TlsConnector>>,
}

impl MtlsDialer {
    pub fn new(material: Arc<TlsMaterial>, connect_timeout: Duration) -> Self {
        Self {
            material,
            connect_timeout,
            connectors: RwLock::new(HashMap::new()),
        }
    }

    async fn connector_for(&self, expected: &ServiceIdentity) -> Result<TlsConnector, DomainError> {
        let uri = expected.uri();
        if let Some(connector) = self.connectors.read().await.get(&uri) {
            return Ok(connector.clone());
        }

        let connector = TlsConnector::from(self.material.client_config(expected)?);
        self.connectors
            .write()
            .await
            .insert(uri, connector.clone());
        Ok(connector)
    }
}

#[async_trait]
impl SecureDialer for MtlsDialer {
    async fn dial(
        &self,
        peer: &ServiceInstance,
        expected: &ServiceIdentity,
    ) -> Result<BoxedPeerStream, DomainError> {
        let connector = self.connector_for(expected).await?;
        let target = peer.authority();

        let server_name = ServerName::try_from(peer.address.clone()).map_err(|e| {
            DomainError::Transport {
                peer: target.clone(),
                message: format!("Invalid peer address '{}': {}", peer.address, e),
            }
        })?;

        let tcp_stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&target))
            .await
            .map_err(|_| DomainError::Timeout(format!("Timeout connecting to peer {}", target)))?
            .map_err(|e| DomainError::Transport {
                peer: target.clone(),
                message: format!("Connection refused: {}", e),
            })?;

        let tls_stream = tokio::time::timeout(
            self.connect_timeout,
            connector.connect(server_name, tcp_stream),
        )
        .await
        .map_err(|_| DomainError::Timeout(format!("Timeout during TLS handshake with {}", target)))?
        .map_err(|e| handshake_error(&target, expected, e))?;

        debug!(peer = %target, identity = %expected, "Mutual TLS connection established");
        Ok(Box::new(tls_stream))
    }
}

fn handshake_error(peer: &str, expected: &ServiceIdentity, e: std::io::Error) -> DomainError {
    let identity_rejected = e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<TlsError>())
        .is_some_and(|tls| {
            matches!(
                tls,
                TlsError::InvalidCertificate(CertificateError::ApplicationVerificationFailure)
            )
        });

    if identity_rejected {
        DomainError::IdentityMismatch {
            peer: peer.to_string(),
            expected: expected.uri(),
        }
    } else {
        DomainError::Transport {
            peer: peer.to_string(),
            message: format!("TLS handshake failed: {}", e),
        }
    }
}
