use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{ClientConfig, RootCertStore, ServerConfig};
use std::sync::Arc;
use zonesync_domain::config::TlsConfig;
use zonesync_domain::{DomainError, ServiceIdentity};

use super::spiffe_verifier::SpiffeServerVerifier;

const ALPN_HTTP1: &[u8] = b"http/1.1";
const ALPN_H2: &[u8] = b"h2";

/// CA bundle plus this node's certificate chain and key, shared by the
/// internal listener and the peer dialer.
pub struct TlsMaterial {
    roots: Arc<RootCertStore>,
    chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    provider: Arc<CryptoProvider>,
}

impl TlsMaterial {
    pub fn load(config: &TlsConfig) -> Result<Self, DomainError> {
        if !config.is_configured() {
            return Err(DomainError::ConfigError(
                "tls.ca_cert, tls.cert and tls.key are required for the internal listener"
                    .to_string(),
            ));
        }

        let ca = read_pem(&config.ca_cert)?;
        let cert = read_pem(&config.cert)?;
        let key = read_pem(&config.key)?;
        Self::from_pem(&ca, &cert, &key)
    }

    pub fn from_pem(ca_pem: &[u8], cert_pem: &[u8], key_pem: &[u8]) -> Result<Self, DomainError> {
        let mut roots = RootCertStore::empty();
        for ca in parse_certs(ca_pem, "CA bundle")? {
            roots
                .add(ca)
                .map_err(|e| DomainError::ConfigError(format!("Invalid CA certificate: {}", e)))?;
        }

        let chain = parse_certs(cert_pem, "certificate")?;

        let key = rustls_pemfile::private_key(&mut &key_pem[..])
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse private key: {}", e)))?
            .ok_or_else(|| DomainError::ConfigError("No private key found".to_string()))?;

        Ok(Self {
            roots: Arc::new(roots),
            chain,
            key,
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        })
    }

    /// Client config that presents this node's certificate and only accepts a
    /// server proving `expected`.
    pub fn client_config(&self, expected: &ServiceIdentity) -> Result<Arc<ClientConfig>, DomainError> {
        let inner = WebPkiServerVerifier::builder_with_provider(
            Arc::clone(&self.roots),
            Arc::clone(&self.provider),
        )
        .build()
        .map_err(|e| DomainError::ConfigError(format!("Failed to build TLS verifier: {}", e)))?;

        let verifier = Arc::new(SpiffeServerVerifier::new(inner, expected.uri()));

        let mut config = ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_safe_default_protocol_versions()
            .map_err(tls_config_error)?
            .dangerous()
            .with_custom_certificate_verifier(verifier)
            .with_client_auth_cert(self.chain.clone(), self.key.clone_key())
            .map_err(tls_config_error)?;
        config.alpn_protocols = vec![ALPN_HTTP1.to_vec()];

        Ok(Arc::new(config))
    }

    /// Server config that requires a client certificate issued by the CA.
    pub fn server_config(&self) -> Result<Arc<ServerConfig>, DomainError> {
        let client_verifier = WebPkiClientVerifier::builder_with_provider(
            Arc::clone(&self.roots),
            Arc::clone(&self.provider),
        )
        .build()
        .map_err(|e| DomainError::ConfigError(format!("Failed to build client verifier: {}", e)))?;

        let mut config = ServerConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_safe_default_protocol_versions()
            .map_err(tls_config_error)?
            .with_client_cert_verifier(client_verifier)
            .with_single_cert(self.chain.clone(), self.key.clone_key())
            .map_err(tls_config_error)?;
        config.alpn_protocols = vec![ALPN_H2.to_vec(), ALPN_HTTP1.to_vec()];

        Ok(Arc::new(config))
    }
}

fn read_pem(path: &str) -> Result<Vec<u8>, DomainError> {
    std::fs::read(path).map_err(|e| DomainError::ConfigError(format!("Failed to read {}: {}", path, e)))
}

fn parse_certs(pem: &[u8], what: &str) -> Result<Vec<CertificateDer<'static>>, DomainError> {
    let certs = rustls_pemfile::certs(&mut &pem[..])
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DomainError::ConfigError(format!("Failed to parse {}: {}", what, e)))?;

    if certs.is_empty() {
        return Err(DomainError::ConfigError(format!("No certificates found in {}", what)));
    }
    Ok(certs)
}

fn tls_config_error(e: rustls::Error) -> DomainError {
    DomainError::ConfigError(format!("Failed to build TLS config: {}", e))
}
