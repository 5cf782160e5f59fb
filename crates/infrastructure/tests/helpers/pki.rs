use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::service::TowerToHyperService;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, Ia5String,
    IsCa, KeyPair, KeyUsagePurpose, SanType,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use zonesync_domain::ServiceIdentity;
use zonesync_infrastructure::transport::TlsMaterial;

pub fn internal_identity() -> ServiceIdentity {
    ServiceIdentity::new("consul", "default", "dc1", "pdns-api-internal")
}

/// Throwaway CA issuing leaves that carry a SPIFFE URI SAN.
pub struct TestPki {
    ca_cert: Certificate,
    ca_key: KeyPair,
}

impl TestPki {
    pub fn new() -> Self {
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params.distinguished_name.push(DnType::CommonName, "zonesync test CA");
        params.key_usages = vec![
            KeyUsagePurpose::KeyCertSign,
            KeyUsagePurpose::CrlSign,
            KeyUsagePurpose::DigitalSignature,
        ];

        let ca_key = KeyPair::generate().unwrap();
        let ca_cert = params.self_signed(&ca_key).unwrap();
        Self { ca_cert, ca_key }
    }

    pub fn ca_pem(&self) -> String {
        self.ca_cert.pem()
    }

    /// PEM certificate and key for `uri`.
    pub fn issue(&self, uri: &str) -> (String, String) {
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.distinguished_name.push(DnType::CommonName, uri);
        params.subject_alt_names = vec![SanType::URI(Ia5String::try_from(uri).unwrap())];
        params.extended_key_usages = vec![
            ExtendedKeyUsagePurpose::ServerAuth,
            ExtendedKeyUsagePurpose::ClientAuth,
        ];
        params.key_usages = vec![KeyUsagePurpose::DigitalSignature];

        let key = KeyPair::generate().unwrap();
        let cert = params
            .signed_by(&key, &self.ca_cert, &self.ca_key)
            .unwrap();
        (cert.pem(), key.serialize_pem())
    }

    pub fn material(&self, uri: &str) -> TlsMaterial {
        let (cert, key) = self.issue(uri);
        TlsMaterial::from_pem(self.ca_pem().as_bytes(), cert.as_bytes(), key.as_bytes()).unwrap()
    }
}

/// Serves `router` over mutual TLS on an ephemeral local port.
pub async fn start_mtls_server(material: &TlsMaterial, router: Router) -> SocketAddr {
    let acceptor = TlsAcceptor::from(material.server_config().unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((tcp, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let router = router.clone();
            tokio::spawn(async move {
                if let Ok(tls) = acceptor.accept(tcp).await {
                    let _ = Builder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(tls), TowerToHyperService::new(router))
                        .await;
                }
            });
        }
    });

    addr
}

pub fn shared(material: TlsMaterial) -> Arc<TlsMaterial> {
    Arc::new(material)
}
