use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::Request;
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tracing::debug;
use zonesync_application::ports::{PeerTransport, SecureDialer};
use zonesync_domain::{DomainError, PropagationRequest, ServiceIdentity, ServiceInstance};

const MAX_ERROR_BODY: usize = 512;

/// Sends a propagation request as one HTTP/1.1 exchange over a freshly
/// dialed, identity-checked connection.
pub struct HttpsPeerTransport {
    dialer: Arc<dyn SecureDialer>,
}

impl HttpsPeerTransport {
    pub fn new(dialer: Arc<dyn SecureDialer>) -> Self {
        Self { dialer }
    }
}

#[async_trait]
impl PeerTransport for HttpsPeerTransport {
    async fn send(
        &self,
        peer: &ServiceInstance,
        expected: &ServiceIdentity,
        request: &PropagationRequest,
    ) -> Result<(), DomainError> {
        let target = peer.authority();
        let transport_err = |message: String| DomainError::Transport {
            peer: target.clone(),
            message,
        };

        let stream = self.dialer.dial(peer, expected).await?;

        let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| transport_err(format!("HTTP handshake failed: {}", e)))?;

        let conn_peer = target.clone();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!(peer = %conn_peer, error = %e, "Peer connection closed with error");
            }
        });

        let body = Full::new(Bytes::from(request.body.clone().unwrap_or_default()));
        let http_request = Request::builder()
            .method(request.method.as_str())
            .uri(&request.path)
            .header(HOST, &target)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| transport_err(format!("Invalid request: {}", e)))?;

        let response = sender
            .send_request(http_request)
            .await
            .map_err(|e| transport_err(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .unwrap_or_default();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let detail: String = text.trim().chars().take(MAX_ERROR_BODY).collect();
            return Err(DomainError::RemoteApply {
                peer: target,
                status: status.as_u16(),
                message: if detail.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    detail
                },
            });
        }

        debug!(peer = %target, method = %request.method, path = %request.path, status = status.as_u16(), "Peer accepted request");
        Ok(())
    }
}
