use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use zonesync_domain::{DomainError, PropagationRequest, ServiceIdentity, ServiceInstance};

use crate::ports::{PeerTransport, ServiceDirectory};

#[derive(Debug, Clone)]
pub struct PropagatorSettings {
    /// Identity every peer must prove on its internal listener.
    pub identity: ServiceIdentity,
    /// Internal listener port; directory entries carry the public one.
    pub internal_port: u16,
    pub peer_timeout: Duration,
    pub max_in_flight: usize,
}

/// Replays one mutation against every healthy peer.
///
/// All peers are attempted and awaited, even after one has failed, so the
/// returned error lists every peer that did not apply the change. There is
/// no retry and no rollback of peers that succeeded.
pub struct FanOutPropagator {
    directory: Arc<dyn ServiceDirectory>,
    transport: Arc<dyn PeerTransport>,
    settings: PropagatorSettings,
}

impl FanOutPropagator {
    pub fn new(
        directory: Arc<dyn ServiceDirectory>,
        transport: Arc<dyn PeerTransport>,
        settings: PropagatorSettings,
    ) -> Self {
        Self {
            directory,
            transport,
            settings,
        }
    }

    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn broadcast(
        &self,
        service: &str,
        request: &PropagationRequest,
    ) -> Result<(), DomainError> {
        let instances = self.directory.healthy_instances(service).await?;

        if instances.is_empty() {
            warn!(service = %service, "No healthy peers found, nothing to propagate");
            return Ok(());
        }

        let total = instances.len();
        let permits = Arc::new(Semaphore::new(self.settings.max_in_flight.max(1)));
        let request = Arc::new(request.clone());
        let mut attempts = FuturesUnordered::new();

        for instance in instances {
            let peer = instance.with_port(self.settings.internal_port);
            let transport = Arc::clone(&self.transport);
            let identity = self.settings.identity.clone();
            let request = Arc::clone(&request);
            let permits = Arc::clone(&permits);
            let peer_timeout = self.settings.peer_timeout;

            let task_peer = peer.clone();
            let handle = tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| DomainError::Transport {
                        peer: task_peer.to_string(),
                        message: e.to_string(),
                    })?;
                send_with_timeout(
                    transport.as_ref(),
                    &task_peer,
                    &identity,
                    &request,
                    peer_timeout,
                )
                .await
            });
            attempts.push(async move { (peer, handle.await) });
        }

        let mut failures = Vec::new();
        while let Some((peer, joined)) = attempts.next().await {
            let outcome = joined.unwrap_or_else(|e| {
                Err(DomainError::Transport {
                    peer: peer.to_string(),
                    message: format!("peer task aborted: {}", e),
                })
            });

            match outcome {
                Ok(()) => debug!(peer = %peer, "Peer applied mutation"),
                Err(e) => {
                    warn!(peer = %peer, error = %e, "Peer failed to apply mutation");
                    failures.push(format!("{}: {}", peer, e));
                }
            }
        }

        if failures.is_empty() {
            info!(peers = total, "Mutation propagated to all healthy peers");
            return Ok(());
        }

        failures.sort();
        Err(DomainError::PropagationIncomplete {
            failed: failures.len(),
            total,
            failures,
        })
    }
}

async fn send_with_timeout(
    transport: &dyn PeerTransport,
    peer: &ServiceInstance,
    identity: &ServiceIdentity,
    request: &PropagationRequest,
    peer_timeout: Duration,
) -> Result<(), DomainError> {
    match timeout(peer_timeout, transport.send(peer, identity, request)).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::Timeout(format!(
            "peer {} did not answer within {}ms",
            peer,
            peer_timeout.as_millis()
        ))),
    }
}
