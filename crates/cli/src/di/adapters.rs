use std::sync::Arc;
use tracing::info;
use zonesync_application::ports::{
    AccessPolicy, AuthoritativeNameserver, CacheFlusher, ForwardZoneSource, ForwardZoneWriter,
    PeerTransport, ResolverReloader, ServiceDirectory,
};
use zonesync_application::services::CompositeForwardZoneWriter;
use zonesync_domain::Config;
use zonesync_infrastructure::access::StaticAccessPolicy;
use zonesync_infrastructure::consul::{ConsulClient, ConsulServiceDirectory};
use zonesync_infrastructure::forward_zones::{
    CommandReloader, ConsulKvForwardZoneWriter, FileForwardZoneBackend,
};
use zonesync_infrastructure::pdns::PowerDnsClient;
use zonesync_infrastructure::transport::{HttpsPeerTransport, MtlsDialer, TlsMaterial};

/// Every infrastructure implementation behind the application ports.
pub struct Adapters {
    pub consul: Arc<ConsulClient>,
    pub tls: Arc<TlsMaterial>,
    pub zone_source: Arc<dyn ForwardZoneSource>,
    pub zone_writer: Arc<dyn ForwardZoneWriter>,
    pub authoritative: Arc<PowerDnsClient>,
    pub recursor: Arc<dyn CacheFlusher>,
    pub directory: Arc<dyn ServiceDirectory>,
    pub transport: Arc<dyn PeerTransport>,
    pub access: Arc<dyn AccessPolicy>,
}

impl Adapters {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.backend_timeout();

        let consul = Arc::new(ConsulClient::new(&config.consul, timeout)?);
        let tls = Arc::new(TlsMaterial::load(&config.tls)?);

        let reloader: Option<Arc<dyn ResolverReloader>> =
            if config.forward_zones.reload_command.is_empty() {
                None
            } else {
                Some(Arc::new(CommandReloader::new(
                    &config.forward_zones.reload_command,
                    timeout,
                )?))
            };

        let file = Arc::new(FileForwardZoneBackend::new(
            &config.forward_zones.file,
            reloader,
        ));
        let kv = Arc::new(ConsulKvForwardZoneWriter::new(
            consul.clone(),
            config.forward_zones.kv_key.clone(),
        ));
        let writers: Vec<Arc<dyn ForwardZoneWriter>> =
            vec![file.clone() as Arc<dyn ForwardZoneWriter>, kv];

        info!(
            file = %config.forward_zones.file,
            kv_key = %config.forward_zones.kv_key,
            "Forward-zone backends configured"
        );

        let dialer = Arc::new(MtlsDialer::new(tls.clone(), timeout));

        Ok(Self {
            zone_source: file,
            zone_writer: Arc::new(CompositeForwardZoneWriter::new(writers)),
            authoritative: Arc::new(PowerDnsClient::new(&config.pdns.auth)?),
            recursor: Arc::new(PowerDnsClient::new(&config.pdns.recursor)?),
            directory: Arc::new(ConsulServiceDirectory::new(consul.clone())),
            transport: Arc::new(HttpsPeerTransport::new(dialer)),
            access: Arc::new(StaticAccessPolicy::new(&config.access)),
            consul,
            tls,
        })
    }

    pub fn nameserver(&self) -> Arc<dyn AuthoritativeNameserver> {
        self.authoritative.clone()
    }

    pub fn authoritative_cache(&self) -> Arc<dyn CacheFlusher> {
        self.authoritative.clone()
    }
}
