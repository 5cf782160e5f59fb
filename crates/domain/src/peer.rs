use serde::{Deserialize, Serialize};
use std::fmt;

use crate::forward_zone::ForwardZone;
use crate::forward_zone_set::ForwardZoneSet;
use crate::DomainError;

/// A peer endpoint reported as passing by the service registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub address: String,
    pub port: u16,
}

impl ServiceInstance {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Same host, different port. Peers are resolved through the public
    /// service but dialed on the internal listener.
    pub fn with_port(&self, port: u16) -> Self {
        Self {
            address: self.address.clone(),
            port,
        }
    }

    pub fn authority(&self) -> String {
        if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

impl fmt::Display for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.authority())
    }
}

/// The name a peer must prove during the mutual TLS handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub trust_domain: String,
    pub namespace: String,
    pub datacenter: String,
    pub service: String,
}

impl ServiceIdentity {
    pub fn new(
        trust_domain: impl Into<String>,
        namespace: impl Into<String>,
        datacenter: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            trust_domain: trust_domain.into(),
            namespace: namespace.into(),
            datacenter: datacenter.into(),
            service: service.into(),
        }
    }

    /// SPIFFE URI carried as a URI SAN in the peer's leaf certificate.
    pub fn uri(&self) -> String {
        format!(
            "spiffe://{}/ns/{}/dc/{}/svc/{}",
            self.trust_domain, self.namespace, self.datacenter, self.service
        )
    }

    pub fn matches(&self, uri: &str) -> bool {
        self.uri() == uri
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation replayed identically against every healthy peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl PropagationRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn add_forward_zones(server_id: &str, zones: &ForwardZoneSet) -> Result<Self, DomainError> {
        Ok(Self::new(
            HttpMethod::Post,
            internal_forward_zones_path(server_id),
            Some(zones.to_json()?),
        ))
    }

    pub fn delete_forward_zones(
        server_id: &str,
        zones: &ForwardZoneSet,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            HttpMethod::Delete,
            internal_forward_zones_path(server_id),
            Some(zones.to_json()?),
        ))
    }

    pub fn update_forward_zone(
        server_id: &str,
        zone_id: &str,
        zone: &ForwardZone,
    ) -> Result<Self, DomainError> {
        let body = serde_json::to_vec(zone).map_err(|e| {
            DomainError::InvalidForwardZone(format!("encoding forward-zone: {}", e))
        })?;
        Ok(Self::new(
            HttpMethod::Patch,
            format!(
                "{}/{}",
                internal_forward_zones_path(server_id),
                urlencoding::encode(zone_id)
            ),
            Some(body),
        ))
    }

    pub fn delete_forward_zone(server_id: &str, zone_id: &str) -> Self {
        Self::new(
            HttpMethod::Delete,
            format!(
                "{}/{}",
                internal_forward_zones_path(server_id),
                urlencoding::encode(zone_id)
            ),
            None,
        )
    }

    pub fn flush_cache(server_id: &str, domain: &str) -> Self {
        Self::new(
            HttpMethod::Put,
            format!(
                "{}/{}/cache/flush?domain={}",
                INTERNAL_PREFIX,
                urlencoding::encode(server_id),
                urlencoding::encode(domain)
            ),
            None,
        )
    }
}

pub const INTERNAL_PREFIX: &str = "/api/v1/internal";

fn internal_forward_zones_path(server_id: &str) -> String {
    format!(
        "{}/{}/forward-zones",
        INTERNAL_PREFIX,
        urlencoding::encode(server_id)
    )
}
