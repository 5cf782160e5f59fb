use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use zonesync_application::ports::{AuthoritativeNameserver, CacheFlusher};
use zonesync_domain::config::PdnsEndpoint;
use zonesync_domain::{
    ChangeType, DomainError, FlushResult, ResourceRecordChange, SearchObjectType, SearchResult,
};

const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the HTTP API of a PowerDNS authoritative server or recursor.
/// Both expose the same server/zone/cache paths.
pub struct PowerDnsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct RrsetPatch<'a> {
    rrsets: [&'a ResourceRecordChange; 1],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl PowerDnsClient {
    pub fn new(endpoint: &PdnsEndpoint) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(format!("building PowerDNS client: {}", e)))?;

        Ok(Self {
            http,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            api_key: endpoint.api_key.clone(),
        })
    }

    fn server_url(&self, server_id: &str) -> String {
        format!("{}/api/v1/servers/{}", self.base_url, server_id)
    }

    async fn patch_rrset(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        let url = format!("{}/zones/{}", self.server_url(server_id), zone_id);
        let body = RrsetPatch { rrsets: [change] };
        self.send(self.http.patch(&url).json(&body)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                DomainError::UpstreamDns(format!("{} unreachable: {}", self.base_url, e))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            });

        Err(DomainError::UpstreamDns(format!(
            "{} returned HTTP {}: {}",
            self.base_url,
            status.as_u16(),
            detail
        )))
    }
}

#[async_trait]
impl AuthoritativeNameserver for PowerDnsClient {
    #[instrument(skip(self, change), fields(name = %change.name, rtype = %change.record_type))]
    async fn add_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        let change = ResourceRecordChange {
            changetype: ChangeType::Replace,
            ..change.clone()
        };
        self.patch_rrset(server_id, zone_id, &change).await?;
        debug!("Record set replaced");
        Ok(())
    }

    #[instrument(skip(self, change), fields(name = %change.name, rtype = %change.record_type))]
    async fn remove_record_set(
        &self,
        server_id: &str,
        zone_id: &str,
        change: &ResourceRecordChange,
    ) -> Result<(), DomainError> {
        let change = ResourceRecordChange {
            changetype: ChangeType::Delete,
            records: Vec::new(),
            ..change.clone()
        };
        self.patch_rrset(server_id, zone_id, &change).await?;
        debug!("Record set deleted");
        Ok(())
    }

    async fn search(
        &self,
        server_id: &str,
        query: &str,
        max_results: usize,
        object_type: SearchObjectType,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let url = format!("{}/search-data", self.server_url(server_id));
        let max = max_results.to_string();
        let request = self.http.get(&url).query(&[
            ("q", query),
            ("max", max.as_str()),
            ("object_type", object_type.as_str()),
        ]);

        let results: Vec<SearchResult> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::UpstreamDns(format!("decoding search results: {}", e)))?;

        debug!(query = %query, results = results.len(), "Search completed");
        Ok(results)
    }
}

#[async_trait]
impl CacheFlusher for PowerDnsClient {
    async fn flush_cache(&self, server_id: &str, domain: &str) -> Result<FlushResult, DomainError> {
        let url = format!("{}/cache/flush", self.server_url(server_id));
        let request = self.http.put(&url).query(&[("domain", domain)]);

        let result: FlushResult = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::UpstreamDns(format!("decoding flush result: {}", e)))?;

        debug!(domain = %domain, count = result.count, base_url = %self.base_url, "Cache flushed");
        Ok(result)
    }
}
