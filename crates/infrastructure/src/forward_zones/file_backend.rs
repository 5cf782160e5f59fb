use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use zonesync_application::ports::{ForwardZoneSource, ForwardZoneWriter, ResolverReloader};
use zonesync_domain::forward_zone::RECURSION_DESIRED_PREFIX;
use zonesync_domain::{DomainError, ForwardZoneSet};

/// The recursor's forward-zones file.
///
/// Lines are written with the recursion-desired marker. A successful write
/// is followed by a resolver reload, and a failed reload fails the save.
pub struct FileForwardZoneBackend {
    path: PathBuf,
    reloader: Option<Arc<dyn ResolverReloader>>,
}

impl FileForwardZoneBackend {
    pub fn new(path: impl Into<PathBuf>, reloader: Option<Arc<dyn ResolverReloader>>) -> Self {
        Self {
            path: path.into(),
            reloader,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(zones: &ForwardZoneSet) -> String {
        zones
            .iter()
            .map(|zone| format!("{}{}", RECURSION_DESIRED_PREFIX, zone.serialize()))
            .collect()
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ForwardZoneSource for FileForwardZoneBackend {
    async fn load(&self) -> Result<ForwardZoneSet, DomainError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Forward-zones file missing, starting empty");
                return Ok(ForwardZoneSet::new());
            }
            Err(e) => {
                return Err(DomainError::IoError(format!(
                    "reading forward-zones file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        ForwardZoneSet::parse(&text)
    }
}

#[async_trait]
impl ForwardZoneWriter for FileForwardZoneBackend {
    fn name(&self) -> &str {
        "file"
    }

    async fn save(&self, zones: &ForwardZoneSet) -> Result<(), DomainError> {
        let staging = self.staging_path();
        let write_err = |e: std::io::Error| {
            DomainError::BackendWrite(format!(
                "writing forward-zones file {}: {}",
                self.path.display(),
                e
            ))
        };

        tokio::fs::write(&staging, Self::render(zones))
            .await
            .map_err(write_err)?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(write_err)?;

        info!(path = %self.path.display(), zones = zones.len(), "Forward-zones file written");

        if let Some(reloader) = &self.reloader {
            reloader.reload().await.map_err(|e| match e {
                DomainError::BackendWrite(msg) => DomainError::BackendWrite(msg),
                other => DomainError::BackendWrite(format!("reloading resolver: {}", other)),
            })?;
        }

        Ok(())
    }
}
