use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};
use zonesync_application::ports::ResolverReloader;
use zonesync_domain::DomainError;

/// Restarts the local recursor by running a configured command.
pub struct CommandReloader {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandReloader {
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, DomainError> {
        let (program, args) = command.split_first().ok_or_else(|| {
            DomainError::ConfigError("reload command cannot be empty".to_string())
        })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl ResolverReloader for CommandReloader {
    async fn reload(&self) -> Result<(), DomainError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&self.args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            DomainError::BackendWrite(format!(
                "'{}' did not finish within {}s",
                self.display(),
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| DomainError::BackendWrite(format!("running '{}': {}", self.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(command = %self.display(), status = %output.status, "Resolver reload failed");
            return Err(DomainError::BackendWrite(format!(
                "'{}' exited with {}: {}",
                self.display(),
                output.status,
                stderr.trim()
            )));
        }

        info!(command = %self.display(), "Resolver reloaded");
        Ok(())
    }
}
