//! Artifact publishing for specialized archives
//!
//! Specialized archives are handed to the build tool's deploy goal so they
//! land in the artifact store under their specialized coordinates. The
//! publisher is a trait so tests can substitute a recording double.

use crate::domain::Coordinates;
use crate::error::PublishError;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Default number of seconds a deploy command may run before it is aborted
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 300;

/// Trait for pushing a specialized archive to the artifact store
#[async_trait]
pub trait ArtifactPublisher: Send + Sync {
    /// Publishes the archive at `file` under `coordinates` to `repo_url`
    async fn publish(
        &self,
        file: &Path,
        coordinates: &Coordinates,
        repo_url: &str,
    ) -> Result<(), PublishError>;
}

/// Publisher that executes `mvn deploy:deploy-file`
#[derive(Debug, Clone)]
pub struct DeployCommandPublisher {
    timeout: Duration,
}

impl DeployCommandPublisher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Argument vector for one deploy invocation
    fn deploy_args(file: &Path, coordinates: &Coordinates, repo_url: &str) -> Vec<String> {
        vec![
            "deploy:deploy-file".to_string(),
            format!("-Durl={}", repo_url),
            "-Dpackaging=jar".to_string(),
            format!("-Dfile={}", file.display()),
            format!("-DgroupId={}", coordinates.group_id),
            format!("-DartifactId={}", coordinates.artifact_id),
            format!("-Dversion={}", coordinates.version),
        ]
    }
}

impl Default for DeployCommandPublisher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PUBLISH_TIMEOUT_SECS))
    }
}

#[async_trait]
impl ArtifactPublisher for DeployCommandPublisher {
    async fn publish(
        &self,
        file: &Path,
        coordinates: &Coordinates,
        repo_url: &str,
    ) -> Result<(), PublishError> {
        let args = Self::deploy_args(file, coordinates, repo_url);
        let output = tokio::time::timeout(
            self.timeout,
            Command::new("mvn").args(&args).kill_on_drop(true).output(),
        )
        .await
        .map_err(|_| PublishError::timeout(coordinates.to_string(), self.timeout.as_secs()))?
        .map_err(|e| PublishError::spawn_failed("mvn deploy:deploy-file", e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(PublishError::command_failed(
                coordinates.to_string(),
                output.status.to_string(),
                stderr,
            ))
        }
    }
}
