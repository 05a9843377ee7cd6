use async_trait::async_trait;

use super::client::DockerCli;
use super::inspect::inspect_state;
use crate::services::readiness::{DiagnosticsSource, HealthProbe, HealthStatus};

/// Health probe backed by `docker inspect`
#[derive(Debug, Clone)]
pub struct ContainerProbe {
    docker: DockerCli,
    container: String,
}

impl ContainerProbe {
    pub fn new(docker: DockerCli, container: impl Into<String>) -> Self {
        Self {
            docker,
            container: container.into(),
        }
    }
}

#[async_trait]
impl HealthProbe for ContainerProbe {
    async fn check(&self) -> HealthStatus {
        match inspect_state(&self.docker, &self.container).await {
            Ok(Some(state)) => state.classify(),
            Ok(None) => {
                tracing::debug!(container = %self.container, "container not created yet");
                HealthStatus::Unknown
            }
            Err(e) => {
                // A flaky daemon query is not a verdict on the container
                tracing::warn!(container = %self.container, error = %e, "status query failed");
                HealthStatus::Unknown
            }
        }
    }
}

/// Diagnostics source returning the last `lines` log lines of a container
#[derive(Debug, Clone)]
pub struct LogTail {
    docker: DockerCli,
    container: String,
    lines: u32,
}

impl LogTail {
    pub fn new(docker: DockerCli, container: impl Into<String>, lines: u32) -> Self {
        Self {
            docker,
            container: container.into(),
            lines,
        }
    }
}

#[async_trait]
impl DiagnosticsSource for LogTail {
    async fn collect(&self) -> Result<String, String> {
        let lines = self.lines.to_string();
        self.docker
            .run(&["logs", "--tail", &lines, &self.container])
            .await
            .map(|output| output.combined())
            .map_err(|e| e.to_string())
    }
}
