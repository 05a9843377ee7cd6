use serde::Deserialize;

use super::client::{DockerCli, DockerError};
use crate::services::readiness::HealthStatus;

/// Subset of `docker inspect --format '{{json .State}}'`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContainerState {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Health", default)]
    pub health: Option<HealthState>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthState {
    #[serde(rename = "Status")]
    pub status: String,
}

impl ContainerState {
    pub fn parse(json: &str) -> Result<Self, DockerError> {
        Ok(serde_json::from_str(json.trim())?)
    }

    /// Map docker's container state onto a readiness verdict.
    ///
    /// Health check status wins when the image defines one; otherwise the run state decides.
    pub fn classify(&self) -> HealthStatus {
        if let Some(health) = &self.health {
            return match health.status.as_str() {
                "healthy" => HealthStatus::Healthy,
                "unhealthy" => HealthStatus::Unhealthy,
                _ => HealthStatus::Unknown,
            };
        }

        match self.status.as_str() {
            "running" => HealthStatus::Healthy,
            "exited" | "dead" => HealthStatus::Unhealthy,
            _ => HealthStatus::Unknown,
        }
    }
}

/// Current state of `container`, or `None` if it does not exist yet
pub async fn inspect_state(
    docker: &DockerCli,
    container: &str,
) -> Result<Option<ContainerState>, DockerError> {
    match docker
        .run(&["inspect", "--format", "{{json .State}}", container])
        .await
    {
        Ok(output) => ContainerState::parse(&output.stdout).map(Some),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
