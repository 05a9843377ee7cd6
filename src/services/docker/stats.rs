use serde::Deserialize;

use super::client::{DockerCli, DockerError};

/// One row of `docker stats --no-stream --format '{{json .}}'`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContainerStats {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CPUPerc")]
    pub cpu: String,
    #[serde(rename = "MemUsage")]
    pub memory: String,
    #[serde(rename = "MemPerc")]
    pub memory_percent: String,
    #[serde(rename = "NetIO", default)]
    pub net_io: String,
    #[serde(rename = "BlockIO", default)]
    pub block_io: String,
}

/// Parse newline-delimited JSON rows, skipping blank lines
pub fn parse_stats(output: &str) -> Result<Vec<ContainerStats>, DockerError> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(DockerError::from))
        .collect()
}

/// Point-in-time resource usage of `containers`
pub async fn resource_usage(
    docker: &DockerCli,
    containers: &[String],
) -> Result<Vec<ContainerStats>, DockerError> {
    if containers.is_empty() {
        return Ok(Vec::new());
    }

    let mut args = vec!["stats", "--no-stream", "--format", "{{json .}}"];
    args.extend(containers.iter().map(String::as_str));

    let output = docker.run(&args).await?;
    parse_stats(&output.stdout)
}
