pub mod config;
pub mod services;

use std::sync::Arc;

use config::{Config, ConfigError};
use services::docker::{resource_usage, ComposeRunner, ContainerProbe, DockerCli, DockerError, LogTail};
use services::ports::{check_ports, PortCheck};
use services::readiness::{PollTarget, ReadinessError, StartupReport, StartupSequence};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    #[error("Readiness check failed: {0}")]
    Readiness(#[from] ReadinessError),

    #[error("Unknown command `{0}` (expected up, wait or status)")]
    UnknownCommand(String),
}

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `docker compose up -d`, then wait
    Up,
    /// Wait for already started services
    Wait,
    /// Print resource usage and port reachability
    Status,
}

impl Command {
    pub fn parse(arg: Option<&str>) -> Result<Self, RunError> {
        match arg {
            None | Some("up") => Ok(Self::Up),
            Some("wait") => Ok(Self::Wait),
            Some("status") => Ok(Self::Status),
            Some(other) => Err(RunError::UnknownCommand(other.to_string())),
        }
    }
}

/// One poll target per configured service, in startup order
pub fn build_targets(config: &Config, docker: &DockerCli) -> Vec<PollTarget> {
    config
        .services
        .iter()
        .map(|service| {
            PollTarget::new(
                service.name.clone(),
                Arc::new(ContainerProbe::new(docker.clone(), service.container.clone())),
                Arc::new(LogTail::new(docker.clone(), service.container.clone(), config.log_lines)),
                config.interval,
                config.max_attempts,
            )
        })
        .collect()
}

pub fn port_checks(config: &Config) -> Vec<PortCheck> {
    config
        .ports
        .iter()
        .map(|address| PortCheck::new(address.clone(), config.port_timeout))
        .collect()
}

pub async fn run(command: Command, config: &Config, docker: &DockerCli) -> Result<(), RunError> {
    match command {
        Command::Up => {
            ComposeRunner::new(docker.clone(), config.compose_file.clone(), config.compose_project.clone())
                .up()
                .await?;
            wait_for_services(config, docker).await?;
        }
        Command::Wait => {
            wait_for_services(config, docker).await?;
        }
        Command::Status => {}
    }

    print_status(config, docker).await;
    Ok(())
}

async fn wait_for_services(config: &Config, docker: &DockerCli) -> Result<StartupReport, RunError> {
    let sequence = StartupSequence::new(build_targets(config, docker));
    let report = sequence.run().await?;
    let elapsed = report.finished_at - report.started_at;
    tracing::info!(
        "🎉 {} services ready in {}s ({} checks)",
        report.ready.len(),
        elapsed.num_seconds(),
        report.total_attempts()
    );
    Ok(report)
}

/// Best-effort; failures here are logged, never fatal
async fn print_status(config: &Config, docker: &DockerCli) {
    match resource_usage(docker, &config.containers()).await {
        Ok(rows) => {
            for row in rows {
                tracing::info!(
                    "📊 {}: cpu {} mem {} ({}) net {} block {}",
                    row.name, row.cpu, row.memory, row.memory_percent, row.net_io, row.block_io
                );
            }
        }
        Err(e) => tracing::warn!("Failed to read resource usage: {}", e),
    }

    check_ports(&port_checks(config)).await;
}
