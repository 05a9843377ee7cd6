use std::path::PathBuf;

use super::client::{DockerCli, DockerError};

/// Runs `docker compose` lifecycle commands for one compose file
#[derive(Debug, Clone)]
pub struct ComposeRunner {
    docker: DockerCli,
    file: PathBuf,
    project: Option<String>,
}

impl ComposeRunner {
    pub fn new(docker: DockerCli, file: impl Into<PathBuf>, project: Option<String>) -> Self {
        Self {
            docker,
            file: file.into(),
            project,
        }
    }

    /// Arguments shared by every compose subcommand
    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "compose".to_string(),
            "-f".to_string(),
            self.file.display().to_string(),
        ];
        if let Some(project) = &self.project {
            args.push("-p".to_string());
            args.push(project.clone());
        }
        args
    }

    pub fn up_args(&self) -> Vec<String> {
        let mut args = self.base_args();
        args.push("up".to_string());
        args.push("-d".to_string());
        args
    }

    /// Start all services in the background
    pub async fn up(&self) -> Result<(), DockerError> {
        let args = self.up_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        tracing::info!("🚀 Starting services from {}", self.file.display());
        self.docker.run(&args).await?;
        Ok(())
    }
}
