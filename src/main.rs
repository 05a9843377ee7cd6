use pulsar_readiness::config::Config;
use pulsar_readiness::services::docker::DockerCli;
use pulsar_readiness::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsar_readiness=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let arg = std::env::args().nth(1);
    let command = match Command::parse(arg.as_deref()) {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load environment configuration: {}", e);
            std::process::exit(2);
        }
    };

    let docker = DockerCli::default();

    if let Err(e) = pulsar_readiness::run(command, &config, &docker).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
