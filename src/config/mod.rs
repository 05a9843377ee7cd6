pub mod environment;
pub mod services;

pub use environment::{Config, ConfigError};
pub use services::ServiceSpec;
