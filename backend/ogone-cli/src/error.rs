#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unable to load configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to install the log subscriber: {0}")]
    LoggerError(#[from] tracing_subscriber::util::TryInitError),
}

/// Failures of a single CLI invocation.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("The gateway call failed")]
    GatewayFailure,
    #[error("Failed to render the command output")]
    OutputFailed,
}
