use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
}

/// Runtime configuration for the Paperless MCP server.
#[derive(Debug)]
pub struct Config {
    /// Base URL of the Paperless-ngx instance.
    pub paperless_server: String,
    /// API token used to authenticate against Paperless-ngx.
    pub paperless_api_key: String,
    /// Optional path overriding the default log file location.
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            paperless_server: load_env("PAPERLESS_SERVER")?,
            paperless_api_key: load_env("PAPERLESS_API_KEY")?,
            log_file: load_env_optional("PAPERLESS_MCP_LOG_FILE"),
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
///
/// Returns the error to the caller so startup can abort with a diagnostic and a
/// non-zero exit before any tool becomes callable.
pub fn init_config() -> Result<(), ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        paperless_server = %config.paperless_server,
        "Loaded configuration"
    );
    CONFIG.set(config).ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_error_names_the_variable() {
        let error = load_env("PAPERLESS_MCP_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Missing environment variable: PAPERLESS_MCP_TEST_UNSET_VARIABLE"
        );
    }
}
