//! Configuration loading from onthisday.toml and the environment.
//!
//! Environment variables:
//! - `HF_API_TOKEN` - Required. Hugging Face API token. Secrets are never
//!   read from the config file.
//! - `ONTHISDAY_MODEL` - Optional. Overrides the configured model.
//! - `RUST_LOG` - Optional. Tracing filter.

use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

/// Environment variable holding the Hugging Face API token.
pub const TOKEN_ENV: &str = "HF_API_TOKEN";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Listen address configuration.
    #[serde(default)]
    pub listen: ListenConfig,
}

/// Backend provider configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Model identifier on the inference API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Full endpoint URL override. Defaults to the public inference API
    /// URL derived from `model`.
    pub endpoint: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: None,
        }
    }
}

/// Listen address configuration.
#[derive(Debug, Deserialize)]
pub struct ListenConfig {
    /// IP literal or hostname.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_model() -> String {
    "google/gemma-3-27b-it".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the API token from the environment.
    pub fn token() -> Result<String, ConfigError> {
        std::env::var(TOKEN_ENV).map_err(|_| ConfigError::MissingToken)
    }

    /// Socket address to bind. Hostnames go through the system resolver;
    /// the first resolved address is used.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.listen.host, self.listen.port);
        addr.to_socket_addrs()
            .ok()
            .and_then(|mut resolved| resolved.next())
            .ok_or(ConfigError::InvalidListenAddr(addr))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("authentication not configured: set HF_API_TOKEN")]
    MissingToken,

    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.model, "google/gemma-3-27b-it");
        assert!(config.backend.endpoint.is_none());
        assert_eq!(config.listen.host, "127.0.0.1");
        assert_eq!(config.listen.port, 8000);
    }

    #[test]
    fn full_config_parses() {
        let config = Config::parse(
            r#"
            [backend]
            model = "meta-llama/Llama-3.1-8B-Instruct"
            endpoint = "http://127.0.0.1:9000/generate"

            [listen]
            host = "0.0.0.0"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.model, "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(
            config.backend.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/generate")
        );
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn hostname_resolves_to_bind_addr() {
        let config = Config::parse("[listen]\nhost = \"localhost\"\nport = 8123\n").unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 8123);
    }

    #[test]
    fn token_comes_from_environment_only() {
        // One test covers both directions so parallel tests never race on
        // the variable.
        unsafe { std::env::remove_var(TOKEN_ENV) };
        let err = Config::token().unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
        assert!(err.to_string().contains(TOKEN_ENV));

        unsafe { std::env::set_var(TOKEN_ENV, "hf_test_token") };
        assert_eq!(Config::token().unwrap(), "hf_test_token");
        unsafe { std::env::remove_var(TOKEN_ENV) };
    }

    #[test]
    fn bad_host_is_invalid_listen_addr() {
        let config = Config::parse("[listen]\nhost = \"not a host\"\n").unwrap();
        assert!(matches!(
            config.bind_addr().unwrap_err(),
            ConfigError::InvalidListenAddr(_)
        ));
    }
}
