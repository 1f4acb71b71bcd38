//! Configuration loading from consent.toml.

use consent::AuthorizationStatus;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Authorizer configuration.
    #[serde(default)]
    pub authorizer: AuthorizerConfig,
}

/// Which authorizer backs the check, and how it is seeded.
#[derive(Debug, Deserialize)]
pub struct AuthorizerConfig {
    /// Authorizer backend.
    #[serde(default)]
    pub kind: AuthorizerKind,

    /// Status the platform currently reports.
    #[serde(default = "default_status")]
    pub status: AuthorizationStatus,

    /// Answer the simulated prompt gives (`fixed` only).
    pub response: Option<AuthorizationStatus>,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            kind: AuthorizerKind::default(),
            status: default_status(),
            response: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizerKind {
    /// Ask on the terminal.
    #[default]
    Prompt,
    /// Scripted status and answer.
    Fixed,
}

fn default_status() -> AuthorizationStatus {
    AuthorizationStatus::NotDetermined
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.authorizer.kind == AuthorizerKind::Prompt && self.authorizer.response.is_some() {
            return Err(ConfigError::Invalid(
                "authorizer.response only applies to kind = \"fixed\"".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
