//! Global configuration parsing and validation.

use std::collections::HashMap;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::{AppError, Result};

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    50505
}

fn default_about_banner() -> String {
    format!(
        "{} {} - bridge ok",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Global configuration parsed from `config.toml`.
///
/// Every field carries a default so the server can start with no config
/// file at all; the built-in defaults bind the loopback endpoint the
/// companion CLI expects.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Host the bridge endpoint binds and connects to.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port of the bridge endpoint.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Success payload returned for the built-in `about` command.
    #[serde(default = "default_about_banner")]
    pub about_banner: String,
    /// Registry of allowed command aliases mapped to program lines.
    #[serde(default)]
    pub commands: HashMap<String, String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            about_banner: default_about_banner(),
            commands: HashMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configured endpoint into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the host is not a literal IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|err| AppError::Config(format!("invalid host '{}': {err}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Validate field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` on the first violated constraint.
    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(AppError::Config("port must be non-zero".into()));
        }
        for (alias, program) in &self.commands {
            if alias.trim().is_empty() || alias.contains(char::is_whitespace) {
                return Err(AppError::Config(format!(
                    "invalid command alias '{alias}': must be a single word"
                )));
            }
            if program.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "command alias '{alias}' maps to an empty program line"
                )));
            }
        }
        Ok(())
    }
}
