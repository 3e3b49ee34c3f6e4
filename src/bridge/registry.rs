//! Command alias registry.
//!
//! Aliases are announced through explicit [`CommandRegistry::register`]
//! calls rather than discovered implicitly; each registration is logged so
//! the operator can see which commands a server instance will accept.

use std::collections::HashMap;

use tracing::info;

use crate::config::GlobalConfig;
use crate::{AppError, Result};

/// Registry of command aliases the server dispatches to program lines.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the `[commands]` table of the configuration,
    /// one registration call per entry.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any entry fails alias validation.
    pub fn from_config(config: &GlobalConfig) -> Result<Self> {
        let mut registry = Self::new();
        for (alias, program) in &config.commands {
            registry.register(alias, program)?;
        }
        Ok(registry)
    }

    /// Register a command alias mapping to a program line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the alias is empty or contains
    /// whitespace, if the program line is empty, or if the alias is
    /// already registered.
    pub fn register(&mut self, alias: &str, program: &str) -> Result<()> {
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
        if self.entries.contains_key(alias) {
            return Err(AppError::Config(format!(
                "command alias '{alias}' is already registered"
            )));
        }
        self.entries.insert(alias.to_owned(), program.to_owned());
        info!(alias, program, "command registered");
        Ok(())
    }

    /// Resolve an alias to its configured program line.
    #[must_use]
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    /// Registered alias names, unordered.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
