//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options, so
//! handlers take one parameter instead of every flag.

use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format from flag or `ATLANOP_FORMAT`, if given
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.atlanop/config.yaml)
    pub config: Option<String>,

    /// Tenant URL from flag or `ATLAN_BASE_URL`
    pub base_url: Option<String>,

    /// API token from `ATLAN_API_KEY`
    pub api_key: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    ///
    /// This is the primary constructor, called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            base_url: cli.base_url.clone(),
            api_key: cli.api_key.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Output format: flag/env, then the config file preference, then pretty.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }
}
