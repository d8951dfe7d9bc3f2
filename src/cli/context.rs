//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, credential validation, and client initialization.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::AtlanClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with flag and environment overrides applied
    pub config: Config,
    /// API client for the configured tenant
    pub client: Arc<AtlanClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads the config file (a missing default file is fine), applies
    /// `--base-url` / `ATLAN_BASE_URL` and `ATLAN_API_KEY`, validates the
    /// credentials and builds the client.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or credentials are missing.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?
            .with_overrides(opts.base_url.as_deref(), opts.api_key.as_deref());
        config.validate_auth()?;

        let client = Arc::new(AtlanClient::from_config(&config)?);
        debug!("Using Atlan tenant {}", client.base_url());

        Ok(Self {
            format: opts.resolve_format(&config),
            config,
            client,
        })
    }

    /// Configured page size for API requests.
    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_context_from_file_with_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "base_url: https://file.atlan.com\napi_key: file-key\npreferences:\n  page_size: 25\n  format: table\n",
        );
        let opts = GlobalOptions {
            config: Some(path),
            base_url: Some("https://flag.atlan.com/".to_string()),
            ..Default::default()
        };

        let ctx = CommandContext::new(&opts).unwrap();

        assert_eq!(ctx.client.base_url(), "https://flag.atlan.com");
        assert_eq!(ctx.page_size(), 25);
        assert_eq!(ctx.format, OutputFormat::Table);
    }

    #[test]
    fn test_context_requires_api_key() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "base_url: https://acme.atlan.com\n");
        let opts = GlobalOptions {
            config: Some(path),
            ..Default::default()
        };

        assert!(matches!(
            CommandContext::new(&opts),
            Err(Error::Config(ConfigError::MissingApiKey))
        ));
    }
}
