//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use catalog_client::{HttpCatalogApi, QueryCoordinator};
use catalog_core::media::MediaPolicy;
use catalog_data::FetchClient;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from the config file, the environment and CLI flags.
    pub fn load(config_path: Option<&str>, api_url: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        config.apply_env()?;
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }

        tracing::debug!(
            base_url = %config.api.base_url,
            page_size = config.api.page_size,
            config = ?config_path,
            "configuration loaded"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// HTTP client for the configured API.
    pub fn api(&self) -> HttpCatalogApi {
        let mut client = FetchClient::new()
            .with_base_url(&self.config.api.base_url)
            .with_default_header("Accept", "application/json");
        if let Some(timeout) = self.config.api.timeout() {
            client = client.with_timeout(timeout);
        }
        HttpCatalogApi::new(client)
    }

    /// Coordinator over the configured API and page size.
    pub fn coordinator(&self) -> QueryCoordinator<HttpCatalogApi> {
        QueryCoordinator::new(self.api(), self.config.api.page_size)
    }

    pub fn media_policy(&self) -> MediaPolicy {
        self.config.media_policy()
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".catalog.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".catalog.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("catalog.json"), "{}").unwrap();
        std::fs::write(dir.path().join("catalog.toml"), "").unwrap();

        let found = find_config(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "catalog.toml");
    }
}
