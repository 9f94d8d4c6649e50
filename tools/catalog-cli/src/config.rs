//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use catalog_core::catalog::{MAX_IMAGE_BYTES, SELECTOR_IMAGE_RESULTS};
use catalog_core::media::{default_remote_patterns, MediaPolicy, RemotePattern};
use catalog_core::search::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image upload and preview settings.
    #[serde(default)]
    pub images: ImagesConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CATALOG_API_URL` (or `NEXT_PUBLIC_API_URL`) and `CATALOG_PAGE_SIZE`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("CATALOG_API_URL").or_else(|| lookup("NEXT_PUBLIC_API_URL")) {
            self.api.base_url = url;
        }
        if let Some(size) = lookup("CATALOG_PAGE_SIZE") {
            let parsed: u32 = size
                .trim()
                .parse()
                .with_context(|| format!("Invalid CATALOG_PAGE_SIZE: {}", size))?;
            if parsed == 0 {
                bail!("CATALOG_PAGE_SIZE must be at least 1");
            }
            self.api.page_size = parsed;
        }
        Ok(())
    }

    /// Read a dotted key such as `api.base_url`.
    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Ok(self.api.base_url.clone()),
            ["api", "page_size"] => Ok(self.api.page_size.to_string()),
            ["api", "timeout_secs"] => Ok(self
                .api
                .timeout_secs
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string())),
            ["images", "max_upload_bytes"] => Ok(self.images.max_upload_bytes.to_string()),
            ["images", "search_results"] => Ok(self.images.search_results.to_string()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Set a dotted key. `none` clears `api.timeout_secs`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let invalid = || format!("Invalid value for {}: {}", key, value);

        match parts.as_slice() {
            ["api", "base_url"] => self.api.base_url = value.trim().to_string(),
            ["api", "page_size"] => {
                let size: u32 = value.trim().parse().with_context(invalid)?;
                if size == 0 {
                    bail!("api.page_size must be at least 1");
                }
                self.api.page_size = size;
            }
            ["api", "timeout_secs"] if value.trim() == "none" => self.api.timeout_secs = None,
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = Some(value.trim().parse().with_context(invalid)?)
            }
            ["images", "max_upload_bytes"] => {
                self.images.max_upload_bytes = value.trim().parse().with_context(invalid)?
            }
            ["images", "search_results"] => {
                self.images.search_results = value.trim().parse().with_context(invalid)?
            }
            _ => bail!("Unknown or read-only config key: {}", key),
        }

        Ok(())
    }

    /// Photo URL policy for the configured API.
    pub fn media_policy(&self) -> MediaPolicy {
        MediaPolicy::new(&self.api.base_url, self.images.remote_patterns.clone())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Catalog API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: None,
        }
    }
}

/// Image settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Origins whose photo URLs may be shown as preview links.
    #[serde(default = "default_remote_patterns")]
    pub remote_patterns: Vec<RemotePattern>,

    /// Upload ceiling in bytes; cannot exceed 5 MB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Candidates requested by the interactive image search.
    #[serde(default = "default_search_results")]
    pub search_results: u32,
}

fn default_max_upload_bytes() -> u64 {
    MAX_IMAGE_BYTES
}

fn default_search_results() -> u32 {
    SELECTOR_IMAGE_RESULTS
}

impl ImagesConfig {
    /// Effective upload ceiling.
    pub fn upload_limit(&self) -> u64 {
        self.max_upload_bytes.min(MAX_IMAGE_BYTES)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            remote_patterns: default_remote_patterns(),
            max_upload_bytes: default_max_upload_bytes(),
            search_results: default_search_results(),
        }
    }
}

/// Generate a default catalog.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Catalog client configuration

[api]
base_url = "{base_url}"
page_size = {page_size}
# timeout_secs = 10

[images]
max_upload_bytes = {max_upload_bytes}
search_results = {search_results}

[[images.remote_patterns]]
protocol = "http"
hostname = "localhost"
port = 3001
pathname = "/catalog/images/**"
"#,
        base_url = base_url,
        page_size = DEFAULT_PAGE_SIZE,
        max_upload_bytes = MAX_IMAGE_BYTES,
        search_results = SELECTOR_IMAGE_RESULTS,
    )
}
