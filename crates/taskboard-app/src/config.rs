//! Project configuration loaded from `taskboard.toml`.

use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskboard_store_http::DEFAULT_BASE_URL;

/// Environment variable overriding the service base URL.
pub const ENV_BASE_URL: &str = "TASKBOARD_URL";

const CONFIG_FILE: &str = "taskboard.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration loaded from `taskboard.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Task service connection settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Connection settings for the task service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base endpoint of the task service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ProjectConfig {
    /// Load configuration from `dir`, with environment overrides applied.
    ///
    /// A missing file yields the defaults. Resolution order for the base URL:
    /// `TASKBOARD_URL` environment variable, then the file, then the default.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed, or when the
    /// resulting configuration is invalid.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let mut fetch = |key: &'static str| env::var(key).ok();
        Self::load_with_env(dir, &mut fetch)
    }

    fn load_with_env(
        dir: impl AsRef<Path>,
        fetch: &mut impl FnMut(&'static str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        if let Some(url) = fetch(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            config.service.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let url = &self.service.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("service.base_url must be an http(s) URL, got {url:?}");
        }
        if self.service.timeout_secs == 0 {
            bail!("service.timeout_secs must be nonzero");
        }
        Ok(())
    }
}
