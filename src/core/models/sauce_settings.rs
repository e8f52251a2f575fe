use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::sauce_backend::SauceBackend;
use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeMarkers {
    pub search_term_prefix: String,
    pub search_term_suffix: String,
    pub result_link_prefix: String,
    pub result_link_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SauceSettings {
    #[serde(default)]
    pub saucenao_token: String,
    pub user_agent: String,
    #[serde(rename = "GoogleSearchURL")]
    pub google_search_url: String,
    #[serde(rename = "SaucenaoSearchURL")]
    pub saucenao_search_url: String,
    pub search_term_prefix: String,
    pub search_term_suffix: String,
    pub google_result_link_prefix: String,
    pub google_result_link_suffix: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout_seconds() -> u64 {
    global_constants::DEFAULT_REQUEST_TIMEOUT_SECONDS
}

impl SauceSettings {
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        let settings_path = Self::resolve_settings_file_path(explicit_path)?;
        let settings = Self::load_from_file(&settings_path)?;

        log::info!(
            "{} Loaded settings from {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings_path
        );
        log::debug!(
            "{} Google search URL: {}",
            global_constants::LOG_TAG_SETTINGS,
            settings.google_search_url
        );
        log::debug!(
            "{} Request timeout: {}s",
            global_constants::LOG_TAG_SETTINGS,
            settings.request_timeout_seconds
        );

        Ok(settings)
    }

    pub fn load_from_file(settings_path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read configuration file {:?}", settings_path))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Failed to decode configuration file {:?}", settings_path))
    }

    pub fn from_json_str(contents: &str) -> anyhow::Result<Self> {
        let settings: SauceSettings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("UserAgent", &self.user_agent),
            ("GoogleSearchURL", &self.google_search_url),
            ("SaucenaoSearchURL", &self.saucenao_search_url),
            ("SearchTermPrefix", &self.search_term_prefix),
            ("SearchTermSuffix", &self.search_term_suffix),
            ("GoogleResultLinkPrefix", &self.google_result_link_prefix),
            ("GoogleResultLinkSuffix", &self.google_result_link_suffix),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("Configuration key `{}` must not be empty", key);
            }
        }

        if self.request_timeout_seconds == 0 {
            anyhow::bail!("Configuration key `RequestTimeoutSeconds` must be greater than zero");
        }

        Ok(())
    }

    pub fn validate_for_backend(&self, backend: SauceBackend) -> anyhow::Result<()> {
        if backend == SauceBackend::Saucenao && self.saucenao_token.trim().is_empty() {
            anyhow::bail!("Configuration key `SaucenaoToken` is required for {}", backend);
        }
        Ok(())
    }

    pub fn scrape_markers(&self) -> ScrapeMarkers {
        ScrapeMarkers {
            search_term_prefix: self.search_term_prefix.clone(),
            search_term_suffix: self.search_term_suffix.clone(),
            result_link_prefix: self.google_result_link_prefix.clone(),
            result_link_suffix: self.google_result_link_suffix.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn resolve_settings_file_path(explicit_path: Option<&Path>) -> anyhow::Result<PathBuf> {
        if let Some(path) = explicit_path {
            return Ok(path.to_path_buf());
        }

        let local_path = PathBuf::from(global_constants::SETTINGS_FILE_NAME);
        if local_path.exists() {
            return Ok(local_path);
        }

        let config_path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_NAME)
            .join(global_constants::SETTINGS_FILE_NAME);

        if !config_path.exists() {
            anyhow::bail!(
                "No configuration found; pass --config or create {:?} or {:?}",
                local_path,
                config_path
            );
        }

        Ok(config_path)
    }
}
