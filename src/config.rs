//! Configuration handling for the TUI

use crate::service::DEFAULT_BASE_URL;
use crate::state::DEFAULT_MAX_ENTRIES;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "BACKSTAGE_BASE_URL";
pub const TOC_SOURCE_ENV: &str = "BACKSTAGE_TOC";
pub const DRAFT_ENV: &str = "BACKSTAGE_DRAFT";

const DEFAULT_CHECK_TIMEOUT_MS: u64 = 5000;
const DEFAULT_READCOUNT_DELAY_MS: u64 = 60;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackstageConfig {
    /// Backstage server address
    pub base_url: Option<String>,
    /// Upper bound for a uniqueness check
    pub check_timeout_ms: Option<u64>,
    /// Cap on project cover images
    pub max_image_entries: Option<usize>,
    /// Cap on social links
    pub max_social_links: Option<usize>,
    /// Delay before the read-count ping in the reader view
    pub readcount_delay_ms: Option<u64>,
    /// Rendered content JSON opened by the reader view
    pub toc_source: Option<PathBuf>,
    /// Existing post/project/changelog JSON opened for editing
    pub draft_source: Option<PathBuf>,
}

impl BackstageConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "backstage", "backstage-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config");
            }
        }

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(path) = lookup(TOC_SOURCE_ENV).filter(|v| !v.is_empty()) {
            self.toc_source = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(DRAFT_ENV).filter(|v| !v.is_empty()) {
            self.draft_source = Some(PathBuf::from(path));
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms.unwrap_or(DEFAULT_CHECK_TIMEOUT_MS))
    }

    pub fn max_image_entries(&self) -> usize {
        self.max_image_entries.unwrap_or(DEFAULT_MAX_ENTRIES)
    }

    pub fn max_social_links(&self) -> usize {
        self.max_social_links.unwrap_or(DEFAULT_MAX_ENTRIES)
    }

    pub fn readcount_delay(&self) -> Duration {
        Duration::from_millis(self.readcount_delay_ms.unwrap_or(DEFAULT_READCOUNT_DELAY_MS))
    }
}
