//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hews/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Category;
use crate::api::client::DEFAULT_BASE_URL;
use crate::core::machine::FailurePolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HewsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_category: Option<Category>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListConfig {
    pub max_stories: Option<usize>,
    pub on_failure: Option<FailurePolicy>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MAX_STORIES: usize = 50;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub category: Category,
    pub base_url: String,
    pub max_stories: usize,
    pub on_failure: FailurePolicy,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            category: Category::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_stories: DEFAULT_MAX_STORIES,
            on_failure: FailurePolicy::default(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hews/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hews").join("config.toml"))
}

/// Load config from `~/.hews/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HewsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HewsConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HewsConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<HewsConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HewsConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HewsConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Hews Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_category = "top"          # "top" or "new" (or HEWS_CATEGORY, --category)

# [api]
# base_url = "https://hacker-news.firebaseio.com/v0"   # Or HEWS_API_BASE_URL, --base-url

# [list]
# max_stories = 50                  # Ranked stories fetched per front page
# on_failure = "retain"             # "retain" keeps the last good list, "clear" empties it
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &HewsConfig,
    cli_category: Option<Category>,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_category, cli_base_url, |key| {
        std::env::var(key).ok()
    })
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &HewsConfig,
    cli_category: Option<Category>,
    cli_base_url: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Category: CLI → env → config → default
    let category = cli_category
        .or_else(|| {
            env("HEWS_CATEGORY").and_then(|raw| match Category::from_str(&raw, true) {
                Ok(category) => Some(category),
                Err(_) => {
                    warn!("Ignoring unknown HEWS_CATEGORY value: {}", raw);
                    None
                }
            })
        })
        .or(config.general.default_category)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| env("HEWS_API_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        category,
        base_url,
        max_stories: config.list.max_stories.unwrap_or(DEFAULT_MAX_STORIES),
        on_failure: config.list.on_failure.unwrap_or_default(),
    }
}
