//! Configuration management for qca8k-initvals.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (QCA8K_INITVALS_VERBOSE, QCA8K_INITVALS_EXTENSIONS)
//! 2. Project-local config file (`./qca8k-initvals.toml`)
//! 3. User config file (`~/.config/qca8k-initvals/config.toml`)
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Config File Format
//!
//! ```toml
//! # qca8k-initvals.toml
//!
//! # Always print decoded tokens
//! verbose = false
//!
//! # File extensions picked up when scanning a directory
//! extensions = ["dts", "dtsi"]
//!
//! # Extra register offsets to skip
//! ignore_offsets = [0x20, 0x24]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::decode::DecodeOptions;

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

const DEFAULT_EXTENSIONS: [&str; 2] = ["dts", "dtsi"];

/// qca8k-initvals configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Print decoded tokens before the advisories.
    pub verbose: Option<bool>,

    /// Extensions scanned when the input is a directory.
    pub extensions: Option<Vec<String>>,

    /// Register offsets skipped on top of the built-in list.
    pub ignore_offsets: Option<Vec<u32>>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Project-local `qca8k-initvals.toml`
    /// 3. User config `~/.config/qca8k-initvals/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load user config first (lowest priority of file configs)
        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        // Environment variables override everything
        config.apply_env_overrides();

        config
    }

    /// Get the cached global configuration.
    ///
    /// Loads configuration on first call and caches it.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Scanned extensions, with fallback to `dts` and `dtsi`.
    pub fn extensions(&self) -> Vec<String> {
        self.extensions
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }

    pub fn ignore_offsets(&self) -> Vec<u32> {
        self.ignore_offsets.clone().unwrap_or_default()
    }

    /// Decoder options derived from this configuration.
    pub fn to_options(&self) -> DecodeOptions {
        DecodeOptions {
            verbose: self.verbose(),
            extra_ignored: self.ignore_offsets(),
        }
    }

    fn load_user_config() -> Option<Self> {
        Self::load_from_file(&Self::user_config_path()?)
    }

    /// Load project-local configuration from ./qca8k-initvals.toml
    fn load_local_config() -> Option<Self> {
        Self::load_from_file(Path::new("qca8k-initvals.toml"))
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
        if other.ignore_offsets.is_some() {
            self.ignore_offsets = other.ignore_offsets;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("QCA8K_INITVALS_VERBOSE") {
            match parse_flag(&value) {
                Some(verbose) => {
                    log::info!("Using QCA8K_INITVALS_VERBOSE from environment: {}", verbose);
                    self.verbose = Some(verbose);
                }
                None => log::warn!("Ignoring QCA8K_INITVALS_VERBOSE={:?}", value),
            }
        }
        if let Ok(value) = std::env::var("QCA8K_INITVALS_EXTENSIONS") {
            log::info!("Using QCA8K_INITVALS_EXTENSIONS from environment: {}", value);
            self.extensions = Some(parse_list(&value));
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("qca8k-initvals").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# qca8k-initvals configuration
# Place this file at ~/.config/qca8k-initvals/config.toml or ./qca8k-initvals.toml

# Print decoded tokens for every register (same as -d)
# verbose = true

# Extensions picked up when scanning a directory
extensions = ["dts", "dtsi"]

# Extra register offsets to skip
# ignore_offsets = [0x20, 0x24]
"#
        .to_string()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_start_matches('.'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
