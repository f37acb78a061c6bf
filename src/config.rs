//! Build configuration.
//!
//! Every knob the build has lives in [`BuildConfig`]. Defaults reproduce the
//! fixed layout the tool has always used, so a site without a config file
//! builds exactly as before.
//!
//! ## Config File Location
//!
//! Place `include.toml` in the site root:
//!
//! ```text
//! site/
//! ├── include.toml          # Optional, overrides stock defaults
//! ├── _includes/
//! │   ├── header.html       # <!-- @include header -->
//! │   └── footer.html       # <!-- @include footer -->
//! ├── index.html
//! └── pages/
//!     └── about.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! includes_dir = "_includes"                 # Relative to the site root
//! extensions = ["html"]                      # Include file extensions, in priority order
//! patterns = ["*.html", "pages/**/*.html"]   # Target pages, relative to the site root
//! strict = false                             # Fail on markers naming unknown includes
//! ```
//!
//! The file is sparse: override only what you need. Unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file in the site root.
pub const CONFIG_FILENAME: &str = "include.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `include.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding include fragments, relative to the site root.
    /// Never scanned for target pages.
    pub includes_dir: PathBuf,
    /// Extensions (without the dot) of files loaded as includes.
    /// When two files share a name, the earlier extension wins.
    pub extensions: Vec<String>,
    /// Glob patterns selecting target pages, relative to the site root.
    /// `*` does not cross directory separators; `**` does.
    pub patterns: Vec<String>,
    /// Treat markers that name no known include as an error.
    pub strict: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            includes_dir: PathBuf::from("_includes"),
            extensions: vec!["html".to_string()],
            patterns: vec!["*.html".to_string(), "pages/**/*.html".to_string()],
            strict: false,
        }
    }
}

impl BuildConfig {
    /// Validate config values before they reach the loader and processor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.includes_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "includes_dir must not be empty".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "extensions must be non-empty and written without a dot, got {ext:?}"
            )));
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::Validation("patterns must not be empty".into()));
        }
        for pattern in &self.patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("invalid pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Compile the target patterns. Call after [`validate`](Self::validate).
    pub fn compiled_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p)
                    .map_err(|e| ConfigError::Validation(format!("invalid pattern '{p}': {e}")))
            })
            .collect()
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `patterns` list replaces the stock list rather than extending it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from an explicit file path, layered over stock defaults.
pub fn load_config_file(path: &Path) -> Result<BuildConfig, ConfigError> {
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `include.toml` from the site root, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILENAME))
}

/// Returns a fully-commented stock `include.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r#"# html-include configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding include fragments, relative to the site root.
# A file named header.html here is spliced in wherever a page contains
#   <!-- @include header -->
# Pages inside this directory are never processed.
includes_dir = "_includes"

# Extensions of files loaded as includes, without the dot.
# If two files share a name (header.htm, header.html), the extension
# listed first wins.
extensions = ["html"]

# Target pages, as glob patterns relative to the site root.
# `*` stays within one directory, `**` spans any depth.
patterns = ["*.html", "pages/**/*.html"]

# Fail the build when a page contains a marker naming no known include.
# When false, such markers are left in the page untouched.
strict = false
"#
}
