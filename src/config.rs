//! Site configuration module.
//!
//! Handles loading and validating the optional `config.toml` at the content
//! root. Config files are sparse — override just the values you want —
//! and unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_dir = "_data"      # links.json, icons.json, groups.json, tables.json
//! output_root = "."       # where rendered pages land (relative to the root)
//! front_matter = true     # emit the YAML front-matter block on each page
//! ```
//!
//! A missing `config.toml` means defaults; a malformed one is a fatal
//! startup error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the link/group/table JSON files, relative to the
    /// content root.
    pub data_dir: String,
    /// Where rendered pages are written, relative to the content root (or
    /// absolute). Manifest links resolve inside this directory.
    pub output_root: String,
    /// Emit the generated YAML front-matter block on each page.
    pub front_matter: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: "_data".to_string(),
            output_root: ".".to_string(),
            front_matter: true,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.is_empty() {
            return Err(ConfigError::Validation("data_dir must not be empty".into()));
        }
        if self.output_root.is_empty() {
            return Err(ConfigError::Validation(
                "output_root must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file doesn't exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let raw = fs::read_to_string(&path)?;
    let config: SiteConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    "\
# coursegen site configuration
# All options are optional - defaults shown below

# Directory holding links.json, icons.json, groups.json and tables.json,
# relative to the content root.
data_dir = \"_data\"

# Where rendered pages are written, relative to the content root.
# Manifest links resolve inside this directory.
output_root = \".\"

# Emit the generated YAML front-matter block on each page.
front_matter = true
"
    .to_string()
}
