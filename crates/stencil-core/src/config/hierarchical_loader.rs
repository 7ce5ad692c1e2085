//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.stencil/config.yaml, or an explicit `--config` file)
//! 3. Environment variables (STENCIL_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{validate_template_identifier, StencilConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// File name of the user configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULTS_FILE_NAME: &str = "stencil-defaults.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
#[derive(Debug, Clone)]
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,

    /// File passed explicitly by the user; must exist when set
    explicit_file: Option<Utf8PathBuf>,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader rooted at ~/.stencil
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self {
            config_dir,
            explicit_file: None,
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self {
            config_dir,
            explicit_file: None,
        }
    }

    /// Use an explicit configuration file instead of `<config_dir>/config.yaml`
    pub fn with_file(mut self, path: Utf8PathBuf) -> Self {
        self.explicit_file = Some(path);
        self
    }

    /// Get the standard config directory (~/.stencil)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = crate::utils::get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Home directory is not UTF-8: {:?}", p)))?;
        Ok(home.join(".stencil"))
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<StencilConfig> {
        let mut merged = Self::load_embedded_value(DEFAULTS_FILE_NAME)?;

        if let Some(path) = self.user_config_path()? {
            debug!("Merging user configuration from {}", path);
            let overlay = Self::load_yaml_value(&path)?;
            merge_values(&mut merged, overlay);
        }

        let config: StencilConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to apply configuration: {}", e)))?;

        let config = self.apply_env_overrides(config)?;
        Self::validate(&config)?;

        Ok(config)
    }

    /// Resolve which user file should be merged, if any
    fn user_config_path(&self) -> Result<Option<Utf8PathBuf>> {
        if let Some(path) = &self.explicit_file {
            if !path.exists() {
                return Err(Error::config_not_found(path.as_str()));
            }
            return Ok(Some(path.clone()));
        }

        let default_path = self.config_dir.join(CONFIG_FILE_NAME);
        Ok(default_path.exists().then_some(default_path))
    }

    /// Load an embedded configuration file as a YAML value
    fn load_embedded_value(filename: &str) -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it as an untyped value
    fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, mut config: StencilConfig) -> Result<StencilConfig> {
        if let Ok(val) = env::var("STENCIL_PACKAGE_MANAGER") {
            config.package_manager = val;
        }

        if let Ok(val) = env::var("STENCIL_DOWNLOAD_TOOL") {
            config.download_tool = val;
        }

        if let Ok(val) = env::var("STENCIL_ARCHIVE_URL") {
            config.archive.url = val;
        }

        if let Ok(val) = env::var("STENCIL_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("STENCIL_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        Ok(config)
    }

    fn validate(config: &StencilConfig) -> Result<()> {
        if config.package_manager.trim().is_empty() {
            return Err(Error::invalid_config("package-manager must not be empty"));
        }
        if config.download_tool.trim().is_empty() {
            return Err(Error::invalid_config("download-tool must not be empty"));
        }
        if config.templates.is_empty() {
            return Err(Error::invalid_config(
                "templates must list at least one template",
            ));
        }
        for entry in &config.templates {
            validate_template_identifier(&entry.value)
                .map_err(|e| Error::invalid_config(format!("templates: {}", e)))?;
        }
        if config.manifest.file_name.trim().is_empty() {
            return Err(Error::invalid_config("manifest.file-name must not be empty"));
        }
        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
