//! Configuration types controlling how templates are acquired
//!
//! The embedded `stencil-defaults.yaml` provides every field; user files and
//! environment variables only override what they name.

use serde::{Deserialize, Serialize};

/// Complete Stencil configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StencilConfig {
    /// Package manager used to query the global prefix and install helpers
    pub package_manager: String,

    /// Helper tool that fetches a template package into the working directory
    pub download_tool: String,

    /// Templates offered at the `init` prompt
    pub templates: Vec<TemplateEntry>,

    /// Alternate archive source
    pub archive: ArchiveConfig,

    /// Manifest rewrite rules
    pub manifest: ManifestConfig,

    /// Prompt defaults
    pub prompts: PromptDefaults,

    /// Network settings
    pub network: NetworkConfig,
}

/// One template in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateEntry {
    /// Template identifier, optionally nested (`group/name`)
    pub value: String,

    /// Human readable description shown in the selection list
    pub description: String,
}

/// Archive (git/zip) source settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ArchiveConfig {
    /// Download URL of the archive
    pub url: String,

    /// Directory inside the archive holding one subdirectory per template
    pub root: String,
}

/// Manifest rewrite settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestConfig {
    /// Manifest file name inside the project directory
    pub file_name: String,

    /// Version written into a freshly scaffolded manifest
    pub version: String,

    /// Fields removed from the manifest after scaffolding
    pub strip_fields: Vec<String>,
}

/// Default answers for the interactive prompts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PromptDefaults {
    pub name: String,
    pub description: String,
    pub author: String,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// HTTP timeout in seconds
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    pub user_agent: String,
}

/// Check that a template identifier names a directory strictly below the working directory
///
/// Segments are split on `/`. Empty, `.` and `..` segments are rejected, which
/// also covers leading, trailing and doubled separators. Backslashes and drive
/// prefixes are rejected so the identifier means the same thing on every platform.
pub fn validate_template_identifier(value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::Error::invalid_template(value, "must not be empty"));
    }
    if value.contains('\\') || value.contains(':') {
        return Err(crate::Error::invalid_template(
            value,
            "must use '/' as the only separator",
        ));
    }
    for segment in value.split('/') {
        match segment {
            "" => {
                return Err(crate::Error::invalid_template(
                    value,
                    "must not start or end with '/' or contain empty segments",
                ))
            }
            "." | ".." => {
                return Err(crate::Error::invalid_template(
                    value,
                    "must not contain '.' or '..' segments",
                ))
            }
            _ => {}
        }
    }
    Ok(())
}

impl StencilConfig {
    /// Look up a template in the catalog by its identifier
    pub fn find_template(&self, value: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.value == value)
    }

    /// Comma separated list of catalog identifiers
    pub fn available_templates(&self) -> String {
        self.templates
            .iter()
            .map(|t| t.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve a template identifier against the catalog
    pub fn require_template(&self, value: &str) -> crate::Result<&TemplateEntry> {
        self.find_template(value)
            .ok_or_else(|| crate::Error::unknown_template(value, self.available_templates()))
    }
}
