//! Type definitions for Stencil configuration

mod stencil_config;

pub use stencil_config::{
    ArchiveConfig, ManifestConfig, NetworkConfig, PromptDefaults, StencilConfig, TemplateEntry,
    validate_template_identifier,
};
