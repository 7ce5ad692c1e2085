//! CLI command implementations

pub mod init;
pub mod templates;

use anyhow::Result;
use camino::Utf8Path;
use stencil_core::{HierarchicalConfigLoader, StencilConfig};

/// Load the layered configuration, honouring an explicit `--config` file
pub(crate) fn load_config(path: Option<&Utf8Path>) -> Result<StencilConfig> {
    let mut loader = HierarchicalConfigLoader::new()?;
    if let Some(path) = path {
        loader = loader.with_file(path.to_path_buf());
    }
    Ok(loader.load()?)
}
