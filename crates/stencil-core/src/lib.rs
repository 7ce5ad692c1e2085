//! # stencil-core
//!
//! Core library for the Stencil scaffolder providing:
//! - Layered configuration (embedded defaults, user file, environment)
//! - The template catalog offered at the `init` prompt
//! - Shared error types

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::StencilConfig;
pub use utils::get_home_dir;
