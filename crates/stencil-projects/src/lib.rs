//! # stencil-projects
//!
//! Template acquisition library for the Stencil scaffolder providing:
//! - A download pipeline that installs the helper tool when missing, fetches
//!   the template package and renames it to the project directory
//! - Layout normalization for nested (`group/name`) templates
//! - Manifest rewriting (identity fields, version reset, publish settings)
//! - An alternate archive source with prefix-stripping extraction
//!
//! # Examples
//!
//! ## Scaffold from the package registry
//!
//! ```no_run
//! use stencil_core::HierarchicalConfigLoader;
//! use stencil_projects::acquire::{DownloadPipeline, ProcessRunner};
//! use stencil_projects::types::{TemplateAnswers, TemplateRequest};
//! use camino::Utf8PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HierarchicalConfigLoader::new()?.load()?;
//! let answers = TemplateAnswers {
//!     name: "demo".to_string(),
//!     description: "Demo project".to_string(),
//!     author: "Jane".to_string(),
//!     template: "xx-template".to_string(),
//! };
//! let request = TemplateRequest::new("demo", answers)?;
//!
//! let pipeline = DownloadPipeline::new(ProcessRunner, &config, Utf8PathBuf::from("."));
//! let report = pipeline.run(&request).await?;
//! println!("Created {}", report.project_dir);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scaffold from an archive
//!
//! ```no_run
//! use stencil_core::HierarchicalConfigLoader;
//! use stencil_projects::archive::ArchiveFetcher;
//! use stencil_projects::types::TemplateAnswers;
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HierarchicalConfigLoader::new()?.load()?;
//! let answers = TemplateAnswers {
//!     name: "demo".to_string(),
//!     description: "Demo project".to_string(),
//!     author: "Jane".to_string(),
//!     template: "xx-template".to_string(),
//! };
//!
//! let fetcher = ArchiveFetcher::new(&config)?;
//! fetcher.fetch(Utf8Path::new("."), "demo", &answers).await?;
//! # Ok(())
//! # }
//! ```

pub mod acquire;
pub mod archive;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod types;

pub use error::{Error, Result};

pub use acquire::{AcquisitionPlan, AcquisitionReport, AcquisitionStep, DownloadPipeline};
pub use archive::{ArchiveFetcher, PathRewriteRule};
pub use types::{AcquisitionOutcome, ManifestPatch, TemplateAnswers, TemplateRequest};
