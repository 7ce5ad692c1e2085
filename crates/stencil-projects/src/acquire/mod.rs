//! Registry acquisition
//!
//! Fetching a template from the package registry is an ordered list of
//! typed steps:
//! - install the helper download tool (only when it is not installed yet)
//! - fetch `<template>@latest` with the helper tool
//! - rename the fetched directory to the project name (flat templates only)
//!
//! Each step runs on its own and reports an [`AcquisitionOutcome`]; the
//! first failing step stops the pipeline. Nested templates are flattened by
//! [`crate::layout`] afterwards, then the manifest is rewritten.
//!
//! [`AcquisitionOutcome`]: crate::types::AcquisitionOutcome

mod classify;
mod pipeline;
mod plan;
mod presence;
mod runner;

pub use classify::{is_nested, wrapper_dir, TEMPLATE_SEPARATOR};
pub use pipeline::{AcquisitionReport, DownloadPipeline, StepReport};
pub use plan::{AcquisitionPlan, AcquisitionStep};
pub use presence::{global_bin_dir, is_tool_installed, locate_tool, prefix_query};
pub use runner::{CommandRunner, CommandSpec, ProcessRunner};
