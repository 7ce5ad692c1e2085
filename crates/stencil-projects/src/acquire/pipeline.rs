//! Registry download pipeline

use super::plan::{AcquisitionPlan, AcquisitionStep};
use super::presence::locate_tool;
use super::runner::CommandRunner;
use crate::error::{Error, Result};
use crate::layout;
use crate::manifest::rewrite_manifest;
use crate::types::{AcquisitionOutcome, ManifestPatch, TemplateRequest};
use camino::Utf8PathBuf;
use stencil_core::types::ManifestConfig;
use stencil_core::StencilConfig;
use tracing::{debug, info, warn};

/// Outcome of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: AcquisitionStep,
    pub outcome: AcquisitionOutcome,
}

/// Summary of a completed acquisition
#[derive(Debug, Clone)]
pub struct AcquisitionReport {
    /// Final project directory
    pub project_dir: Utf8PathBuf,
    /// Executed steps, in order
    pub steps: Vec<StepReport>,
    /// Whether a nested template's wrapper directory was removed
    pub wrapper_removed: bool,
    /// Rewritten manifest
    pub manifest_path: Utf8PathBuf,
}

/// Fetches a template through the package registry into `workdir`
pub struct DownloadPipeline<R> {
    runner: R,
    workdir: Utf8PathBuf,
    package_manager: String,
    download_tool: String,
    manifest: ManifestConfig,
}

impl<R: CommandRunner> DownloadPipeline<R> {
    pub fn new(runner: R, config: &StencilConfig, workdir: Utf8PathBuf) -> Self {
        Self {
            runner,
            workdir,
            package_manager: config.package_manager.clone(),
            download_tool: config.download_tool.clone(),
            manifest: config.manifest.clone(),
        }
    }

    /// Build the step list, checking whether the helper tool is installed
    pub async fn plan(&self, request: &TemplateRequest) -> AcquisitionPlan {
        let installed_at = locate_tool(
            &self.runner,
            &self.package_manager,
            &self.download_tool,
            &self.workdir,
        )
        .await;
        debug!("{} installed at: {:?}", self.download_tool, installed_at);

        AcquisitionPlan::build(
            request.template(),
            request.project_name(),
            &self.package_manager,
            &self.download_tool,
            installed_at.as_deref(),
        )
    }

    /// Run the whole acquisition
    ///
    /// Fails before any side effect when the project directory exists. The
    /// first failing step stops the run; completed steps are not undone.
    pub async fn run(&self, request: &TemplateRequest) -> Result<AcquisitionReport> {
        let project_dir = self.workdir.join(request.project_name());
        if project_dir.symlink_metadata().is_ok() {
            return Err(Error::project_exists(project_dir.as_str()));
        }

        let plan = self.plan(request).await;
        info!(
            "Acquiring '{}' into {} ({} steps)",
            request.template(),
            project_dir,
            plan.steps().len()
        );

        let mut steps = Vec::with_capacity(plan.steps().len());
        for step in plan.steps() {
            let outcome = self.execute(step).await?;
            if !outcome.is_success() {
                warn!("Step '{}' exited with code {}", step, outcome.exit_code);
                return Err(Error::step_failed(
                    step.to_string(),
                    outcome.exit_code,
                    outcome.stderr.trim(),
                ));
            }
            debug!("Step '{}' completed", step);
            steps.push(StepReport {
                step: step.clone(),
                outcome,
            });
        }

        let wrapper_removed = if plan.is_nested() {
            layout::flatten(&self.workdir, request.template(), request.project_name())?
        } else {
            false
        };

        let manifest_path = project_dir.join(&self.manifest.file_name);
        let patch = ManifestPatch::from_answers(request.answers(), &self.manifest);
        rewrite_manifest(&manifest_path, &patch)?;

        info!("Project ready at {}", project_dir);
        Ok(AcquisitionReport {
            project_dir,
            steps,
            wrapper_removed,
            manifest_path,
        })
    }

    async fn execute(&self, step: &AcquisitionStep) -> Result<AcquisitionOutcome> {
        if let Some(command) = step.command(&self.workdir) {
            info!("Running {}", command);
            return self.runner.run(&command).await;
        }

        match step {
            AcquisitionStep::Rename { from, to } => {
                let from = self.workdir.join(from);
                let to = self.workdir.join(to);
                info!("Renaming {} -> {}", from, to);
                Ok(match tokio::fs::rename(&from, &to).await {
                    Ok(()) => AcquisitionOutcome::success(""),
                    Err(e) => AcquisitionOutcome::failure(1, format!("{}: {}", from, e)),
                })
            }
            _ => Err(Error::process_execution(format!(
                "step '{}' has no command",
                step
            ))),
        }
    }
}
