//! Typed acquisition steps

use super::classify::is_nested;
use super::runner::CommandSpec;
use camino::Utf8Path;
use std::fmt;
use std::path::Path;

/// One step of a registry acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionStep {
    /// Install the helper tool globally (`<pm> install -g <tool>`)
    InstallTool {
        package_manager: String,
        tool: String,
    },
    /// Fetch the template package (`<tool> <template>@latest`)
    Fetch { tool: String, package: String },
    /// Rename the fetched directory to the project directory
    Rename { from: String, to: String },
}

impl AcquisitionStep {
    /// The subprocess this step runs, or `None` for in-process steps
    pub fn command(&self, cwd: &Utf8Path) -> Option<CommandSpec> {
        match self {
            Self::InstallTool {
                package_manager,
                tool,
            } => Some(
                CommandSpec::new(package_manager, cwd)
                    .arg("install")
                    .arg("-g")
                    .arg(tool),
            ),
            Self::Fetch { tool, package } => Some(CommandSpec::new(tool, cwd).arg(package)),
            Self::Rename { .. } => None,
        }
    }
}

impl fmt::Display for AcquisitionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallTool { tool, .. } => write!(f, "install {}", tool),
            Self::Fetch { package, .. } => write!(f, "fetch {}", package),
            Self::Rename { from, to } => write!(f, "rename {} -> {}", from, to),
        }
    }
}

/// Ordered steps for one acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionPlan {
    steps: Vec<AcquisitionStep>,
    nested: bool,
}

impl AcquisitionPlan {
    /// Build the step list for a template
    ///
    /// `installed_at` is the tool location found by the presence check. When
    /// it is known the fetch runs that executable directly; otherwise an
    /// install step is prepended and the fetch resolves `tool` by name.
    /// Flat templates get a trailing rename, nested ones are flattened after
    /// the steps have run.
    pub fn build(
        template: &str,
        project_name: &str,
        package_manager: &str,
        tool: &str,
        installed_at: Option<&Path>,
    ) -> Self {
        let nested = is_nested(template);
        let mut steps = Vec::with_capacity(3);

        let fetch_tool = match installed_at {
            Some(path) => path.to_string_lossy().into_owned(),
            None => {
                steps.push(AcquisitionStep::InstallTool {
                    package_manager: package_manager.to_string(),
                    tool: tool.to_string(),
                });
                tool.to_string()
            }
        };

        steps.push(AcquisitionStep::Fetch {
            tool: fetch_tool,
            package: format!("{}@latest", template),
        });

        if !nested {
            steps.push(AcquisitionStep::Rename {
                from: template.to_string(),
                to: project_name.to_string(),
            });
        }

        Self { steps, nested }
    }

    pub fn steps(&self) -> &[AcquisitionStep] {
        &self.steps
    }

    /// Whether the template is nested and needs flattening
    pub fn is_nested(&self) -> bool {
        self.nested
    }
}
