//! Core types for template acquisition

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use stencil_core::types::{validate_template_identifier, ManifestConfig};

/// Answers collected from the user before acquisition starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateAnswers {
    /// Package name written into the manifest
    pub name: String,
    /// Project description
    pub description: String,
    /// Project author
    pub author: String,
    /// Template identifier, optionally nested (`group/name`)
    pub template: String,
}

/// A validated scaffold request
///
/// Immutable once built; the pipeline only reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    project_name: String,
    answers: TemplateAnswers,
}

impl TemplateRequest {
    /// Validate the project directory name and template identifier, then bundle them
    pub fn new(project_name: impl Into<String>, answers: TemplateAnswers) -> Result<Self> {
        let project_name = project_name.into();
        validate_project_name(&project_name)?;
        validate_template_identifier(&answers.template)?;

        Ok(Self {
            project_name,
            answers,
        })
    }

    /// Target project directory name
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// User answers
    pub fn answers(&self) -> &TemplateAnswers {
        &self.answers
    }

    /// Template identifier
    pub fn template(&self) -> &str {
        &self.answers.template
    }
}

/// Check that a project name denotes a single directory entry
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_project_name(name, "Name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_project_name(
            name,
            "Name must not refer to the current or parent directory",
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::invalid_project_name(
            name,
            "Name must be a single directory, not a path",
        ));
    }
    Ok(())
}

/// Exit status and captured output of one acquisition step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl AcquisitionOutcome {
    /// A successful outcome with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed outcome with the given stderr
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the step exited with code zero
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Fields written into, and removed from, the fetched manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    /// Fields deleted entirely (publish restrictions)
    pub strip_fields: Vec<String>,
}

impl ManifestPatch {
    /// Build the patch from user answers and the manifest rules
    pub fn from_answers(answers: &TemplateAnswers, rules: &ManifestConfig) -> Self {
        Self {
            name: answers.name.clone(),
            version: rules.version.clone(),
            description: answers.description.clone(),
            author: answers.author.clone(),
            strip_fields: rules.strip_fields.clone(),
        }
    }
}
