//! Error types for stencil-projects

use thiserror::Error;

/// Result type alias using stencil-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Template acquisition error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project already exists
    #[error("Project already exists at: {path}")]
    ProjectExists { path: String },

    /// Invalid project name
    #[error("Invalid project name: '{name}'. {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// An acquisition step exited with a non-zero code
    #[error("Step '{step}' failed with exit code {exit_code}: {stderr}")]
    StepFailed {
        step: String,
        exit_code: i32,
        stderr: String,
    },

    /// Command not found
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// Process execution error
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Moving or removing template directories failed
    #[error("Layout normalization failed: {message}")]
    Layout { message: String },

    /// Manifest file missing
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// Manifest present but not a JSON object
    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },

    /// Template not present in the downloaded archive
    #[error("Template not found in archive: {template}")]
    TemplateNotFound { template: String },

    /// Archive download failed
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// Archive could not be read
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Template error from Tera
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] stencil_core::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a step failed error
    pub fn step_failed(step: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a manifest not found error
    pub fn manifest_not_found(path: impl Into<String>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }
}
