//! Fixtures shared by the integration tests

use camino::Utf8PathBuf;
use stencil_core::{HierarchicalConfigLoader, StencilConfig};
use stencil_projects::types::{TemplateAnswers, TemplateRequest};
use tempfile::TempDir;

/// Manifest published with every simulated template package
pub const TEMPLATE_MANIFEST: &str = r#"{
  "name": "xx-template",
  "version": "0.4.2",
  "description": "template package",
  "author": "template team",
  "scripts": {
    "dev": "vite"
  },
  "publishConfig": {
    "registry": "https://npm.internal.example.com"
  }
}"#;

/// Manifest stored in archives, rendered with Tera
pub const ARCHIVE_MANIFEST: &str = r#"{
  "name": "{{ name }}",
  "version": "1.0.0",
  "description": "{{ description }}",
  "author": "{{ author }}"
}
"#;

/// A temporary working directory
pub struct Workspace {
    _temp: TempDir,
    pub root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        Self { _temp: temp, root }
    }

    /// Every entry directly below the root, sorted
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Built-in configuration, ignoring any user file
pub fn default_config() -> StencilConfig {
    let dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    HierarchicalConfigLoader::with_dir(dir).load().unwrap()
}

pub fn answers(template: &str) -> TemplateAnswers {
    TemplateAnswers {
        name: "demo-app".to_string(),
        description: "Demo application".to_string(),
        author: "Jane Doe".to_string(),
        template: template.to_string(),
    }
}

pub fn request(project: &str, template: &str) -> TemplateRequest {
    TemplateRequest::new(project, answers(template)).unwrap()
}
