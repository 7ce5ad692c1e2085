//! Scripted command runner
//!
//! Answers the prefix query, records every invocation and simulates the
//! helper tool by writing the fetched package into the working directory.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use stencil_projects::acquire::{CommandRunner, CommandSpec};
use stencil_projects::{AcquisitionOutcome, Result};

use super::fixtures::TEMPLATE_MANIFEST;

#[derive(Clone)]
pub struct MockRunner {
    /// Output of `<pm> config get prefix`; `None` makes the query fail
    prefix: Option<Utf8PathBuf>,
    /// Program name of the helper tool
    tool: String,
    /// Forced outcomes keyed by program name
    failures: Arc<Mutex<HashMap<String, AcquisitionOutcome>>>,
    invocations: Arc<Mutex<Vec<String>>>,
    manifest: String,
}

impl MockRunner {
    pub fn new(tool: &str) -> Self {
        Self {
            prefix: None,
            tool: tool.to_string(),
            failures: Arc::new(Mutex::new(HashMap::new())),
            invocations: Arc::new(Mutex::new(Vec::new())),
            manifest: TEMPLATE_MANIFEST.to_string(),
        }
    }

    /// Report `prefix` as the global install prefix
    pub fn with_prefix(mut self, prefix: Utf8PathBuf) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Manifest written by the simulated fetch
    pub fn with_manifest(mut self, manifest: &str) -> Self {
        self.manifest = manifest.to_string();
        self
    }

    /// Make every run of `program` end with `exit_code`
    pub fn fail(&self, program: &str, exit_code: i32, stderr: &str) {
        self.failures.lock().unwrap().insert(
            program.to_string(),
            AcquisitionOutcome::failure(exit_code, stderr),
        );
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.invocations().iter().any(|c| c == command)
    }

    /// File name of the invoked program, so a tool run from its install path still matches
    fn program_name(command: &CommandSpec) -> &str {
        Path::new(&command.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&command.program)
    }

    fn simulate_fetch(&self, command: &CommandSpec) -> AcquisitionOutcome {
        let Some(package) = command.args.first() else {
            return AcquisitionOutcome::failure(1, "missing package argument");
        };
        let name = package.strip_suffix("@latest").unwrap_or(package);
        let dir = command.cwd.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("package.json"), &self.manifest).unwrap();
        AcquisitionOutcome::success(format!("downloaded {}", package))
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &CommandSpec) -> Result<AcquisitionOutcome> {
        self.invocations.lock().unwrap().push(command.to_string());

        let program = Self::program_name(command);
        if let Some(outcome) = self.failures.lock().unwrap().get(program) {
            return Ok(outcome.clone());
        }

        if command.args.starts_with(&["config".to_string(), "get".to_string()]) {
            return Ok(match &self.prefix {
                Some(prefix) => AcquisitionOutcome::success(format!("{}\n", prefix)),
                None => AcquisitionOutcome::failure(1, "npm ERR! prefix unavailable"),
            });
        }

        if program == self.tool {
            return Ok(self.simulate_fetch(command));
        }

        Ok(AcquisitionOutcome::success(""))
    }
}
