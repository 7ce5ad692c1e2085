//! Alternate archive source
//!
//! Downloads a zip or tar.gz holding one directory per template below a
//! common root (`template/<name>/...`), extracts the chosen template's
//! directory as the new project, then renders its manifest as a template
//! with `name`, `description` and `author`.

mod extract;
mod rewrite;

pub use extract::{extract_archive, ArchiveFormat};
pub use rewrite::PathRewriteRule;

use crate::error::{Error, Result};
use crate::manifest::render_manifest_file;
use crate::types::{validate_project_name, TemplateAnswers};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::time::Duration;
use stencil_core::types::validate_template_identifier;
use stencil_core::StencilConfig;
use tracing::{debug, info};

/// Variables available to the manifest template
#[derive(Debug, Serialize)]
struct ManifestVars<'a> {
    name: &'a str,
    description: &'a str,
    author: &'a str,
}

/// Summary of an archive scaffold
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    pub project_dir: Utf8PathBuf,
    pub files_extracted: usize,
    /// Whether a manifest was found and rendered
    pub manifest_rendered: bool,
}

/// Fetches templates from a remote archive
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    client: reqwest::Client,
    url: String,
    root: String,
    manifest_file: String,
}

impl ArchiveFetcher {
    pub fn new(config: &StencilConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.network.http_timeout_secs))
            .user_agent(config.network.user_agent.as_str())
            .build()
            .map_err(|e| Error::download(&config.archive.url, e.to_string()))?;

        Ok(Self {
            client,
            url: config.archive.url.clone(),
            root: config.archive.root.clone(),
            manifest_file: config.manifest.file_name.clone(),
        })
    }

    /// Override the archive location
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the archive into memory
    pub async fn download(&self) -> Result<Vec<u8>> {
        debug!("Downloading archive from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::download(&self.url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(
                &self.url,
                format!("HTTP {}", response.status()),
            ));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::download(&self.url, e.to_string()))?;

        info!("Downloaded {} bytes from {}", data.len(), self.url);
        Ok(data.to_vec())
    }

    /// Scaffold `workdir/<target>` from the template named in `answers`
    ///
    /// The target must not exist. When the archive has no files for the
    /// template nothing is left behind and [`Error::TemplateNotFound`] is
    /// returned.
    pub async fn fetch(
        &self,
        workdir: &Utf8Path,
        target: &str,
        answers: &TemplateAnswers,
    ) -> Result<ArchiveReport> {
        validate_project_name(target)?;
        validate_template_identifier(&answers.template)?;
        let project_dir = workdir.join(target);
        if project_dir.symlink_metadata().is_ok() {
            return Err(Error::project_exists(project_dir.as_str()));
        }

        let data = self.download().await?;
        let rule = PathRewriteRule::new(&self.root, &answers.template);

        let dest = project_dir.clone();
        let extract_rule = rule.clone();
        let files_extracted =
            tokio::task::spawn_blocking(move || extract_archive(&data, &extract_rule, &dest))
                .await
                .map_err(|e| Error::archive(format!("extraction task failed: {}", e)))??;

        if files_extracted == 0 {
            if project_dir.exists() {
                std::fs::remove_dir_all(&project_dir)?;
            }
            return Err(Error::template_not_found(rule.prefix()));
        }
        info!(
            "Extracted {} files from {} into {}",
            files_extracted,
            rule.prefix(),
            project_dir
        );

        let vars = ManifestVars {
            name: target,
            description: &answers.description,
            author: &answers.author,
        };
        let manifest_rendered =
            render_manifest_file(&project_dir.join(&self.manifest_file), &vars)?;

        Ok(ArchiveReport {
            project_dir,
            files_extracted,
            manifest_rendered,
        })
    }
}
