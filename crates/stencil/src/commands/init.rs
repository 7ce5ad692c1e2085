//! `stencil init` command handler

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use console::Term;
use dialoguer::{Input, Select};
use stencil_core::StencilConfig;
use stencil_projects::acquire::{DownloadPipeline, ProcessRunner};
use stencil_projects::types::validate_project_name;
use stencil_projects::{ArchiveFetcher, TemplateAnswers, TemplateRequest};

use crate::cli::{InitArgs, Source};
use crate::output;

/// Create a project directory from a template
pub async fn run(args: InitArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let workdir = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))?;

    validate_project_name(&args.name)?;
    let project_dir = workdir.join(&args.name);
    if project_dir.exists() {
        return Err(anyhow!("Directory '{}' already exists", args.name));
    }

    let interactive = !args.yes && Term::stdout().is_term();
    let answers = collect_answers(&args, &config, interactive)?;

    output::header("Create New Project");
    output::kv("Directory", project_dir.as_str());
    output::kv("Template", &answers.template);
    output::kv("Package name", &answers.name);
    output::line("");

    match args.source {
        Source::Registry => scaffold_from_registry(&config, workdir, &args.name, answers).await?,
        Source::Archive => scaffold_from_archive(&config, &workdir, &args.name, &answers).await?,
    }

    output::line("");
    output::info("Next steps:");
    output::line(&format!("   1. cd {}", args.name));
    output::line(&format!("   2. {} install", config.package_manager));

    Ok(())
}

/// Fill in every answer from flags, prompts, or configured defaults
fn collect_answers(
    args: &InitArgs,
    config: &StencilConfig,
    interactive: bool,
) -> Result<TemplateAnswers> {
    let defaults = &config.prompts;

    let name = answer(args.package_name.as_deref(), "Project name", &defaults.name, interactive)?;
    let description = answer(
        args.description.as_deref(),
        "Project description",
        &defaults.description,
        interactive,
    )?;
    let author = answer(args.author.as_deref(), "Author", &defaults.author, interactive)?;
    let template = choose_template(args.template.as_deref(), config, interactive)?;

    Ok(TemplateAnswers {
        name,
        description,
        author,
        template,
    })
}

fn answer(flag: Option<&str>, prompt: &str, default: &str, interactive: bool) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    if !interactive {
        return Ok(default.to_string());
    }

    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(value)
}

fn choose_template(flag: Option<&str>, config: &StencilConfig, interactive: bool) -> Result<String> {
    if let Some(value) = flag {
        return Ok(config.require_template(value)?.value.clone());
    }

    if !interactive || config.templates.len() == 1 {
        let first = config
            .templates
            .first()
            .ok_or_else(|| anyhow!("No templates configured"))?;
        return Ok(first.value.clone());
    }

    let items: Vec<String> = config
        .templates
        .iter()
        .map(|t| format!("{} - {}", t.value, t.description))
        .collect();

    let selection = Select::new()
        .with_prompt("Select a template")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(config.templates[selection].value.clone())
}

async fn scaffold_from_registry(
    config: &StencilConfig,
    workdir: Utf8PathBuf,
    project_name: &str,
    answers: TemplateAnswers,
) -> Result<()> {
    let request = TemplateRequest::new(project_name, answers)?;
    let pipeline = DownloadPipeline::new(ProcessRunner, config, workdir);

    let spinner = output::spinner(&format!("Downloading template {}...", request.template()));
    let result = pipeline.run(&request).await;
    spinner.finish_and_clear();
    let report = result.context("Template download failed")?;

    for step in &report.steps {
        tracing::debug!("{}: exit {}", step.step, step.outcome.exit_code);
    }

    output::success(&format!("Project '{}' created", project_name));
    output::kv("Location", report.project_dir.as_str());
    output::kv("Manifest", report.manifest_path.as_str());
    Ok(())
}

async fn scaffold_from_archive(
    config: &StencilConfig,
    workdir: &Utf8Path,
    project_name: &str,
    answers: &TemplateAnswers,
) -> Result<()> {
    let fetcher = ArchiveFetcher::new(config)?;

    let spinner = output::spinner(&format!("Downloading {}...", fetcher.url()));
    let result = fetcher.fetch(workdir, project_name, answers).await;
    spinner.finish_and_clear();
    let report = result.context("Archive download failed")?;

    if !report.manifest_rendered {
        output::warning(&format!(
            "No {} found in template; nothing was rendered",
            config.manifest.file_name
        ));
    }

    output::success(&format!(
        "Project '{}' created ({} files)",
        project_name, report.files_extracted
    ));
    output::kv("Location", report.project_dir.as_str());
    Ok(())
}
