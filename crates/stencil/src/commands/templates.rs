//! `stencil templates` command handler

use anyhow::Result;
use camino::Utf8Path;

use crate::cli::TemplatesArgs;
use crate::output;

pub fn run(args: TemplatesArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.templates)?);
        return Ok(());
    }

    output::header("Available templates");
    for template in &config.templates {
        output::kv(&template.value, &template.description);
    }

    Ok(())
}
