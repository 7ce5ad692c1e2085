//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stencil - scaffold new projects from templates
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a stencil config file (default: ~/.stencil/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project directory from a template
    Init(InitArgs),

    /// List the templates offered by `init`
    Templates(TemplatesArgs),
}

// Init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create for the project
    pub name: String,

    /// Where the template is fetched from
    #[arg(short, long, value_enum, default_value = "registry")]
    pub source: Source,

    /// Template to use (skips the selection prompt)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Package name written into the manifest
    #[arg(long)]
    pub package_name: Option<String>,

    /// Project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Project author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Fetch the template package through the package manager
    Registry,

    /// Download the template archive (git/zip)
    Archive,
}

// Templates command
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["stencil", "init", "demo"]).unwrap();
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.name, "demo");
        assert_eq!(args.source, Source::Registry);
        assert!(args.template.is_none());
        assert!(!args.yes);
    }

    #[test]
    fn test_init_with_flags() {
        let cli = Cli::try_parse_from([
            "stencil",
            "-vv",
            "init",
            "demo",
            "--source",
            "archive",
            "--template",
            "group/tmpl",
            "--package-name",
            "@acme/demo",
            "-d",
            "Demo",
            "-a",
            "Jane",
            "-y",
            "--config",
            "/tmp/stencil.yaml",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref().map(|p| p.as_str()), Some("/tmp/stencil.yaml"));
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.source, Source::Archive);
        assert_eq!(args.template.as_deref(), Some("group/tmpl"));
        assert_eq!(args.package_name.as_deref(), Some("@acme/demo"));
        assert_eq!(args.description.as_deref(), Some("Demo"));
        assert_eq!(args.author.as_deref(), Some("Jane"));
        assert!(args.yes);
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::try_parse_from(["stencil", "templates", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_init_requires_name() {
        assert!(Cli::try_parse_from(["stencil", "init"]).is_err());
    }

    #[test]
    fn test_unknown_source_rejected() {
        assert!(Cli::try_parse_from(["stencil", "init", "demo", "--source", "git"]).is_err());
    }
}
