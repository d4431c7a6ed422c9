use crate::config::{CliOverrides, Config};
use crate::error::{QuartoHeaderError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quarto-header")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Put a standard Quarto header on notebooks and .qmd files")]
#[command(
    long_about = "quarto-header writes a standard YAML header at the top of Jupyter notebooks \
                  (.ipynb) and Quarto documents (.qmd), then copies the style and _extensions \
                  folders next to each document. PATH may be a single document or a directory \
                  whose documents are processed one by one."
)]
#[command(after_help = "EXAMPLES:\n  \
    quarto-header \"Lab 3\" \"Linear models\" false lab3.ipynb\n  \
    quarto-header \"Week 5\" \"Notes\" yes lectures/\n  \
    quarto-header \"Week 5\" \"Notes\" no lectures/ --yes --assets-dir ~/quarto-assets\n  \
    quarto-header --generate-config --config quarto-header.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Title for the header
    #[arg(required_unless_present = "generate_config")]
    pub title: Option<String>,

    /// Subtitle for the header
    #[arg(required_unless_present = "generate_config")]
    pub subtitle: Option<String>,

    /// Render to a single self-contained HTML file (yes/no, true/false, 1/0)
    #[arg(value_parser = parse_bool, required_unless_present = "generate_config")]
    pub self_contained: Option<bool>,

    /// Path to a .ipynb or .qmd file, or a directory containing them
    #[arg(required_unless_present = "generate_config")]
    pub path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Directory holding the asset folders to copy
    #[arg(long, help = "Directory containing the style and _extensions folders")]
    pub assets_dir: Option<PathBuf>,

    /// Author written into the header
    #[arg(long)]
    pub author: Option<String>,

    /// Answer yes to every prompt
    #[arg(short = 'y', long, conflicts_with = "no")]
    pub yes: bool,

    /// Answer no to every prompt
    #[arg(short = 'n', long)]
    pub no: bool,

    /// Output format for messages and the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

/// How prompts are answered for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPolicy {
    Interactive,
    AlwaysYes,
    AlwaysNo,
}

/// The positional arguments of a processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub title: String,
    pub subtitle: String,
    pub self_contained: bool,
    pub path: PathBuf,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_author(self.author.clone())
            .with_assets_dir(self.assets_dir.clone())
    }

    pub fn invocation(&self) -> Result<Invocation> {
        match (&self.title, &self.subtitle, self.self_contained, &self.path) {
            (Some(title), Some(subtitle), Some(self_contained), Some(path)) => Ok(Invocation {
                title: title.clone(),
                subtitle: subtitle.clone(),
                self_contained,
                path: path.clone(),
            }),
            _ => Err(QuartoHeaderError::Config {
                message: "TITLE, SUBTITLE, SELF_CONTAINED and PATH are required".to_string(),
            }),
        }
    }

    pub fn prompt_policy(&self) -> PromptPolicy {
        if self.yes {
            PromptPolicy::AlwaysYes
        } else if self.no {
            PromptPolicy::AlwaysNo
        } else {
            PromptPolicy::Interactive
        }
    }
}

/// Parse a yes/no style flag.
pub fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.to_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "f" | "n" | "0" => Ok(false),
        _ => Err("Boolean value expected.".to_string()),
    }
}
