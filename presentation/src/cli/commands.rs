//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use esg_domain::TaskPriority;
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with every branch
    Full,
    /// Headline scores and recommendations only
    Summary,
    /// JSON output
    Json,
}

/// Priority hint for submitted tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
    Critical,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => TaskPriority::Low,
            PriorityArg::Normal => TaskPriority::Normal,
            PriorityArg::High => TaskPriority::High,
            PriorityArg::Critical => TaskPriority::Critical,
        }
    }
}

/// CLI arguments for esg-analyzer
#[derive(Parser, Debug)]
#[command(name = "esg-analyzer")]
#[command(author, version, about = "ESG analysis pipeline - scoring, compliance and validation")]
#[command(long_about = r#"
Analyzes ESG (environmental, social, governance) records. A full analysis
fans out into five concurrent branches: one insight score per category,
a compliance check against framework requirement tables, and a data
validation pass. The branches are aggregated into a single report.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./esg-analyzer.toml   Project-level config
3. ~/.config/esg-analyzer/config.toml   Global config

Example:
  esg-analyzer analyze report-2025.json
  esg-analyzer analyze --output summary --priority high report-2025.json
  esg-analyzer validate --output json report-2025.json
  esg-analyzer config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a full analysis of a record and print the report
    Analyze {
        /// JSON file with one ESG record
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,

        /// Priority hint recorded on the task
        #[arg(long, value_enum, default_value = "normal")]
        priority: PriorityArg,
    },

    /// Validate a record without running the analysis pipeline
    Validate {
        /// JSON file with one ESG record
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,
    },

    /// Show configuration sources and any issues in the merged config
    Config,
}
