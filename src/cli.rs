use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(name = "poisonmap")]
#[command(about = "Interface poisoning analyzer for Java codebases", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Java source tree for over-engineered interfaces
    Analyze {
        /// Path to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only the top N interfaces by poisoning index
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Weight for single-implementation risk
        #[arg(long)]
        alpha: Option<f64>,

        /// Weight for usage utilization
        #[arg(long)]
        beta: Option<f64>,

        /// Weight for unused-method rate
        #[arg(long)]
        gamma: Option<f64>,

        /// Weight for normalized call depth
        #[arg(long)]
        delta: Option<f64>,

        /// Minimum index classified as MEDIUM risk
        #[arg(long = "threshold-medium")]
        threshold_medium: Option<f64>,

        /// Index above which risk is HIGH
        #[arg(long = "threshold-high")]
        threshold_high: Option<f64>,

        /// Glob patterns to exclude from discovery (comma-separated)
        #[arg(long = "ignore", value_delimiter = ',')]
        ignore: Option<Vec<String>>,

        /// Disable parallel metric computation
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = all cores)
        #[arg(long, default_value = "0")]
        jobs: usize,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
