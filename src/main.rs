use anyhow::Result;
use clap::Parser;
use poisonmap::cli::{Cli, Commands};
use poisonmap::commands::analyze::AnalyzeConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            top,
            alpha,
            beta,
            gamma,
            delta,
            threshold_medium,
            threshold_high,
            ignore,
            no_parallel,
            jobs,
            verbosity,
        } => {
            init_logging(verbosity);
            let config = AnalyzeConfig {
                path,
                format,
                output,
                top,
                alpha,
                beta,
                gamma,
                delta,
                threshold_medium,
                threshold_high,
                ignore: ignore.unwrap_or_default(),
                parallel: !no_parallel,
                jobs,
            };
            poisonmap::commands::analyze::handle_analyze(config)
        }
        Commands::Init { force } => {
            init_logging(0);
            poisonmap::commands::init::init_config(force)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
