//! sigdelta CLI
//!
//! Command-line interface for diffing, resolving and validating versioned
//! routine signature tables

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use sigdelta_core::logging_facility::{init, Profile};
use sigdelta_store::{load_config, load_default_config, LogFormat, SigDeltaConfig};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sigdelta")]
#[command(about = "sigdelta - Versioned routine signature deltas", long_about = None)]
struct Cli {
    /// Log output format (overrides log_format in the config file)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    /// Config file for resolve and validate (defaults to ./sigdelta.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the delta between two signature tables
    Diff(commands::diff::DiffArgs),
    /// Reconstruct the signature table of an older version
    Resolve(commands::resolve::ResolveArgs),
    /// Check that a delta chain composes without contradiction
    Validate(commands::validate::ValidateArgs),
}

impl Commands {
    /// `diff` works on its arguments alone and never touches the config file
    fn reads_config(&self) -> bool {
        !matches!(self, Commands::Diff(_))
    }
}

fn main() {
    let cli = Cli::parse();

    let config = if cli.command.reads_config() {
        match read_config(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        SigDeltaConfig::default()
    };

    let log_format = match cli.log_format {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => config.log_format.unwrap_or_default(),
    };
    init(match log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args, &config),
        Commands::Validate(args) => commands::validate::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Explicit `--config` must exist; the implicit `./sigdelta.toml` is optional
fn read_config(path: Option<&Path>) -> sigdelta_store::Result<SigDeltaConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(load_default_config(Path::new("."))?.unwrap_or_default()),
    }
}
