//! Resolve command
//!
//! Usage: sigdelta resolve --target <V> [--baseline FILE --baseline-version <V> --deltas DIR] [-o FILE]

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use sigdelta_core::errors::ExError;
use sigdelta_core::{log_op_end, log_op_error, log_op_start, Resolver, Version};
use sigdelta_store::{load_chain_dir, load_table, write_table, SigDeltaConfig};

use super::{elapsed_ms, missing_setting, print_json};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Version to reconstruct
    #[arg(long)]
    pub target: Version,

    /// Full signature table of the newest version
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Version of the baseline table
    #[arg(long)]
    pub baseline_version: Option<Version>,

    /// Directory of delta files
    #[arg(long)]
    pub deltas: Option<PathBuf>,

    /// Write the resolved table here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute resolve command
pub fn execute(args: ResolveArgs, config: &SigDeltaConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    log_op_start!("resolve", target_version = %args.target);

    match run(&args, config) {
        Ok(table_len) => {
            log_op_end!("resolve", duration_ms = elapsed_ms(start), table_len = table_len);
            Ok(())
        }
        Err(e) => {
            log_op_error!("resolve", e.clone(), duration_ms = elapsed_ms(start));
            Err(e.into())
        }
    }
}

fn run(args: &ResolveArgs, config: &SigDeltaConfig) -> Result<usize, ExError> {
    let baseline_path = args
        .baseline
        .as_ref()
        .or(config.baseline.as_ref())
        .ok_or_else(|| missing_setting("resolve", "--baseline", "baseline"))?;
    let baseline_version = args
        .baseline_version
        .or(config.baseline_version)
        .ok_or_else(|| missing_setting("resolve", "--baseline-version", "baseline_version"))?;
    let deltas_dir = args
        .deltas
        .as_ref()
        .or(config.deltas.as_ref())
        .ok_or_else(|| missing_setting("resolve", "--deltas", "deltas"))?;

    let baseline = load_table(baseline_path)?;
    let chain = load_chain_dir(deltas_dir)?;

    let resolver = Resolver::new(&baseline, baseline_version, &chain)
        .map_err(|e| ExError::from(e).with_op("resolve"))?;
    let table = resolver
        .resolve(args.target)
        .map_err(|e| ExError::from(e).with_op("resolve"))?;

    match &args.output {
        Some(path) => {
            write_table(path, &table)?;
            println!(
                "Wrote {} ({} routines at {})",
                path.display(),
                table.len(),
                args.target
            );
        }
        None => print_json("resolve", &table)?,
    }

    Ok(table.len())
}
