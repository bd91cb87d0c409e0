//! Diff command
//!
//! Usage: sigdelta diff <OLDER> <NEWER> --from <V> --to <V> [-o FILE] [--summary]

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use sigdelta_core::errors::{ExError, SigDeltaError};
use sigdelta_core::{diff, log_op_end, log_op_error, log_op_start, render_delta_summary};
use sigdelta_core::{Version, VersionTransition};
use sigdelta_store::{load_table, write_delta, DeltaFileV0};

use super::{elapsed_ms, print_json};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Signature table of the older version
    pub older: PathBuf,

    /// Signature table of the newer version
    pub newer: PathBuf,

    /// Version of the older table (e.g. 8.3)
    #[arg(long)]
    pub from: Version,

    /// Version of the newer table (e.g. 8.4)
    #[arg(long)]
    pub to: Version,

    /// Write the delta file here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print a Markdown summary of the delta
    #[arg(long)]
    pub summary: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    log_op_start!("diff", transition = %format!("{} -> {}", args.from, args.to));

    match run(&args) {
        Ok(delta_len) => {
            log_op_end!("diff", duration_ms = elapsed_ms(start), delta_len = delta_len);
            Ok(())
        }
        Err(e) => {
            log_op_error!("diff", e.clone(), duration_ms = elapsed_ms(start));
            Err(e.into())
        }
    }
}

fn run(args: &DiffArgs) -> Result<usize, ExError> {
    let transition = VersionTransition::new(args.from, args.to)
        .map_err(|e| ExError::from(SigDeltaError::from(e)).with_op("diff"))?;

    let older = load_table(&args.older)?;
    let newer = load_table(&args.newer)?;
    let delta = diff(&older, &newer);

    match &args.output {
        Some(path) => {
            write_delta(path, &transition, &delta)?;
            let stats = delta.stats();
            println!(
                "Wrote {} ({} added, {} changed, {} removed)",
                path.display(),
                stats.added,
                stats.changed,
                stats.removed
            );
        }
        None => print_json("diff", &DeltaFileV0::from_delta(&transition, &delta))?,
    }

    if args.summary {
        println!("{}", render_delta_summary(&transition, &delta));
    }

    Ok(delta.len())
}
