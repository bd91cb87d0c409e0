//! Validate command
//!
//! Usage: sigdelta validate [--deltas DIR]
//!
//! Prints every consistency issue and the chain digest. Exits non-zero if any
//! issue is found.

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use sigdelta_core::errors::{ExError, ExErrorKind};
use sigdelta_core::{log_op_end, log_op_error, log_op_start, validate_all};
use sigdelta_store::{chain_digest, load_chain_dir, SigDeltaConfig};

use super::{elapsed_ms, missing_setting};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Directory of delta files
    #[arg(long)]
    pub deltas: Option<PathBuf>,
}

/// Execute validate command
pub fn execute(args: ValidateArgs, config: &SigDeltaConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    log_op_start!("validate");

    match run(&args, config) {
        Ok(chain_len) => {
            log_op_end!("validate", duration_ms = elapsed_ms(start), chain_len = chain_len);
            Ok(())
        }
        Err(e) => {
            log_op_error!("validate", e.clone(), duration_ms = elapsed_ms(start));
            Err(e.into())
        }
    }
}

fn run(args: &ValidateArgs, config: &SigDeltaConfig) -> Result<usize, ExError> {
    let deltas_dir = args
        .deltas
        .as_ref()
        .or(config.deltas.as_ref())
        .ok_or_else(|| missing_setting("validate", "--deltas", "deltas"))?;

    let chain = load_chain_dir(deltas_dir)?;
    let issues = validate_all(&chain);

    for issue in &issues {
        println!("issue: {}", issue);
    }
    println!("transitions: {}", chain.len());
    println!("digest: {}", chain_digest(&chain)?);

    if !issues.is_empty() {
        return Err(ExError::new(ExErrorKind::InconsistentChain)
            .with_op("validate")
            .with_message(format!(
                "{} consistency issue(s) in {}",
                issues.len(),
                deltas_dir.display()
            )));
    }

    Ok(chain.len())
}
