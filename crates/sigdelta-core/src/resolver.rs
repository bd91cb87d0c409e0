//! Resolve the signature table of any chain version from the baseline.
//!
//! ## Contract
//!
//! - The baseline is the table of the newest version the chain reaches.
//! - Resolution walks the chain backward from the baseline and applies the
//!   inverse of each delta; the order is always derived from the chain.
//! - Before each inverse step the working table must hold exactly what the
//!   delta asserts for its newer side; otherwise resolution stops with
//!   `RoutineStateConflict`. There are no partial results.
//! - Inputs are never mutated. Every call returns a fresh table.
//!
//! ## Example
//!
//! ```
//! use sigdelta_core::{diff, DeltaChain, Resolver, Signature, SignatureTable};
//! use sigdelta_core::{Version, VersionTransition};
//!
//! let mut v83 = SignatureTable::new();
//! v83.insert("strlen", Signature::new("int"));
//! let mut v84 = v83.clone();
//! v84.insert("array_find", Signature::new("mixed"));
//!
//! let (old, new) = (Version::new(8, 3), Version::new(8, 4));
//! let mut chain = DeltaChain::new();
//! chain.append(VersionTransition::new(old, new).unwrap(), diff(&v83, &v84)).unwrap();
//!
//! let resolver = Resolver::new(&v84, new, &chain).unwrap();
//! assert_eq!(resolver.resolve(old).unwrap(), v83);
//! ```

use sigdelta_core_types::{Version, VersionTransition};

use crate::chain::DeltaChain;
use crate::errors::{Result, SigDeltaError};
use crate::model::signature::describe_presence;
use crate::model::{Delta, RoutineChange, SignatureTable};
use crate::rules;

/// A validated (baseline, chain) pair ready to answer resolution queries
///
/// Holds only shared references, so one resolver can serve concurrent
/// callers.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    baseline: &'a SignatureTable,
    baseline_version: Version,
    chain: &'a DeltaChain,
}

impl<'a> Resolver<'a> {
    /// Validate the chain and bind it to its baseline
    ///
    /// # Errors
    ///
    /// - `InconsistentChain` if the chain does not compose
    /// - `BaselineMismatch` if a non-empty chain's newest boundary is not
    ///   `baseline_version`
    pub fn new(
        baseline: &'a SignatureTable,
        baseline_version: Version,
        chain: &'a DeltaChain,
    ) -> Result<Self> {
        rules::validate(chain)?;

        if let Some(chain_head) = chain.newest() {
            if chain_head != baseline_version {
                return Err(SigDeltaError::BaselineMismatch {
                    baseline: baseline_version,
                    chain_head,
                });
            }
        }

        Ok(Self {
            baseline,
            baseline_version,
            chain,
        })
    }

    pub fn baseline_version(&self) -> Version {
        self.baseline_version
    }

    /// Versions this resolver can answer for, ascending
    pub fn supported_versions(&self) -> Vec<Version> {
        if self.chain.is_empty() {
            vec![self.baseline_version]
        } else {
            self.chain.boundaries()
        }
    }

    /// Produce the signature table as it was at `target`
    ///
    /// # Errors
    ///
    /// - `UnsupportedFutureVersion` if `target` is newer than the baseline
    /// - `UnknownVersion` if `target` is not a chain boundary
    /// - `RoutineStateConflict` if a delta's newer side disagrees with the
    ///   working table
    pub fn resolve(&self, target: Version) -> Result<SignatureTable> {
        if target > self.baseline_version {
            return Err(SigDeltaError::UnsupportedFutureVersion {
                target,
                baseline: self.baseline_version,
            });
        }
        if target == self.baseline_version {
            return Ok(self.baseline.clone());
        }
        if !self.chain.contains_boundary(target) {
            return Err(SigDeltaError::UnknownVersion { version: target });
        }

        let steps = self.chain.deltas_between(target, self.baseline_version)?;
        let mut working = self.baseline.clone();

        for (transition, delta) in steps.into_iter().rev() {
            step_back(&mut working, transition, delta)?;
            tracing::debug!(
                transition = %transition,
                delta_len = delta.len(),
                table_len = working.len(),
                "applied inverse delta"
            );
        }

        Ok(working)
    }
}

/// Undo one transition on the working table
///
/// All preconditions are checked before anything is changed; the partitions
/// are disjoint so the undo order within one delta does not matter.
fn step_back(
    working: &mut SignatureTable,
    transition: &VersionTransition,
    delta: &Delta,
) -> Result<()> {
    for (routine, change) in delta.iter() {
        let found = working.get(routine);
        let expected = change.newer_side();
        if found != expected {
            return Err(SigDeltaError::RoutineStateConflict {
                transition: *transition,
                routine: routine.to_string(),
                expected: describe_presence(expected),
                found: describe_presence(found),
            });
        }
    }

    for (routine, change) in delta.iter() {
        match change {
            RoutineChange::Added(_) => {
                working.remove(routine);
            }
            RoutineChange::Changed { old, .. } | RoutineChange::Removed(old) => {
                working.insert(routine, old.clone());
            }
        }
    }

    Ok(())
}

/// Resolve `target` in one call
///
/// Builds a [`Resolver`] (validating the chain) and resolves once.
///
/// # Errors
///
/// Any error of [`Resolver::new`] or [`Resolver::resolve`].
pub fn resolve(
    baseline: &SignatureTable,
    baseline_version: Version,
    chain: &DeltaChain,
    target: Version,
) -> Result<SignatureTable> {
    Resolver::new(baseline, baseline_version, chain)?.resolve(target)
}
