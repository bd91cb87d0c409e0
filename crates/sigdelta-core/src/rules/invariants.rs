use std::collections::HashMap;
use std::fmt;

use sigdelta_core_types::VersionTransition;

use crate::chain::DeltaChain;
use crate::errors::SigDeltaError;
use crate::model::signature::describe_presence;
use crate::model::Signature;

/// Why a chain entry is inconsistent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InconsistencyReason {
    /// A `changed` entry whose old and new signatures are equal
    NoOpChange,
    /// The older side asserted at this transition disagrees with the newer
    /// side asserted by the previous transition that mentioned the routine
    BoundaryMismatch {
        previous: VersionTransition,
        previous_state: String,
        asserted_state: String,
    },
}

impl fmt::Display for InconsistencyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOpChange => f.write_str("changed entry has identical old and new signatures"),
            Self::BoundaryMismatch {
                previous,
                previous_state,
                asserted_state,
            } => write!(
                f,
                "older side is {} but {} left it {}",
                asserted_state, previous, previous_state
            ),
        }
    }
}

/// One inconsistency, located by transition and routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainIssue {
    pub at: VersionTransition,
    pub routine: String,
    pub reason: InconsistencyReason,
}

impl From<ChainIssue> for SigDeltaError {
    fn from(issue: ChainIssue) -> Self {
        SigDeltaError::InconsistentChain {
            at: issue.at,
            routine: issue.routine,
            reason: issue.reason,
        }
    }
}

impl fmt::Display for ChainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.at, self.routine, self.reason)
    }
}

/// Find `changed` entries that do not change anything
///
/// The diff engine never emits these, but hand-authored or loaded deltas can
/// contain them.
pub fn find_noop_changes(chain: &DeltaChain) -> Vec<ChainIssue> {
    chain
        .iter()
        .flat_map(|(transition, delta)| {
            delta.changed().filter_map(move |(routine, old, new)| {
                (old == new).then(|| ChainIssue {
                    at: *transition,
                    routine: routine.to_string(),
                    reason: InconsistencyReason::NoOpChange,
                })
            })
        })
        .collect()
}

/// Find routines whose asserted state does not carry over between transitions
///
/// Walking ascending, each routine's newer-side state is remembered from the
/// last transition that mentioned it. When a later transition mentions the
/// routine again, its older-side state must match. Absence is a state too:
/// `Removed` followed by `Added` is fine, `Removed` followed by `Changed` is
/// not.
pub fn find_boundary_mismatches(chain: &DeltaChain) -> Vec<ChainIssue> {
    let mut last_seen: HashMap<&str, (VersionTransition, Option<&Signature>)> = HashMap::new();
    let mut issues = Vec::new();

    for (transition, delta) in chain.iter() {
        for (routine, change) in delta.iter() {
            if let Some((previous, previous_state)) = last_seen.get(routine) {
                let asserted = change.older_side();
                if asserted != *previous_state {
                    tracing::debug!(
                        transition = %transition,
                        routine = routine,
                        previous = %previous,
                        "boundary mismatch"
                    );
                    issues.push(ChainIssue {
                        at: *transition,
                        routine: routine.to_string(),
                        reason: InconsistencyReason::BoundaryMismatch {
                            previous: *previous,
                            previous_state: describe_presence(*previous_state),
                            asserted_state: describe_presence(asserted),
                        },
                    });
                }
            }
            last_seen.insert(routine, (*transition, change.newer_side()));
        }
    }

    issues
}
