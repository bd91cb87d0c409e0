use crate::chain::DeltaChain;
use crate::errors::Result;

use super::invariants::{self, ChainIssue};

/// Collect every consistency issue in the chain
///
/// Issues are ordered by transition, then routine name, so the first entry is
/// always the earliest offending record.
pub fn validate_all(chain: &DeltaChain) -> Vec<ChainIssue> {
    let mut issues = invariants::find_noop_changes(chain);
    issues.extend(invariants::find_boundary_mismatches(chain));
    issues.sort_by(|a, b| (a.at, &a.routine).cmp(&(b.at, &b.routine)));
    issues
}

/// Validate that the chain composes without contradiction
///
/// Checks that no `changed` entry is a no-op and that, for every routine, the
/// state each transition asserts on its older side matches the state the
/// previous transition mentioning that routine left on its newer side.
///
/// # Errors
///
/// Returns `InconsistentChain` for the earliest offending transition and
/// routine. For exhaustive reporting, call [`validate_all`].
pub fn validate(chain: &DeltaChain) -> Result<()> {
    match validate_all(chain).into_iter().next() {
        Some(issue) => Err(issue.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SigDeltaError;
    use crate::model::{Delta, RoutineChange, Signature};
    use crate::rules::InconsistencyReason;
    use sigdelta_core_types::{Version, VersionTransition};

    fn t(from: u16, to: u16) -> VersionTransition {
        VersionTransition::new(Version::new(8, from), Version::new(8, to)).unwrap()
    }

    fn delta(entries: Vec<(&str, RoutineChange)>) -> Delta {
        entries.into_iter().collect()
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate(&DeltaChain::new()).is_ok());
    }

    #[test]
    fn test_removed_then_added_is_valid() {
        let chain = DeltaChain::from_entries(vec![
            (t(1, 2), delta(vec![("f", RoutineChange::Removed(Signature::new("int")))])),
            (t(2, 3), delta(vec![("f", RoutineChange::Added(Signature::new("string")))])),
        ])
        .unwrap();
        assert!(validate(&chain).is_ok());
    }

    #[test]
    fn test_removed_then_changed_is_reported() {
        let chain = DeltaChain::from_entries(vec![
            (t(1, 2), delta(vec![("f", RoutineChange::Removed(Signature::new("int")))])),
            (
                t(2, 3),
                delta(vec![(
                    "f",
                    RoutineChange::Changed {
                        old: Signature::new("int"),
                        new: Signature::new("string"),
                    },
                )]),
            ),
        ])
        .unwrap();
        let err = validate(&chain).unwrap_err();
        assert!(matches!(
            err,
            SigDeltaError::InconsistentChain { at, ref routine, .. }
                if at == t(2, 3) && routine == "f"
        ));
    }

    #[test]
    fn test_noop_change_is_reported() {
        let same = Signature::new("void");
        let chain = DeltaChain::from_entries(vec![(
            t(3, 4),
            delta(vec![(
                "f",
                RoutineChange::Changed {
                    old: same.clone(),
                    new: same,
                },
            )]),
        )])
        .unwrap();
        let issues = validate_all(&chain);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].reason, InconsistencyReason::NoOpChange);
    }
}
