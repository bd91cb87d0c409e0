//! Delta computation engine.
//!
//! [`diff`] compares two signature tables and produces the minimal
//! [`Delta`] that turns the older one into the newer one.
//! [`diff_signatures`] explains one changed routine at parameter granularity.

use std::collections::{BTreeSet, HashSet};

use crate::diff::model::ParamEdit;
use crate::model::{Delta, RoutineChange, Signature, SignatureTable};

/// Compute the delta from `older` to `newer`.
///
/// - routine only in `newer` -> `Added` with the newer signature
/// - routine only in `older` -> `Removed` with the older signature
/// - routine in both with unequal signatures -> `Changed { old, new }`
/// - routine in both with equal signatures -> nothing
///
/// Never fails; diffing a table against itself yields an empty delta.
pub fn diff(older: &SignatureTable, newer: &SignatureTable) -> Delta {
    let names: BTreeSet<&str> = older.names().chain(newer.names()).collect();

    let delta: Delta = names
        .into_iter()
        .filter_map(|name| {
            let change = match (older.get(name), newer.get(name)) {
                (None, Some(new)) => RoutineChange::Added(new.clone()),
                (Some(old), None) => RoutineChange::Removed(old.clone()),
                (Some(old), Some(new)) if old != new => RoutineChange::Changed {
                    old: old.clone(),
                    new: new.clone(),
                },
                _ => return None,
            };
            Some((name, change))
        })
        .collect();

    let stats = delta.stats();
    tracing::debug!(
        older_len = older.len(),
        newer_len = newer.len(),
        added = stats.added,
        changed = stats.changed,
        removed = stats.removed,
        "computed delta"
    );

    delta
}

/// Explain the difference between two signatures of the same routine.
///
/// Parameters are matched on base name. Edits come out in a fixed order:
/// return type, then removals/retypes/marker changes in old positional order,
/// then additions in new positional order, then moves. The result is empty
/// exactly when the signatures are equal.
pub fn diff_signatures(old: &Signature, new: &Signature) -> Vec<ParamEdit> {
    let mut edits = Vec::new();

    if old.return_type() != new.return_type() {
        edits.push(ParamEdit::ReturnType {
            old: old.return_type().clone(),
            new: new.return_type().clone(),
        });
    }

    for (position, old_param) in old.params().iter().enumerate() {
        match new.param(&old_param.name) {
            None => edits.push(ParamEdit::Removed {
                name: old_param.name.clone(),
                optional: old_param.optional,
                type_expr: old_param.type_expr.clone(),
                position,
            }),
            Some((_, new_param)) => {
                if old_param.type_expr != new_param.type_expr {
                    edits.push(ParamEdit::Retyped {
                        name: old_param.name.clone(),
                        old: old_param.type_expr.clone(),
                        new: new_param.type_expr.clone(),
                    });
                }
                if old_param.optional != new_param.optional {
                    edits.push(ParamEdit::Optionality {
                        name: old_param.name.clone(),
                        was_optional: old_param.optional,
                        now_optional: new_param.optional,
                    });
                }
            }
        }
    }

    for (position, new_param) in new.params().iter().enumerate() {
        if old.param(&new_param.name).is_none() {
            edits.push(ParamEdit::Added {
                name: new_param.name.clone(),
                optional: new_param.optional,
                type_expr: new_param.type_expr.clone(),
                position,
            });
        }
    }

    edits.extend(moved_params(old, new));
    edits
}

/// Matched parameters whose rank among the matched set differs.
///
/// Ranking only over matched names keeps a plain insertion or removal from
/// showing up as a move of every later parameter.
fn moved_params(old: &Signature, new: &Signature) -> Vec<ParamEdit> {
    let old_names: HashSet<&str> = old.params().iter().map(|p| p.name.as_str()).collect();
    let new_names: HashSet<&str> = new.params().iter().map(|p| p.name.as_str()).collect();

    let old_matched: Vec<(usize, &str)> = old
        .params()
        .iter()
        .enumerate()
        .filter(|(_, p)| new_names.contains(p.name.as_str()))
        .map(|(i, p)| (i, p.name.as_str()))
        .collect();
    let new_matched: Vec<(usize, &str)> = new
        .params()
        .iter()
        .enumerate()
        .filter(|(_, p)| old_names.contains(p.name.as_str()))
        .map(|(i, p)| (i, p.name.as_str()))
        .collect();

    old_matched
        .iter()
        .zip(new_matched.iter())
        .filter(|((_, old_name), (_, new_name))| old_name != new_name)
        .filter_map(|((from, name), _)| {
            new.param(name).map(|(to, _)| ParamEdit::Moved {
                name: name.to_string(),
                from: *from,
                to,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(entries: &[(&str, &str)]) -> Signature {
        Signature::from_entries(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_equal_signatures_have_no_edits() {
        let s = sig(&[("0", "int"), ("a", "string")]);
        assert!(diff_signatures(&s, &s).is_empty());
    }

    #[test]
    fn test_marker_only_change_is_optionality_edit() {
        let old = sig(&[("0", "mixed"), ("status", "int|string")]);
        let new = sig(&[("0", "mixed"), ("status=", "int|string")]);
        assert_eq!(
            diff_signatures(&old, &new),
            vec![ParamEdit::Optionality {
                name: "status".to_string(),
                was_optional: false,
                now_optional: true,
            }]
        );
    }

    #[test]
    fn test_trailing_optional_addition() {
        let old = sig(&[("0", "string"), ("a", "int")]);
        let new = sig(&[("0", "string"), ("a", "int"), ("b=", "bool")]);
        assert_eq!(
            diff_signatures(&old, &new),
            vec![ParamEdit::Added {
                name: "b".to_string(),
                optional: true,
                type_expr: "bool".into(),
                position: 1,
            }]
        );
    }

    #[test]
    fn test_insertion_does_not_report_moves() {
        let old = sig(&[("0", "void"), ("a", "int"), ("c", "int")]);
        let new = sig(&[("0", "void"), ("a", "int"), ("b", "int"), ("c", "int")]);
        let edits = diff_signatures(&old, &new);
        assert_eq!(edits.len(), 1);
        assert!(matches!(edits[0], ParamEdit::Added { ref name, .. } if name == "b"));
    }

    #[test]
    fn test_swap_reports_moves() {
        let old = sig(&[("0", "void"), ("a", "int"), ("b", "int")]);
        let new = sig(&[("0", "void"), ("b", "int"), ("a", "int")]);
        assert_eq!(
            diff_signatures(&old, &new),
            vec![
                ParamEdit::Moved {
                    name: "a".to_string(),
                    from: 0,
                    to: 1
                },
                ParamEdit::Moved {
                    name: "b".to_string(),
                    from: 1,
                    to: 0
                },
            ]
        );
    }

    #[test]
    fn test_return_and_retype() {
        let old = sig(&[("0", "int"), ("x", "int")]);
        let new = sig(&[("0", "int|false"), ("x", "float")]);
        let edits = diff_signatures(&old, &new);
        assert_eq!(edits.len(), 2);
        assert!(matches!(edits[0], ParamEdit::ReturnType { .. }));
        assert!(matches!(edits[1], ParamEdit::Retyped { .. }));
    }
}
