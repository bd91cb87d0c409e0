//! Human-readable summary renderer for deltas.

use sigdelta_core_types::VersionTransition;

use crate::diff::model::ParamEdit;
use crate::model::Delta;

/// Render a Markdown summary of a [`Delta`].
///
/// Intended for reviewing regenerated delta records. Informational only; it
/// does not affect the structured delta.
pub fn render_delta_summary(transition: &VersionTransition, delta: &Delta) -> String {
    let mut out = String::new();

    out.push_str(&format!("## Signature Delta {}\n\n", transition));

    let stats = delta.stats();
    out.push_str(&format!(
        "**Added**: {}  \n**Changed**: {}  \n**Removed**: {}\n\n",
        stats.added, stats.changed, stats.removed
    ));

    if delta.is_empty() {
        out.push_str("_No signature changes._\n");
        return out;
    }

    if stats.added > 0 {
        out.push_str("### Added\n\n");
        for (name, sig) in delta.added() {
            out.push_str(&format!("- `{}{}`\n", name, sig));
        }
        out.push('\n');
    }

    if stats.changed > 0 {
        out.push_str("### Changed\n\n");
        for (name, change) in delta.iter() {
            let edits = change.edits();
            if edits.is_empty() {
                continue;
            }
            out.push_str(&format!("- `{}` (touches {})\n", name, touched_slots(&edits)));
            for edit in &edits {
                out.push_str(&format!("  - {}\n", describe_edit(edit)));
            }
        }
        out.push('\n');
    }

    if stats.removed > 0 {
        out.push_str("### Removed\n\n");
        for (name, sig) in delta.removed() {
            out.push_str(&format!("- `{}{}`\n", name, sig));
        }
        out.push('\n');
    }

    out
}

/// Distinct slots named by `edits`, in edit order
fn touched_slots(edits: &[ParamEdit]) -> String {
    let mut slots: Vec<String> = Vec::new();
    for edit in edits {
        let slot = match edit.param_name() {
            Some(name) => format!("`{}`", name),
            None => "return type".to_string(),
        };
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }
    slots.join(", ")
}

fn describe_edit(edit: &ParamEdit) -> String {
    match edit {
        ParamEdit::ReturnType { old, new } => {
            format!("return type `{}` -> `{}`", old, new)
        }
        ParamEdit::Added {
            name,
            optional,
            type_expr,
            position,
        } => format!(
            "added {}parameter `{}: {}` at position {}",
            if *optional { "optional " } else { "" },
            name,
            type_expr,
            position
        ),
        ParamEdit::Removed {
            name,
            type_expr,
            position,
            ..
        } => format!(
            "removed parameter `{}: {}` from position {}",
            name, type_expr, position
        ),
        ParamEdit::Retyped { name, old, new } => {
            format!("parameter `{}` type `{}` -> `{}`", name, old, new)
        }
        ParamEdit::Optionality {
            name, now_optional, ..
        } => {
            if *now_optional {
                format!("parameter `{}` became optional", name)
            } else {
                format!("parameter `{}` became required", name)
            }
        }
        ParamEdit::Moved { name, from, to } => {
            format!("parameter `{}` moved from position {} to {}", name, from, to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoutineChange, Signature};
    use sigdelta_core_types::Version;

    fn transition() -> VersionTransition {
        VersionTransition::new(Version::new(8, 3), Version::new(8, 4)).unwrap()
    }

    #[test]
    fn test_empty_delta_summary() {
        let out = render_delta_summary(&transition(), &Delta::new());
        assert!(out.contains("8.3 -> 8.4"));
        assert!(out.contains("_No signature changes._"));
    }

    #[test]
    fn test_changed_entry_lists_edits() {
        let old = Signature::from_entries([("0", "mixed"), ("status", "int|string")]).unwrap();
        let new = Signature::from_entries([("0", "mixed"), ("status=", "int|string")]).unwrap();
        let mut delta = Delta::new();
        delta.insert("pcntl_wait", RoutineChange::Changed { old, new });
        delta.insert("array_find", RoutineChange::Added(Signature::new("mixed")));

        let out = render_delta_summary(&transition(), &delta);
        assert!(out.contains("### Changed"));
        assert!(out.contains("- `pcntl_wait` (touches `status`)"));
        assert!(out.contains("parameter `status` became optional"));
        assert!(out.contains("- `array_find(): mixed`"));
        assert!(!out.contains("### Removed"));
    }

    #[test]
    fn test_touched_slots_are_listed_once() {
        let old = Signature::from_entries([("0", "int"), ("a", "int"), ("b", "int")]).unwrap();
        let new = Signature::from_entries([("0", "string"), ("b=", "string"), ("a", "int")]).unwrap();
        let mut delta = Delta::new();
        delta.insert("f", RoutineChange::Changed { old, new });

        let out = render_delta_summary(&transition(), &delta);
        let header = out.lines().find(|l| l.starts_with("- `f`")).unwrap();
        assert_eq!(header.matches("`b`").count(), 1);
        assert!(header.contains("return type"));
        assert!(header.contains("`a`"));
    }
}
