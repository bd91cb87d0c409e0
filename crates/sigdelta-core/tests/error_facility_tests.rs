#![allow(clippy::unwrap_used, clippy::expect_used)]

use sigdelta_core::errors::{ExError, ExErrorKind, SigDeltaError};
use sigdelta_core::{InconsistencyReason, Version, VersionTransition};

fn t(from: (u16, u16), to: (u16, u16)) -> VersionTransition {
    VersionTransition::new(Version::new(from.0, from.1), Version::new(to.0, to.1)).unwrap()
}

#[test]
fn test_unknown_version_verifiable_by_kind() {
    let err = SigDeltaError::UnknownVersion {
        version: Version::new(7, 4),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnknownVersion);
    assert_eq!(ex_err.code(), "ERR_UNKNOWN_VERSION");
    assert_eq!(ex_err.version(), Some(Version::new(7, 4)));
}

#[test]
fn test_future_version_distinct_from_unknown() {
    let err = SigDeltaError::UnsupportedFutureVersion {
        target: Version::new(8, 5),
        baseline: Version::new(8, 4),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnsupportedFutureVersion);
    assert_ne!(ex_err.kind(), ExErrorKind::UnknownVersion);
    assert_eq!(ex_err.version(), Some(Version::new(8, 5)));
    assert!(ex_err.message().contains("8.4"));
}

#[test]
fn test_routine_state_conflict_structured_fields() {
    let err = SigDeltaError::RoutineStateConflict {
        transition: t((8, 3), (8, 4)),
        routine: "array_find".to_string(),
        expected: "present as (): mixed".to_string(),
        found: "absent".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::RoutineStateConflict);
    assert_eq!(ex_err.code(), "ERR_ROUTINE_STATE_CONFLICT");
    assert_eq!(ex_err.routine(), Some("array_find"));
    assert_eq!(ex_err.transition(), Some(t((8, 3), (8, 4))));
    assert!(ex_err.message().contains("absent"));
}

#[test]
fn test_inconsistent_chain_conversion() {
    let err = SigDeltaError::InconsistentChain {
        at: t((8, 2), (8, 3)),
        routine: "f".to_string(),
        reason: InconsistencyReason::NoOpChange,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InconsistentChain);
    assert_eq!(ex_err.routine(), Some("f"));
    assert_eq!(ex_err.transition(), Some(t((8, 2), (8, 3))));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::NonContiguousTransition, "ERR_NON_CONTIGUOUS_TRANSITION"),
        (ExErrorKind::DuplicateTransition, "ERR_DUPLICATE_TRANSITION"),
        (ExErrorKind::UnknownVersion, "ERR_UNKNOWN_VERSION"),
        (ExErrorKind::UnsupportedFutureVersion, "ERR_UNSUPPORTED_FUTURE_VERSION"),
        (ExErrorKind::InvalidVersionRange, "ERR_INVALID_VERSION_RANGE"),
        (ExErrorKind::BaselineMismatch, "ERR_BASELINE_MISMATCH"),
        (ExErrorKind::RoutineStateConflict, "ERR_ROUTINE_STATE_CONFLICT"),
        (ExErrorKind::InconsistentChain, "ERR_INCONSISTENT_CHAIN"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_builder_and_display() {
    let ex_err = ExError::new(ExErrorKind::Io)
        .with_op("load_chain_dir")
        .with_message("cannot read deltas/")
        .with_source(
            ExError::new(ExErrorKind::Io)
                .with_op("load_delta")
                .with_message("denied"),
        );

    assert_eq!(ex_err.op(), Some("load_chain_dir"));
    assert_eq!(
        ex_err.to_string(),
        "[ERR_IO] in operation 'load_chain_dir': cannot read deltas/; caused by [ERR_IO] in operation 'load_delta': denied"
    );
    assert!(std::error::Error::source(&ex_err).is_some());
    assert_eq!(ex_err.source_error().and_then(|s| s.op()), Some("load_delta"));
}

#[test]
fn test_invalid_transition_converts_from_core_types() {
    let invalid = VersionTransition::new(Version::new(8, 4), Version::new(8, 3)).unwrap_err();
    let err: SigDeltaError = invalid.into();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidTransition);
}
