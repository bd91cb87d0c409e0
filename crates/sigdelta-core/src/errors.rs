use sigdelta_core_types::{InvalidTransition, Version, VersionParseError, VersionTransition};
use thiserror::Error;

use crate::rules::InconsistencyReason;

/// Result type alias using SigDeltaError
pub type Result<T> = std::result::Result<T, SigDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output. None of these are transient:
/// every kind describes a structural fault in immutable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Chain structure
    NonContiguousTransition,
    DuplicateTransition,
    InvalidTransition,

    // Resolution
    UnknownVersion,
    UnsupportedFutureVersion,
    InvalidVersionRange,
    BaselineMismatch,
    RoutineStateConflict,

    // Validation
    InconsistentChain,
    InvalidSignature,
    InvalidVersion,
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NonContiguousTransition => "ERR_NON_CONTIGUOUS_TRANSITION",
            ExErrorKind::DuplicateTransition => "ERR_DUPLICATE_TRANSITION",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::UnknownVersion => "ERR_UNKNOWN_VERSION",
            ExErrorKind::UnsupportedFutureVersion => "ERR_UNSUPPORTED_FUTURE_VERSION",
            ExErrorKind::InvalidVersionRange => "ERR_INVALID_VERSION_RANGE",
            ExErrorKind::BaselineMismatch => "ERR_BASELINE_MISMATCH",
            ExErrorKind::RoutineStateConflict => "ERR_ROUTINE_STATE_CONFLICT",
            ExErrorKind::InconsistentChain => "ERR_INCONSISTENT_CHAIN",
            ExErrorKind::InvalidSignature => "ERR_INVALID_SIGNATURE",
            ExErrorKind::InvalidVersion => "ERR_INVALID_VERSION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus the context needed to locate the bad
/// record: operation, routine name, transition and version.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    routine: Option<String>,
    transition: Option<VersionTransition>,
    version: Option<Version>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            routine: None,
            transition: None,
            version: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add routine name context
    pub fn with_routine(mut self, routine: impl Into<String>) -> Self {
        self.routine = Some(routine.into());
        self
    }

    /// Add transition context
    pub fn with_transition(mut self, transition: VersionTransition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Add version context
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn routine(&self) -> Option<&str> {
        self.routine.as_deref()
    }

    pub fn transition(&self) -> Option<VersionTransition> {
        self.transition
    }

    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(routine) = &self.routine {
            write!(f, " (routine: {})", routine)?;
        }
        if let Some(transition) = &self.transition {
            write!(f, " (transition: {})", transition)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for delta diff/apply operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigDeltaError {
    // ===== Chain Errors =====
    /// Appended transition does not start where the chain ends
    #[error("Transition {transition} does not continue the chain (expected it to start at {expected_from})")]
    NonContiguousTransition {
        transition: VersionTransition,
        expected_from: Version,
    },

    /// Transition is already present in the chain
    #[error("Transition {transition} is already present in the chain")]
    DuplicateTransition { transition: VersionTransition },

    /// Transition endpoints are not in forward order
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    // ===== Resolution Errors =====
    /// Version is not a boundary of any transition in the chain
    #[error("Version {version} is not a transition boundary of the chain")]
    UnknownVersion { version: Version },

    /// Target lies beyond the baseline
    #[error("Cannot resolve version {target}: baseline {baseline} is the newest known version")]
    UnsupportedFutureVersion { target: Version, baseline: Version },

    /// Range lookup with endpoints in the wrong order
    #[error("Invalid version range: {from} is newer than {to}")]
    InvalidVersionRange { from: Version, to: Version },

    /// Baseline version is not the newest boundary of the chain
    #[error("Baseline version {baseline} does not match the newest chain boundary {chain_head}")]
    BaselineMismatch {
        baseline: Version,
        chain_head: Version,
    },

    /// Working table disagrees with what a delta asserts about its newer side
    #[error("Routine {routine} conflicts at {transition}: expected {expected}, found {found}")]
    RoutineStateConflict {
        transition: VersionTransition,
        routine: String,
        expected: String,
        found: String,
    },

    // ===== Validation Errors =====
    /// Two deltas disagree about a routine, or a delta entry is malformed
    #[error("Inconsistent chain at {at} for routine {routine}: {reason}")]
    InconsistentChain {
        at: VersionTransition,
        routine: String,
        reason: InconsistencyReason,
    },

    /// Signature could not be constructed
    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// Version string could not be parsed
    #[error(transparent)]
    InvalidVersion(#[from] VersionParseError),
}

/// Conversion from SigDeltaError to ExError
impl From<SigDeltaError> for ExError {
    fn from(err: SigDeltaError) -> Self {
        let message = err.to_string();
        match err {
            SigDeltaError::NonContiguousTransition { transition, .. } => {
                ExError::new(ExErrorKind::NonContiguousTransition)
                    .with_transition(transition)
                    .with_message(message)
            }

            SigDeltaError::DuplicateTransition { transition } => {
                ExError::new(ExErrorKind::DuplicateTransition)
                    .with_transition(transition)
                    .with_message(message)
            }

            SigDeltaError::InvalidTransition(_) => {
                ExError::new(ExErrorKind::InvalidTransition).with_message(message)
            }

            SigDeltaError::UnknownVersion { version } => ExError::new(ExErrorKind::UnknownVersion)
                .with_version(version)
                .with_message(message),

            SigDeltaError::UnsupportedFutureVersion { target, .. } => {
                ExError::new(ExErrorKind::UnsupportedFutureVersion)
                    .with_version(target)
                    .with_message(message)
            }

            SigDeltaError::InvalidVersionRange { .. } => {
                ExError::new(ExErrorKind::InvalidVersionRange).with_message(message)
            }

            SigDeltaError::BaselineMismatch { baseline, .. } => {
                ExError::new(ExErrorKind::BaselineMismatch)
                    .with_version(baseline)
                    .with_message(message)
            }

            SigDeltaError::RoutineStateConflict {
                transition,
                routine,
                ..
            } => ExError::new(ExErrorKind::RoutineStateConflict)
                .with_transition(transition)
                .with_routine(routine)
                .with_message(message),

            SigDeltaError::InconsistentChain { at, routine, .. } => {
                ExError::new(ExErrorKind::InconsistentChain)
                    .with_transition(at)
                    .with_routine(routine)
                    .with_message(message)
            }

            SigDeltaError::InvalidSignature { .. } => {
                ExError::new(ExErrorKind::InvalidSignature).with_message(message)
            }

            SigDeltaError::InvalidVersion(_) => {
                ExError::new(ExErrorKind::InvalidVersion).with_message(message)
            }
        }
    }
}
