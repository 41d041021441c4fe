//! Engine error type.
//!
//! Every stage of the propagation pipeline returns a [`SpatialResult`].  The
//! engine never panics across the pipeline boundary; each stage failure is
//! handed back to the immediate caller as one of the variants below.
//!
//! [`SpatialError::BelowThreshold`] is special: it is the expected, frequent
//! outcome "nothing perceptible happened" and callers should skip delivery
//! silently rather than log it.  Use [`SpatialError::is_below_threshold`].

use std::fmt;

use thiserror::Error;

/// Why a stimulus failed to reach an observer with perceptible strength.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Imperceptible {
    /// The observer lies beyond the system's effective range.  Detected
    /// before any strategy runs.
    OutOfRange { distance: f32, range: f32 },

    /// The composed final intensity did not exceed the detection threshold.
    TooFaint { intensity: f32, threshold: f32 },
}

impl fmt::Display for Imperceptible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imperceptible::OutOfRange { distance, range } => {
                write!(f, "out of range ({distance:.2} > {range:.2})")
            }
            Imperceptible::TooFaint { intensity, threshold } => {
                write!(f, "too faint ({intensity:.3} <= {threshold:.3})")
            }
        }
    }
}

/// The error type shared by contexts, strategies, the registry and the engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpatialError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("memory allocation failed: {0}")]
    Memory(String),

    #[error("{what} is full (capacity {capacity})")]
    Capacity { what: &'static str, capacity: usize },

    #[error("stimulus calculation failed: {0}")]
    Stimulus(String),

    #[error("line of sight calculation failed: {0}")]
    Los(String),

    #[error("environmental modifier calculation failed: {0}")]
    Modifiers(String),

    #[error("stimulus below detection threshold: {0}")]
    BelowThreshold(Imperceptible),

    #[error("feature not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("{0} is disabled")]
    Disabled(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl SpatialError {
    /// The coarse error category, for diagnostics and stable comparisons.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpatialError::InvalidParam(_)   => ErrorKind::InvalidParam,
            SpatialError::Memory(_)         => ErrorKind::Memory,
            SpatialError::Capacity { .. }   => ErrorKind::Capacity,
            SpatialError::Stimulus(_)       => ErrorKind::Stimulus,
            SpatialError::Los(_)            => ErrorKind::Los,
            SpatialError::Modifiers(_)      => ErrorKind::Modifiers,
            SpatialError::BelowThreshold(_) => ErrorKind::BelowThreshold,
            SpatialError::NotImplemented(_) => ErrorKind::NotImplemented,
            SpatialError::Disabled(_)       => ErrorKind::Disabled,
            SpatialError::NotFound(_)       => ErrorKind::NotFound,
        }
    }

    /// `true` for the non-error "nothing perceptible happened" outcome.
    #[inline]
    pub fn is_below_threshold(&self) -> bool {
        matches!(self, SpatialError::BelowThreshold(_))
    }

    /// Shorthand for [`SpatialError::InvalidParam`].
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        SpatialError::InvalidParam(msg.into())
    }
}

/// Fieldless mirror of [`SpatialError`] variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParam,
    Memory,
    Capacity,
    Stimulus,
    Los,
    Modifiers,
    BelowThreshold,
    NotImplemented,
    Disabled,
    NotFound,
}

/// Human-readable description of an error category.
pub fn error_to_string(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidParam   => "Invalid parameter",
        ErrorKind::Memory         => "Memory allocation failed",
        ErrorKind::Capacity       => "Capacity exceeded",
        ErrorKind::Stimulus       => "Stimulus calculation failed",
        ErrorKind::Los            => "Line of sight calculation failed",
        ErrorKind::Modifiers      => "Environmental modifier calculation failed",
        ErrorKind::BelowThreshold => "Stimulus below detection threshold",
        ErrorKind::NotImplemented => "Feature not implemented",
        ErrorKind::Disabled       => "System disabled",
        ErrorKind::NotFound       => "Not found",
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(error_to_string(*self))
    }
}

/// Shorthand result type for all `sense-*` crates.
pub type SpatialResult<T> = Result<T, SpatialError>;
