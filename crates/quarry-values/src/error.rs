//! Error types for path resolution.
//!
//! Path access is the only operation in this crate that fails; everything
//! else is total for well-typed inputs. Serialization problems inside
//! `Display` and `digest` degrade silently instead of surfacing here (see
//! the respective docs).

use thiserror::Error;

use crate::path::Segment;
use crate::value::Kind;

/// A failure while resolving a path, carrying the failing token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The addressed key is not present in the object.
    #[error("key `{key}` not found")]
    KeyAbsent { key: String },

    /// The addressed index is outside the array.
    #[error("index {index} out of bounds for array of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    /// The segment kind does not fit the value it was applied to, or a
    /// scalar was reached while segments remained.
    #[error("cannot descend into {kind} value with segment {segment}")]
    TypeMismatch { kind: Kind, segment: Segment },

    /// A negative index.
    #[error("invalid array index {index}")]
    InvalidIndex { index: i64 },
}

/// Convenience alias used throughout quarry-values.
pub type Result<T> = std::result::Result<T, PathError>;
