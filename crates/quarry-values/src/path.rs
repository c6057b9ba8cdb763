//! Nested-path access across Object/Array graphs.
//!
//! A path is an ordered sequence of [`Segment`]s (string keys for objects,
//! integer indices for arrays) consumed left to right. Reads either resolve
//! the full path or fail with a [`PathError`] naming the failing segment;
//! there are no partial results.
//!
//! # Write policy
//!
//! [`set_in`] auto-vivifies: a missing intermediate is created as an empty
//! object when the next segment is a key, or an empty array when it is an
//! index. An index exactly one past the end of an array appends. Indexing
//! through a scalar, an index past the append position, and any negative
//! index are hard failures regardless of vivification. Containers created
//! before a later segment fails are left in place; there is no rollback.

use std::fmt;

use crate::error::{PathError, Result};
use crate::value::Value;

/// One step of a path: an object key or an array index.
///
/// Indices are carried as `i64` because paths arrive from evaluated
/// expressions; a negative index is representable but always rejected with
/// [`PathError::InvalidIndex`] when used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(i64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "`{key}`"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index as i64)
    }
}

/// Walks `path` from `root`, returning the addressed value.
///
/// An empty path returns `root` unchanged. Failures: a key absent from an
/// object, an index outside an array, a negative index, or any segment
/// applied to a value of the wrong kind (including scalars reached while
/// segments remain).
pub fn get_in<'a>(root: &'a Value, path: &[Segment]) -> Result<&'a Value> {
    let mut current = root;
    for segment in path {
        current = step(current, segment)?;
    }
    Ok(current)
}

/// Mutable variant of [`get_in`]. Does not vivify.
pub fn get_in_mut<'a>(root: &'a mut Value, path: &[Segment]) -> Result<&'a mut Value> {
    let mut current = root;
    for segment in path {
        current = step_mut(current, segment)?;
    }
    Ok(current)
}

/// Stores `value` at `path` under `root`, creating missing intermediates
/// per the module-level write policy. An empty path is a no-op.
pub fn set_in(root: &mut Value, path: &[Segment], value: Value) -> Result<()> {
    match path.split_first() {
        None => Ok(()),
        Some((segment, rest)) if rest.is_empty() => write_leaf(root, segment, value),
        Some((segment, rest)) => {
            let child = descend_or_vivify(root, segment, &rest[0])?;
            set_in(child, rest, value)
        }
    }
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Result<&'a Value> {
    match (value, segment) {
        (Value::Object(object), Segment::Key(key)) => {
            object.get(key).ok_or_else(|| PathError::KeyAbsent {
                key: key.clone(),
            })
        }
        (Value::Array(array), Segment::Index(index)) => {
            let slot = checked_index(*index)?;
            array.get(slot).ok_or(PathError::IndexOutOfBounds {
                index: *index,
                length: array.len(),
            })
        }
        _ => Err(PathError::TypeMismatch {
            kind: value.kind(),
            segment: segment.clone(),
        }),
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Result<&'a mut Value> {
    let kind = value.kind();
    match (value, segment) {
        (Value::Object(object), Segment::Key(key)) => {
            object.get_mut(key).ok_or_else(|| PathError::KeyAbsent {
                key: key.clone(),
            })
        }
        (Value::Array(array), Segment::Index(index)) => {
            let slot = checked_index(*index)?;
            let length = array.len();
            array.get_mut(slot).ok_or(PathError::IndexOutOfBounds {
                index: *index,
                length,
            })
        }
        (_, segment) => Err(PathError::TypeMismatch {
            kind,
            segment: segment.clone(),
        }),
    }
}

fn descend_or_vivify<'a>(
    value: &'a mut Value,
    segment: &Segment,
    next: &Segment,
) -> Result<&'a mut Value> {
    let kind = value.kind();
    match (value, segment) {
        (Value::Object(object), Segment::Key(key)) => {
            Ok(object.get_or_insert_with(key, || vivified(next)))
        }
        (Value::Array(array), Segment::Index(index)) => {
            let slot = checked_index(*index)?;
            let length = array.len();
            if slot > length {
                return Err(PathError::IndexOutOfBounds {
                    index: *index,
                    length,
                });
            }
            if slot == length {
                array.push(vivified(next));
            }
            array.get_mut(slot).ok_or(PathError::IndexOutOfBounds {
                index: *index,
                length,
            })
        }
        (_, segment) => Err(PathError::TypeMismatch {
            kind,
            segment: segment.clone(),
        }),
    }
}

fn write_leaf(target: &mut Value, segment: &Segment, value: Value) -> Result<()> {
    let kind = target.kind();
    match (target, segment) {
        (Value::Object(object), Segment::Key(key)) => {
            object.set(key.clone(), value);
            Ok(())
        }
        (Value::Array(array), Segment::Index(index)) => {
            let slot = checked_index(*index)?;
            if slot == array.len() {
                array.push(value);
                Ok(())
            } else {
                array.set(slot, value)
            }
        }
        (_, segment) => Err(PathError::TypeMismatch {
            kind,
            segment: segment.clone(),
        }),
    }
}

/// The empty container a missing intermediate becomes, picked by the kind
/// of the segment that will address into it.
pub(crate) fn vivified(next: &Segment) -> Value {
    match next {
        Segment::Key(_) => Value::Object(crate::Object::new()),
        Segment::Index(_) => Value::Array(crate::Array::new()),
    }
}

pub(crate) fn checked_index(index: i64) -> Result<usize> {
    usize::try_from(index).map_err(|_| PathError::InvalidIndex { index })
}
