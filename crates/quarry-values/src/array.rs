//! Ordered, index-addressed container of values.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::{PathError, Result};
use crate::path::{self, Segment};
use crate::value::{self, Kind, Value};

/// An ordered sequence of values. Same ownership rules as
/// [`crate::Object`]: entries are owned, clones are deep.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Array { items: Vec::new() }
    }

    pub fn with_values(values: impl IntoIterator<Item = Value>) -> Self {
        Array {
            items: values.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index`; out-of-range indices fail rather
    /// than grow the array. Use [`Array::push`] to append.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let length = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(PathError::IndexOutOfBounds {
                index: index as i64,
                length,
            }),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Calls `visit(value, index)` per element in order until it returns
    /// `false`.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Value, usize) -> bool,
    {
        for (index, item) in self.items.iter().enumerate() {
            if !visit(item, index) {
                break;
            }
        }
    }

    /// Resolves `path` against this array; the first segment must be an
    /// index. The empty path addresses the array itself, returned owned.
    pub fn get_in<'a>(&'a self, path: &[Segment]) -> Result<Cow<'a, Value>> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(Cow::Owned(Value::Array(self.clone())));
        };
        let child = self.step(first)?;
        path::get_in(child, rest).map(Cow::Borrowed)
    }

    /// Stores `value` at `path`, rooted at this array. An index one past
    /// the end appends; see [`crate::path::set_in`]. An empty path is a
    /// no-op.
    pub fn set_in(&mut self, path: &[Segment], value: Value) -> Result<()> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(());
        };
        let Segment::Index(index) = first else {
            return Err(PathError::TypeMismatch {
                kind: Kind::Array,
                segment: first.clone(),
            });
        };
        let slot = path::checked_index(*index)?;
        let length = self.items.len();
        if rest.is_empty() {
            if slot == length {
                self.items.push(value);
                return Ok(());
            }
            return self.set(slot, value);
        }
        if slot > length {
            return Err(PathError::IndexOutOfBounds {
                index: *index,
                length,
            });
        }
        if slot == length {
            self.items.push(path::vivified(&rest[0]));
        }
        match self.items.get_mut(slot) {
            Some(child) => path::set_in(child, rest, value),
            None => Err(PathError::IndexOutOfBounds {
                index: *index,
                length,
            }),
        }
    }

    /// See [`Value::digest`].
    pub fn digest(&self) -> u64 {
        match serde_json::to_vec(self) {
            Ok(bytes) => value::digest_bytes(&bytes),
            Err(_) => 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(Value::to_json).collect())
    }

    fn step(&self, segment: &Segment) -> Result<&Value> {
        let Segment::Index(index) = segment else {
            return Err(PathError::TypeMismatch {
                kind: Kind::Array,
                segment: segment.clone(),
            });
        };
        let slot = path::checked_index(*index)?;
        self.items.get(slot).ok_or(PathError::IndexOutOfBounds {
            index: *index,
            length: self.items.len(),
        })
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array {
            items: iter.into_iter().collect(),
        }
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Array {}

impl PartialOrd for Array {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Element-wise ordering; the first unequal pair decides, then the shorter
/// array orders first.
impl Ord for Array {
    fn cmp(&self, other: &Self) -> Ordering {
        for (left, right) in self.items.iter().zip(&other.items) {
            match left.cmp(right) {
                Ordering::Equal => {}
                order => return order,
            }
        }
        self.items.len().cmp(&other.items.len())
    }
}

impl Hash for Array {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest());
    }
}

/// Canonical JSON array literal in element order.
impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Canonical text; degrades to `[]` if serialization fails.
impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("[]"),
        }
    }
}
