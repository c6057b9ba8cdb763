//! String-keyed container of values.
//!
//! An [`Object`] owns its entries outright: no entry holds a reference back
//! to the container, and cloning an object deep-copies every nested
//! container, so mutating a clone never affects the original at any depth.
//!
//! The backing store is a `HashMap`, so no iteration order is guaranteed.
//! Everything order-sensitive (canonical serialization, [`Object::digest`],
//! comparison) goes through a lexicographic key sort first, which is what
//! makes two structurally equal objects serialize, hash, and compare
//! identically regardless of how their entries were inserted.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{PathError, Result};
use crate::path::{self, Segment};
use crate::value::{self, Kind, Value};

/// A transient name/value pair used to seed [`Object::with_properties`].
/// Not part of stored state.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    value: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An unordered string-keyed mapping of values.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: HashMap<String, Value>,
}

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Object {
            entries: HashMap::new(),
        }
    }

    /// Creates an object from an ordered list of properties. A later
    /// property with an already-seen name overwrites the earlier one.
    pub fn with_properties(props: impl IntoIterator<Item = Property>) -> Self {
        let mut object = Object::new();
        for prop in props {
            object.entries.insert(prop.name, prop.value);
        }
        object
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored key names, in no guaranteed order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries, in no guaranteed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Calls `visit(value, key)` once per entry until it returns `false`.
    ///
    /// Enumeration order is unspecified; callers may only rely on how many
    /// entries were visited, not which.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Value, &str) -> bool,
    {
        for (key, value) in &self.entries {
            if !visit(value, key) {
                break;
            }
        }
    }

    /// Looks up a key. `None` means the key is absent, which is distinct
    /// from `Some(&Value::None)`, a key explicitly stored as null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts or overwrites an entry. Passing `Option::None` stores the
    /// explicit [`Value::None`] sentinel via the `From<Option<_>>`
    /// conversion, so the key stays present-with-null.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Deletes an entry if present, returning it. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Resolves `path` against this object via the path accessor.
    ///
    /// A non-empty path borrows into the entries; the empty path addresses
    /// the object itself, returned as an owned snapshot.
    pub fn get_in<'a>(&'a self, path: &[Segment]) -> Result<Cow<'a, Value>> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(Cow::Owned(Value::Object(self.clone())));
        };
        let child = self.step(first)?;
        path::get_in(child, rest).map(Cow::Borrowed)
    }

    /// Stores `value` at `path`, rooted at this object. Missing
    /// intermediate containers are created; see [`crate::path::set_in`] for
    /// the full policy. An empty path is a no-op.
    pub fn set_in(&mut self, path: &[Segment], value: Value) -> Result<()> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(());
        };
        let Segment::Key(key) = first else {
            return Err(PathError::TypeMismatch {
                kind: Kind::Object,
                segment: first.clone(),
            });
        };
        if rest.is_empty() {
            self.set(key.clone(), value);
            return Ok(());
        }
        let child = self.get_or_insert_with(key, || path::vivified(&rest[0]));
        path::set_in(child, rest, value)
    }

    /// Content hash over the canonical serialized bytes; sentinel `0` on
    /// serialization failure. See [`Value::digest`].
    pub fn digest(&self) -> u64 {
        match serde_json::to_vec(self) {
            Ok(bytes) => value::digest_bytes(&bytes),
            Err(_) => 0,
        }
    }

    /// Unwraps into a plain `serde_json::Value` mapping, keys in
    /// lexicographic order.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, item) in self.sorted_entries() {
            map.insert(key.clone(), item.to_json());
        }
        serde_json::Value::Object(map)
    }

    fn step(&self, segment: &Segment) -> Result<&Value> {
        let Segment::Key(key) = segment else {
            return Err(PathError::TypeMismatch {
                kind: Kind::Object,
                segment: segment.clone(),
            });
        };
        self.get(key).ok_or_else(|| PathError::KeyAbsent {
            key: key.clone(),
        })
    }

    /// Entries in lexicographic key order; the basis of every
    /// order-sensitive operation on objects.
    pub(crate) fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        self.entries
            .entry(key.to_string())
            .or_insert_with(default)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Object {
            entries: iter.into_iter().collect(),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Object {}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deterministic ordering over objects: both key lists are walked in sorted
/// order. The first differing key name decides; at equal names the paired
/// values decide; a sorted key list that is a strict prefix of the other
/// orders first. Independent of enumeration order by construction.
impl Ord for Object {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.sorted_entries();
        let right = other.sorted_entries();
        for ((lk, lv), (rk, rv)) in left.iter().zip(&right) {
            match lk.cmp(rk) {
                Ordering::Equal => {}
                order => return order,
            }
            match lv.cmp(rv) {
                Ordering::Equal => {}
                order => return order,
            }
        }
        left.len().cmp(&right.len())
    }
}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest());
    }
}

/// Canonical JSON object literal with keys in lexicographic order.
/// [`Object::digest`] is derived from this exact text, so the ordering is a
/// correctness requirement, not cosmetics.
impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.sorted_entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, item) in entries {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

/// Canonical text; degrades to `{}` if serialization fails.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("{}"),
        }
    }
}
