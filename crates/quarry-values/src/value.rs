//! The `Value` variant family and the contract every variant satisfies.
//!
//! A [`Value`] is the unit of data flowing through the quarry evaluator. The
//! set of kinds is closed: scalars (`None`, `Boolean`, `Int`, `Float`,
//! `String`, `DateTime`) are immutable, containers ([`Array`], [`Object`])
//! support owned in-place mutation. Every variant supports:
//!
//! - [`Value::kind`] — the [`Kind`] discriminant
//! - `Display` — canonical textual form (containers render canonical JSON)
//! - `Ord` — a total order usable by relational and sort operators
//! - [`Value::digest`] — a content hash for equality partitioning
//! - [`Value::to_json`] — a plain `serde_json::Value` for external consumers
//! - `Clone` — a deep copy sharing no mutable state with the original
//!
//! Cross-kind ordering follows a fixed rank table, applied symmetrically in
//! both directions:
//!
//! ```text
//! none < boolean < int/float (one numeric band) < string < datetime < array < object
//! ```
//!
//! `Int` and `Float` share a rank and compare numerically, so `5 == 5.0`.
//! The canonical serialization collapses integral floats to integer form for
//! the same reason: values that compare equal must digest equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha512};

use crate::array::Array;
use crate::error::Result;
use crate::object::Object;
use crate::path::{self, Segment};

/// A dynamically-typed runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The explicit null sentinel. Distinct from an absent object key.
    None,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// An instant in time, always carried in UTC.
    DateTime(DateTime<Utc>),
    Array(Array),
    Object(Object),
}

/// Discriminant identifying which concrete variant a [`Value`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Boolean,
    Int,
    Float,
    String,
    DateTime,
    Array,
    Object,
}

impl Kind {
    /// Position in the cross-kind rank table. `Int` and `Float` share a rank
    /// and are ordered numerically against each other instead.
    pub fn rank(self) -> u8 {
        match self {
            Kind::None => 0,
            Kind::Boolean => 1,
            Kind::Int | Kind::Float => 2,
            Kind::String => 3,
            Kind::DateTime => 4,
            Kind::Array => 5,
            Kind::Object => 6,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::None => "none",
            Kind::Boolean => "boolean",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::DateTime => "datetime",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind discriminant of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Boolean(_) => Kind::Boolean,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::DateTime(_) => Kind::DateTime,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Whether this value is the explicit null sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Content hash of this value: SHA-512 over the canonical serialized
    /// bytes, truncated to a `u64`.
    ///
    /// Deterministic across runs for identical content, so it can partition
    /// values for `DISTINCT`-style grouping. Not suitable for security
    /// purposes. A serialization failure degrades to the sentinel `0`
    /// rather than surfacing an error; availability wins over exactness
    /// here, as callers treat the digest as a grouping key only.
    pub fn digest(&self) -> u64 {
        match serde_json::to_vec(self) {
            Ok(bytes) => digest_bytes(&bytes),
            Err(_) => 0,
        }
    }

    /// Unwraps into a plain [`serde_json::Value`] for consumers outside the
    /// runtime. Containers unwrap recursively; object keys come out in
    /// lexicographic order.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::None => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => match float_as_integer(*f) {
                Some(i) => serde_json::Value::Number(i.into()),
                None => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(dt) => serde_json::Value::String(format_datetime(dt)),
            Value::Array(array) => array.to_json(),
            Value::Object(object) => object.to_json(),
        }
    }

    /// Resolves `path` against this value. An empty path yields the value
    /// itself. See [`crate::path::get_in`].
    pub fn get_in<'a>(&'a self, path: &[Segment]) -> Result<&'a Value> {
        path::get_in(self, path)
    }

    /// Mutable variant of [`Value::get_in`].
    pub fn get_in_mut<'a>(&'a mut self, path: &[Segment]) -> Result<&'a mut Value> {
        path::get_in_mut(self, path)
    }

    /// Stores `value` at `path`, creating missing intermediate containers.
    /// See [`crate::path::set_in`].
    pub fn set_in(&mut self, path: &[Segment], value: Value) -> Result<()> {
        path::set_in(self, path, value)
    }
}

/// Total order over values: same-kind values compare by content, `Int` and
/// `Float` compare numerically against each other, and everything else
/// falls back to the [`Kind::rank`] table.
pub(crate) fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::None, Value::None) => Ordering::Equal,
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.cmp(y),
        (Value::Object(x), Value::Object(y)) => x.cmp(y),
        _ => a.kind().rank().cmp(&b.kind().rank()),
    }
}

fn compare_floats(x: f64, y: f64) -> Ordering {
    // Route integral floats through i64 so -0.0 == 0.0 and the ordering
    // agrees with the canonical serialization. total_cmp keeps NaN inside
    // the total order for everything else.
    match (float_as_integer(x), float_as_integer(y)) {
        (Some(ix), Some(iy)) => ix.cmp(&iy),
        _ => x.total_cmp(&y),
    }
}

fn compare_int_float(i: i64, f: f64) -> Ordering {
    match float_as_integer(f) {
        Some(fi) => i.cmp(&fi),
        None => (i as f64).total_cmp(&f),
    }
}

/// An `f64` that is finite, integral, and inside `i64` range, as that
/// integer. The canonical serialization and the numeric comparison both use
/// this, which is what keeps `digest` consistent with `Ord`.
pub(crate) fn float_as_integer(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn digest_bytes(bytes: &[u8]) -> u64 {
    let output = Sha512::digest(bytes);
    match output.first_chunk::<8>() {
        Some(chunk) => u64::from_le_bytes(*chunk),
        None => 0,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest());
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

/// Canonical textual form. Scalars render bare (`None` is empty, strings are
/// unquoted, datetimes are RFC 3339); containers render their canonical JSON
/// serialization, degrading to the empty-container literal if serialization
/// fails.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => match float_as_integer(*x) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{x}"),
            },
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&format_datetime(dt)),
            Value::Array(array) => array.fmt(f),
            Value::Object(object) => object.fmt(f),
        }
    }
}

/// Canonical serialization. Object keys are emitted in lexicographic order
/// (see [`Object`]); integral floats are emitted in integer form so values
/// that compare equal serialize identically.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => match float_as_integer(*f) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*f),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            Value::Array(array) => array.serialize(serializer),
            Value::Object(object) => object.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values.into_iter().collect())
    }
}

/// `Option::None` becomes the explicit [`Value::None`] sentinel, so an
/// absent input to [`Object::set`] is stored as present-with-null rather
/// than silently dropped.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    // Past i64::MAX; kept as a float, losing low bits.
                    Value::Float(u as f64)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect(),
            ),
        }
    }
}
