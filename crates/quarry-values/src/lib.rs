//! # quarry-values
//!
//! Runtime value model for the **quarry** query language: the dynamic
//! values every quarry expression evaluates to, with total ordering,
//! content hashing, deep copy, canonical serialization, and nested-path
//! access.
//!
//! The value family is a closed set of kinds (`None`, booleans, ints,
//! floats, strings, datetimes, arrays, objects). Containers own their
//! entries outright; there is no sharing and no interior mutability, so
//! `Clone` is always a deep copy and `&Value` reads are freely shareable.
//!
//! Canonical serialization is JSON with lexicographically ordered object
//! keys. Both the default display of containers and the content digest are
//! derived from that exact text, which is what makes structurally equal
//! values print, hash, and compare identically however their entries were
//! inserted.
//!
//! ## Quick start
//!
//! ```rust
//! use quarry_values::{Object, Property, Value};
//!
//! let mut profile = Object::with_properties([
//!     Property::new("name", "Ada"),
//!     Property::new("age", 36i64),
//! ]);
//!
//! // Write through a nested path; the intermediate object is created.
//! profile
//!     .set_in(
//!         &["links".into(), "homepage".into()],
//!         Value::from("https://example.org"),
//!     )
//!     .unwrap();
//!
//! let link = profile.get_in(&["links".into(), "homepage".into()]).unwrap();
//! assert_eq!(link.as_ref(), &Value::from("https://example.org"));
//!
//! // Canonical text orders keys deterministically.
//! assert_eq!(
//!     profile.to_string(),
//!     r#"{"age":36,"links":{"homepage":"https://example.org"},"name":"Ada"}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the [`Value`] enum, [`Kind`] rank table, ordering, digest
//! - [`object`] — [`Object`] string-keyed container and [`Property`] seeds
//! - [`array`] — [`Array`] index-addressed container
//! - [`path`] — [`Segment`] tokens and the `get_in`/`set_in` engine
//! - [`error`] — [`PathError`], the one typed failure in the crate

pub mod array;
pub mod error;
pub mod object;
pub mod path;
pub mod value;

pub use array::Array;
pub use error::{PathError, Result};
pub use object::{Object, Property};
pub use path::{get_in, get_in_mut, set_in, Segment};
pub use value::{Kind, Value};
