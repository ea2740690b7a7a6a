#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! Python-style container types for Rust.
//!
//! `pycoll` provides the familiar Python containers (`list`, `dict`, `tuple`, `set`/`frozenset`, `str`,
//! `bytearray`) and the `collections` module types (`Counter`, `OrderedDict`, `defaultdict`, `ChainMap`,
//! `namedtuple`, `deque`, `UserDict`/`UserList`/`UserString`) with Python's semantics and Rust's ownership.
//!
//! ## Layout
//! - `pycoll_core`: the dependency-free semantic core (error taxonomy, index/slice policy, string helpers,
//!   format-template parser). Every container here resolves indices and builds error text through it.
//! - This crate: the containers, the [`errors::CollectionError`] diagnostic type and Python-style
//!   rendering via [`repr::PyRepr`].
//!
//! ## Panic Policy
//!
//! - **Library code**: every fallible operation returns [`errors::Result`]. Out-of-range indices, missing
//!   keys and writes to immutable containers are errors, never panics.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//! ```rust
//! use pycoll::prelude::*;
//!
//! let mut d = Deque::from(vec![1, 2, 3, 4, 5]);
//! d.rotate(2);
//! assert_eq!(d.to_string(), "deque([4, 5, 1, 2, 3])");
//!
//! let words: Counter<&str> = "a b a c a".split(' ').collect();
//! assert_eq!(words.most_common(Some(1)), vec![("a", 3)]);
//! ```

// Lets `#[derive(NamedTuple)]` output (which names `::pycoll`) compile inside this crate's own tests.
extern crate self as pycoll;

pub mod bytearray;
pub mod chain_map;
pub mod counter;
pub mod default_dict;
pub mod deque;
pub mod dict;
pub mod errors;
pub mod list;
pub mod named_tuple;
pub mod ordered_dict;
pub mod prelude;
pub mod repr;
pub mod set;
pub mod text;
pub mod tuple;
pub mod user;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

pub use errors::{CollectionError, Result};
pub use named_tuple::NamedTuple;
pub use pycoll_derive::NamedTuple;
pub use repr::{PyRepr, QuoteStyle, ReprConfig};
pub use value::Value;

#[cfg(feature = "json")]
pub use json::{FromJson, ToJson};
