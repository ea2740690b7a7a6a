//! Provide shared, pure semantic helpers and canonical vocabulary for the `pycoll` containers.
//!
//! This crate is intentionally small and dependency-free. It holds the deterministic policies that every
//! container in `pycoll` routes through, so that indexing, slicing, string handling and error text stay
//! identical across container kinds.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no container types.
//! - Current scope: error taxonomy and message builders, container type vocabulary, index/slice normalization
//!   (Python-like negative indices and clamping), Unicode-scalar string semantics, and `str.format`-style
//!   template interpolation.

pub mod errors;
pub mod index;
pub mod strings;
pub mod template;
pub mod types;

pub use errors::{CoreError, ErrorKind};
pub use types::ContainerTypeId;
