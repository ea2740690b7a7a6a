//! Prelude module for common imports.
//!
//! ```rust
//! use pycoll::prelude::*;
//!
//! let s = Set::from([1, 2, 3]);
//! assert!(s.contains(&2));
//! ```

pub use crate::bytearray::ByteArray;
pub use crate::chain_map::ChainMap;
pub use crate::counter::Counter;
pub use crate::default_dict::DefaultDict;
pub use crate::deque::Deque;
pub use crate::dict::Dict;
pub use crate::errors::{CollectionError, Result};
pub use crate::list::List;
pub use crate::named_tuple::{NamedTupleType, Record};
pub use crate::ordered_dict::OrderedDict;
pub use crate::repr::{PyRepr, QuoteStyle, ReprConfig};
pub use crate::set::{FrozenSet, Set};
pub use crate::text::Text;
pub use crate::tuple::Tuple;
pub use crate::user::{DictHooks, ListHooks, LoggingHooks, MapValues, NoHooks, StringHooks, UserDict, UserList, UserString};
pub use crate::value::Value;

// Trait and derive macro share the name; one `use` brings in both.
pub use crate::NamedTuple;

#[cfg(feature = "json")]
pub use crate::json::{FromJson, ToJson};

pub use crate::tuple;
