//! Container type vocabulary.
//!
//! This registry covers every container kind `pycoll` provides, with the Python spelling used in error
//! messages and reprs plus the Rust type name that implements it.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and accepts either spelling.
//! - This module is vocabulary only (spellings + metadata), not container semantics.
//!
//! ## Examples
//! ```rust
//! use pycoll_core::types::{self, ContainerTypeId};
//!
//! assert_eq!(types::from_str("list"), Some(ContainerTypeId::List));
//! assert_eq!(types::from_str("ChainMap"), Some(ContainerTypeId::ChainMap));
//! assert_eq!(types::as_str(ContainerTypeId::Deque), "deque");
//! ```

/// Stable identifier for container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerTypeId {
    List,
    Dict,
    Tuple,
    Set,
    FrozenSet,
    Str,
    ByteArray,
    Counter,
    OrderedDict,
    DefaultDict,
    ChainMap,
    NamedTuple,
    Deque,
    UserDict,
    UserList,
    UserString,
}

/// Whether a container kind supports in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Mutable,
    Immutable,
}

/// Metadata for a container kind.
#[derive(Debug, Clone, Copy)]
pub struct ContainerTypeInfo {
    pub id: ContainerTypeId,
    /// Python spelling (`"list"`, `"frozenset"`, ...), used in messages and reprs.
    pub canonical: &'static str,
    /// Name of the implementing Rust type.
    pub rust_name: &'static str,
    pub description: &'static str,
    pub mutability: Mutability,
}

/// Registry of container kinds.
pub const CONTAINER_TYPES: &[ContainerTypeInfo] = &[
    info(
        ContainerTypeId::List,
        "list",
        "List",
        "Resizable indexed sequence.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::Dict,
        "dict",
        "Dict",
        "Insertion-ordered key/value mapping.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::Tuple,
        "tuple",
        "Tuple",
        "Fixed-length heterogeneous sequence.",
        Mutability::Immutable,
    ),
    info(
        ContainerTypeId::Set,
        "set",
        "Set",
        "Unordered collection of unique elements.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::FrozenSet,
        "frozenset",
        "FrozenSet",
        "Immutable, hashable set.",
        Mutability::Immutable,
    ),
    info(
        ContainerTypeId::Str,
        "str",
        "Text",
        "Immutable sequence of Unicode scalars.",
        Mutability::Immutable,
    ),
    info(
        ContainerTypeId::ByteArray,
        "bytearray",
        "ByteArray",
        "Mutable sequence of bytes.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::Counter,
        "Counter",
        "Counter",
        "Mapping from element to occurrence count.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::OrderedDict,
        "OrderedDict",
        "OrderedDict",
        "Mapping with explicit reposition operations.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::DefaultDict,
        "defaultdict",
        "DefaultDict",
        "Mapping that inserts a default value on a missing-key read.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::ChainMap,
        "ChainMap",
        "ChainMap",
        "Layered mapping consulted in priority order.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::NamedTuple,
        "namedtuple",
        "Record",
        "Tuple whose positions also have field names.",
        Mutability::Immutable,
    ),
    info(
        ContainerTypeId::Deque,
        "deque",
        "Deque",
        "Double-ended queue with rotation.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::UserDict,
        "UserDict",
        "UserDict",
        "Mapping wrapper with mutation hooks.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::UserList,
        "UserList",
        "UserList",
        "List wrapper with mutation hooks.",
        Mutability::Mutable,
    ),
    info(
        ContainerTypeId::UserString,
        "UserString",
        "UserString",
        "Text wrapper with mutation hooks.",
        Mutability::Mutable,
    ),
];

/// Resolve a spelling (Python or Rust) to a [`ContainerTypeId`].
///
/// ## Returns
/// - `Some(ContainerTypeId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<ContainerTypeId> {
    if let Some(t) = CONTAINER_TYPES.iter().find(|t| t.canonical == name) {
        return Some(t.id);
    }
    CONTAINER_TYPES.iter().find(|t| t.rust_name == name).map(|t| t.id)
}

/// Return the Python spelling for a container kind (e.g. `"frozenset"`).
pub fn as_str(id: ContainerTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return true if the container kind rejects in-place mutation.
pub fn is_immutable(id: ContainerTypeId) -> bool {
    info_for(id).mutability == Mutability::Immutable
}

/// Return the full metadata entry for a container kind.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ContainerTypeId) -> &'static ContainerTypeInfo {
    CONTAINER_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("container type info missing")
}

const fn info(
    id: ContainerTypeId,
    canonical: &'static str,
    rust_name: &'static str,
    description: &'static str,
    mutability: Mutability,
) -> ContainerTypeInfo {
    ContainerTypeInfo {
        id,
        canonical,
        rust_name,
        description,
        mutability,
    }
}
