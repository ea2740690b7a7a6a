//! Canonical error taxonomy and user-facing messages shared by every container.
//!
//! The semantic core owns the error *kinds* and their formatting (`Kind: message`). The runtime crate wraps
//! [`CoreError`] into its own diagnostic type, so the text users see is decided here exactly once.

use core::fmt;

use crate::types::{self, ContainerTypeId};

/// Stable identifier for error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An absent key or element was requested for lookup or removal.
    NotFound,
    /// An index fell outside the valid range.
    Index,
    /// A mutation was attempted on an immutable container.
    Immutable,
    /// An operation was applied to incompatible element or value types.
    TypeMismatch,
    /// An argument had the right type but an unusable value (zero slice step, empty `max()`, ...).
    Value,
}

/// Metadata for an error kind.
#[derive(Debug, Clone, Copy)]
pub struct ErrorKindInfo {
    pub id: ErrorKind,
    pub canonical: &'static str,
    pub description: &'static str,
    /// Short, stable code used by diagnostics (`pycoll::<code>`).
    pub code: &'static str,
}

/// Registry of error kinds.
pub const ERROR_KINDS: &[ErrorKindInfo] = &[
    ErrorKindInfo {
        id: ErrorKind::NotFound,
        canonical: "NotFoundError",
        description: "Raised when an absent key or element is looked up or removed.",
        code: "not_found",
    },
    ErrorKindInfo {
        id: ErrorKind::Index,
        canonical: "IndexError",
        description: "Raised when an index is outside the valid range of a sequence.",
        code: "index",
    },
    ErrorKindInfo {
        id: ErrorKind::Immutable,
        canonical: "ImmutableError",
        description: "Raised when an in-place mutation is attempted on an immutable container.",
        code: "immutable",
    },
    ErrorKindInfo {
        id: ErrorKind::TypeMismatch,
        canonical: "TypeMismatchError",
        description: "Raised when an operation receives elements of incompatible types.",
        code: "type_mismatch",
    },
    ErrorKindInfo {
        id: ErrorKind::Value,
        canonical: "ValueError",
        description: "Raised when an argument has the right type but an invalid value.",
        code: "value",
    },
];

/// Return the canonical spelling for an error kind (e.g. `"IndexError"`).
#[inline]
pub fn as_str(kind: ErrorKind) -> &'static str {
    info_for(kind).canonical
}

/// Resolve a canonical spelling to an error kind. Matching is case-sensitive.
pub fn from_str(name: &str) -> Option<ErrorKind> {
    ERROR_KINDS.iter().find(|e| e.canonical == name).map(|e| e.id)
}

/// Return full metadata for an error kind.
///
/// ## Panics
/// - If the registry is missing an entry for `kind` (programming error).
pub fn info_for(kind: ErrorKind) -> &'static ErrorKindInfo {
    ERROR_KINDS
        .iter()
        .find(|e| e.id == kind)
        .expect("error kind info missing")
}

/// An error produced by semantic-core helpers: a kind plus a message body (without the `Kind: ` prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// `IndexError: {type} index {index} out of range for length {len}`
    pub fn index_out_of_range_for(container: ContainerTypeId, index: i64, len: usize) -> Self {
        Self::with_message(
            ErrorKind::Index,
            format!("{} index {index} out of range for length {len}", types::as_str(container)),
        )
    }

    /// `IndexError: pop from an empty {type}`
    pub fn pop_from_empty(container: ContainerTypeId) -> Self {
        Self::with_message(ErrorKind::Index, format!("pop from an empty {}", types::as_str(container)))
    }

    /// `NotFoundError: {key} not found in {type}`
    pub fn not_found_in(container: ContainerTypeId, key: impl fmt::Display) -> Self {
        Self::with_message(
            ErrorKind::NotFound,
            format!("{key} not found in {}", types::as_str(container)),
        )
    }

    /// `NotFoundError: {type} is empty`
    pub fn empty(container: ContainerTypeId) -> Self {
        Self::with_message(ErrorKind::NotFound, format!("{} is empty", types::as_str(container)))
    }

    /// `ImmutableError: '{type}' object does not support {operation}`
    pub fn does_not_support(container: ContainerTypeId, operation: &str) -> Self {
        Self::with_message(
            ErrorKind::Immutable,
            format!("'{}' object does not support {operation}", types::as_str(container)),
        )
    }

    /// `TypeMismatchError: '{op}' not supported between instances of '{lhs}' and '{rhs}'`
    pub fn unsupported_operands(op: &str, lhs: &str, rhs: &str) -> Self {
        Self::with_message(
            ErrorKind::TypeMismatch,
            format!("'{op}' not supported between instances of '{lhs}' and '{rhs}'"),
        )
    }

    /// `TypeMismatchError: expected {expected}, found {found}`
    pub fn expected_type(expected: &str, found: &str) -> Self {
        Self::with_message(ErrorKind::TypeMismatch, format!("expected {expected}, found {found}"))
    }

    /// `ValueError: integer addition overflowed {ty}`
    pub fn add_overflow(ty: &str) -> Self {
        Self::with_message(ErrorKind::Value, format!("integer addition overflowed {ty}"))
    }

    /// `ValueError: slice step cannot be zero`
    pub fn slice_step_zero() -> Self {
        Self::with_message(ErrorKind::Value, SLICE_STEP_ZERO_MSG)
    }

    /// `ValueError: {func}() arg is an empty sequence`
    pub fn empty_sequence(func: &str) -> Self {
        Self::with_message(ErrorKind::Value, format!("{func}() arg is an empty sequence"))
    }

    /// `ValueError: too many values to unpack (expected N, got M)` or the "not enough" variant.
    pub fn unpack_mismatch(expected: usize, got: usize) -> Self {
        let qualifier = if got > expected { "too many" } else { "not enough" };
        Self::with_message(
            ErrorKind::Value,
            format!("{qualifier} values to unpack (expected {expected}, got {got})"),
        )
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", as_str(self.kind), self.message)
    }
}

impl std::error::Error for CoreError {}

/// Message body for a zero slice step (shared by lists, tuples, text and bytes).
pub const SLICE_STEP_ZERO_MSG: &str = "slice step cannot be zero";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kind_prefixed() {
        let err = CoreError::index_out_of_range_for(ContainerTypeId::List, 3, 3);
        assert_eq!(err.to_string(), "IndexError: list index 3 out of range for length 3");
    }

    #[test]
    fn immutable_message_names_the_python_type() {
        let err = CoreError::does_not_support(ContainerTypeId::FrozenSet, "add");
        assert_eq!(err.to_string(), "ImmutableError: 'frozenset' object does not support add");
    }

    #[test]
    fn unpack_mismatch_picks_qualifier() {
        assert_eq!(
            CoreError::unpack_mismatch(2, 3).message,
            "too many values to unpack (expected 2, got 3)"
        );
        assert_eq!(
            CoreError::unpack_mismatch(3, 2).message,
            "not enough values to unpack (expected 3, got 2)"
        );
    }
}
