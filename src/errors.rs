//! Error type returned by every fallible container operation.
//!
//! The semantic core (`pycoll_core`) owns the canonical taxonomy + message text (`CoreError`). This module
//! turns those into a `thiserror`/`miette` diagnostic so callers get `?`-friendly results with stable codes.

use miette::Diagnostic;
use thiserror::Error;

use pycoll_core::errors::{CoreError, ErrorKind};

/// Result type alias using [`CollectionError`].
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Errors raised by container operations.
///
/// Each variant carries the message body; `Display` adds the canonical `Kind: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CollectionError {
    #[error("NotFoundError: {0}")]
    #[diagnostic(code(pycoll::not_found), help("check membership with `contains` before removing or reading"))]
    NotFound(String),

    #[error("IndexError: {0}")]
    #[diagnostic(code(pycoll::index), help("valid indices are -len..len"))]
    Index(String),

    #[error("ImmutableError: {0}")]
    #[diagnostic(code(pycoll::immutable), help("build a new value instead of mutating in place"))]
    Immutable(String),

    #[error("TypeMismatchError: {0}")]
    #[diagnostic(code(pycoll::type_mismatch))]
    TypeMismatch(String),

    #[error("ValueError: {0}")]
    #[diagnostic(code(pycoll::value))]
    Value(String),
}

impl CollectionError {
    /// Return the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::NotFound(_) => ErrorKind::NotFound,
            CollectionError::Index(_) => ErrorKind::Index,
            CollectionError::Immutable(_) => ErrorKind::Immutable,
            CollectionError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            CollectionError::Value(_) => ErrorKind::Value,
        }
    }

    /// Return the message body without the `Kind: ` prefix.
    pub fn message(&self) -> &str {
        match self {
            CollectionError::NotFound(m)
            | CollectionError::Index(m)
            | CollectionError::Immutable(m)
            | CollectionError::TypeMismatch(m)
            | CollectionError::Value(m) => m,
        }
    }
}

impl From<CoreError> for CollectionError {
    fn from(err: CoreError) -> Self {
        match err.kind {
            ErrorKind::NotFound => CollectionError::NotFound(err.message),
            ErrorKind::Index => CollectionError::Index(err.message),
            ErrorKind::Immutable => CollectionError::Immutable(err.message),
            ErrorKind::TypeMismatch => CollectionError::TypeMismatch(err.message),
            ErrorKind::Value => CollectionError::Value(err.message),
        }
    }
}
