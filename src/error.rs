//! Crate error type.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// This crate's generic result type.
pub type Result<T> = result::Result<T, Error>;

/// General error categories produced by this crate's containers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An argument violated a precondition (e.g. negative capacity, `trim(n < size)`).
    InvalidArgument,
    /// An index was outside a container's logical bounds.
    IndexOutOfRange,
    /// A token or iteration cursor observed a structural change it did not expect.
    ConcurrentModification,
    /// An internal invariant was violated; this indicates a bug, not caller error.
    CorruptState,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::ConcurrentModification => "concurrent modification",
            ErrorKind::CorruptState => "corrupt state",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary error type for this crate's containers.
#[derive(Debug)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(kind) => *kind,
            Error::Message(kind, _) => *kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => write!(f, "{error_kind}"),
            Error::Message(error_kind, string) => write!(f, "{error_kind}: {string}"),
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_display() {
        let err: Error = ErrorKind::IndexOutOfRange.into();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.to_string(), "index out of range");
    }

    #[test]
    fn message_variant_carries_context() {
        let err: Error = (ErrorKind::InvalidArgument, "trim below size").into();
        assert_eq!(err.to_string(), "invalid argument: trim below size");
    }
}
