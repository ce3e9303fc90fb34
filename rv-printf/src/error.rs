use core::fmt;

use crate::error_kind::ErrorKind;

/// This crate's error type.
///
/// Errors come out of the conversion-specifier parser (and the argument
/// fetch that follows it). They abort the whole formatting call; output
/// already emitted before the failing directive is not rolled back.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    position: usize,
}

impl Error {
    pub(crate) const fn invalid(reason: &'static str, position: usize) -> Error {
        Error {
            kind: ErrorKind::InvalidArgument(reason),
            position,
        }
    }

    pub(crate) const fn unsupported(what: &'static str, position: usize) -> Error {
        Error {
            kind: ErrorKind::Unsupported(what),
            position,
        }
    }

    /// Returns the [`ErrorKind`].
    ///
    /// [`ErrorKind`]: enum.ErrorKind.html
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset of the offending `%` directive in the format text.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The negative status a C caller of the printf family would see.
    pub const fn status(&self) -> i32 {
        self.kind.status()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (directive at byte {})", self.kind, self.position)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind, position: 0 }
    }
}

#[cfg(feature = "std")]
mod standard {
    use super::*;

    impl std::error::Error for Error {}
}
