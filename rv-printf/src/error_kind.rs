use core::fmt;

use crate::constants::{EINVAL, ENOTSUP};

/// This crate's error kind.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Malformed flag or length sequence, width/precision overflow, an
    /// incomplete directive or an argument that does not fit the conversion.
    InvalidArgument(&'static str),

    /// Well-formed but deliberately unsupported: `%n`, `%m`, positional
    /// (`$`) arguments and wide-character `%lc`/`%ls`.
    Unsupported(&'static str),
}

impl ErrorKind {
    /// The negative C status code matching this kind (`-EINVAL` or
    /// `-ENOTSUP`).
    pub const fn status(&self) -> i32 {
        match self {
            ErrorKind::InvalidArgument(_) => -EINVAL,
            ErrorKind::Unsupported(_) => -ENOTSUP,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::ErrorKind::*;
        match self {
            InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            Unsupported(what) => write!(f, "unsupported conversion: {}", what),
        }
    }
}
