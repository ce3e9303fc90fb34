//! The variadic argument stream.
//!
//! A C caller pushes a run of promoted scalars and the callee pulls them out
//! with `va_arg`, trusting the format text for their types. Here the run is
//! a slice of [`Arg`]s and [`ArgList`] is the cursor over it; a pull that the
//! next argument cannot satisfy is reported instead of being undefined.

use core::ffi::{c_int, CStr};

use crate::error::Error;

/// One promoted argument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Arg<'a> {
    /// Any signed integer, sign-extended.
    Int(i64),
    /// Any unsigned integer (and `char`), zero-extended.
    Uint(u64),
    /// `float` and `double`, both promoted to binary64.
    Double(f64),
    /// The raw bits of a binary128 `long double`; only ever skipped.
    LongDouble(u128),
    /// A C string: the bytes up to the first NUL. `None` is a null pointer.
    Str(Option<&'a [u8]>),
    /// A pointer value.
    Ptr(usize),
}

macro_rules! impl_from_int {
    ($variant:ident as $wide:ty: $($t:ty),*) => {$(
        impl<'a> From<$t> for Arg<'a> {
            #[inline]
            fn from(n: $t) -> Arg<'a> {
                Arg::$variant(n as $wide)
            }
        }
    )*};
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl<'a> From<bool> for Arg<'a> {
    fn from(b: bool) -> Arg<'a> {
        Arg::Int(b as i64)
    }
}

impl<'a> From<char> for Arg<'a> {
    fn from(c: char) -> Arg<'a> {
        Arg::Uint(c as u64)
    }
}

impl<'a> From<f32> for Arg<'a> {
    fn from(f: f32) -> Arg<'a> {
        Arg::Double(f as f64)
    }
}

impl<'a> From<f64> for Arg<'a> {
    fn from(f: f64) -> Arg<'a> {
        Arg::Double(f)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Arg<'a> {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Arg<'a> {
        Arg::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Arg<'a> {
        Arg::Str(Some(&s[..]))
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(s: &'a CStr) -> Arg<'a> {
        Arg::Str(Some(s.to_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Arg<'a> {
        Arg::Str(s.map(str::as_bytes))
    }
}

impl<'a, T> From<*const T> for Arg<'a> {
    fn from(p: *const T) -> Arg<'a> {
        Arg::Ptr(p as usize)
    }
}

impl<'a, T> From<*mut T> for Arg<'a> {
    fn from(p: *mut T) -> Arg<'a> {
        Arg::Ptr(p as usize)
    }
}

impl<'a> Arg<'a> {
    /// A `long double` argument given as its binary128 bit pattern.
    pub const fn long_double(bits: u128) -> Arg<'a> {
        Arg::LongDouble(bits)
    }

    /// A null `char *`.
    pub const fn null_str() -> Arg<'a> {
        Arg::Str(None)
    }
}

/// Builds a `&[Arg]` from a list of expressions, converting each with
/// `Arg::from`.
///
/// ```
/// use rv_printf::{args, Arg};
///
/// let a = args![1, -2i64, 'x', 0.5, "s"];
/// assert_eq!(Arg::Int(-2), a[1]);
/// assert_eq!(5, a.len());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as &[$crate::Arg<'_>]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::Arg::from($arg)),+]
    };
}

/// Cursor over an argument slice, the `va_list` of this crate.
#[derive(Clone, Debug)]
pub struct ArgList<'a, 'b> {
    args: &'b [Arg<'a>],
    next: usize,
}

impl<'a, 'b> ArgList<'a, 'b> {
    pub fn new(args: &'b [Arg<'a>]) -> Self {
        ArgList { args, next: 0 }
    }

    /// Arguments not consumed yet.
    pub fn remaining(&self) -> usize {
        self.args.len() - self.next
    }

    fn next_arg(&mut self, position: usize) -> Result<Arg<'a>, Error> {
        match self.args.get(self.next) {
            Some(arg) => {
                self.next += 1;
                Ok(*arg)
            }
            None => Err(Error::invalid("too few arguments", position)),
        }
    }

    /// Raw two's-complement bits of an integer argument; the caller extends
    /// or masks them to the width the directive asks for.
    pub(crate) fn int(&mut self, position: usize) -> Result<u64, Error> {
        match self.next_arg(position)? {
            Arg::Int(n) => Ok(n as u64),
            Arg::Uint(n) => Ok(n),
            Arg::Ptr(p) => Ok(p as u64),
            _ => Err(Error::invalid("expected an integer argument", position)),
        }
    }

    /// An `int` for a `*` width or precision.
    pub(crate) fn c_int(&mut self, position: usize) -> Result<c_int, Error> {
        self.int(position).map(|n| n as c_int)
    }

    pub(crate) fn double(&mut self, position: usize) -> Result<f64, Error> {
        match self.next_arg(position)? {
            Arg::Double(f) => Ok(f),
            _ => Err(Error::invalid("expected a double argument", position)),
        }
    }

    /// Skips over a `long double`, which is never converted.
    pub(crate) fn long_double(&mut self, position: usize) -> Result<(), Error> {
        match self.next_arg(position)? {
            Arg::LongDouble(_) | Arg::Double(_) => Ok(()),
            _ => Err(Error::invalid("expected a long double argument", position)),
        }
    }

    pub(crate) fn str(&mut self, position: usize) -> Result<Option<&'a [u8]>, Error> {
        match self.next_arg(position)? {
            Arg::Str(s) => Ok(s),
            _ => Err(Error::invalid("expected a string argument", position)),
        }
    }
}

/// Length of the C string `s`, stopping at its first NUL, at the end of the
/// slice or at `max`, whichever comes first. A null string has length 0.
pub fn strnlen(s: Option<&[u8]>, max: usize) -> usize {
    match s {
        None => 0,
        Some(s) => {
            let s = &s[..s.len().min(max)];
            s.iter().position(|&b| b == 0).unwrap_or(s.len())
        }
    }
}
