//! The dispatch loop and the printf-family entry points.

use core::ffi::{c_int, c_long, c_longlong};

use tracing::debug;

use crate::args::{strnlen, Arg, ArgList};
use crate::console::Console;
use crate::constants::{DEFAULT_STR_PRECISION, NULL_STR, UNAVAILABLE};
use crate::error::Error;
use crate::field::Field;
use crate::format::{Conversion, FormatSpec, LengthMod, Status};
use crate::impls::floats::{DefaultFloatRenderer, FloatRenderer};
use crate::impls::integers::{put_char, put_integer, put_str};
use crate::parse::parse_directive;
use crate::sink::{BufferSink, Putc, Sink};

/// Formats `format` with `args` into `sink` using the renderer `R`.
///
/// The format text ends at its first NUL or at the end of the slice. On
/// success returns the sink's running count; on failure the bytes emitted
/// before the failing directive stay emitted.
///
/// ```
/// use rv_printf::{args, vformat, ArgList, BufferSink, StubRenderer};
///
/// let mut buf = [0u8; 32];
/// let mut sink = BufferSink::new(&mut buf);
/// vformat::<StubRenderer, _>(&mut sink, b"%d %f", ArgList::new(args![1, 2.0])).unwrap();
/// assert_eq!(7, sink.finish());
/// assert_eq!(b"1 (n/a)\0", &buf[..8]);
/// ```
pub fn vformat<R, S>(sink: &mut S, format: &[u8], mut args: ArgList<'_, '_>) -> Result<usize, Error>
where
    R: FloatRenderer + ?Sized,
    S: Sink + ?Sized,
{
    let format = &format[..strnlen(Some(format), usize::MAX)];

    let mut i = 0;
    while i < format.len() {
        let c = format[i];
        if c != b'%' {
            sink.put(c);
            i += 1;
            continue;
        }
        if format.get(i + 1) == Some(&b'%') {
            sink.put(b'%');
            i += 2;
            continue;
        }

        i = parse_directive(format, i, &mut args)
            .and_then(|(spec, next)| {
                convert::<R, S>(&spec, i, &mut args, sink)?;
                Ok(next)
            })
            .map_err(|err| {
                debug!(position = err.position(), reason = %err.kind(), "rejected directive");
                err
            })?;
    }

    Ok(sink.chars_out())
}

fn convert<R, S>(
    spec: &FormatSpec,
    position: usize,
    args: &mut ArgList<'_, '_>,
    sink: &mut S,
) -> Result<(), Error>
where
    R: FloatRenderer + ?Sized,
    S: Sink + ?Sized,
{
    match spec.conversion {
        Conversion::Int => {
            let bits = integer_bits(spec, position)?;
            let raw = args.int(position)?;
            let value = resize(raw, bits, spec.is(Status::SIGNED));
            put_integer::<R, S>(value, spec, sink);
        }
        Conversion::Pointer => {
            let raw = args.int(position)?;
            put_integer::<R, S>(resize(raw, usize::BITS, false), spec, sink);
        }
        Conversion::Float(_) => {
            if spec.length == LengthMod::LongDouble {
                // Consumed to keep the stream in step, never converted.
                args.long_double(position)?;
                R::field_out(&Field::text(UNAVAILABLE), spec, sink);
            } else {
                R::put_double(args.double(position)?, spec, sink);
            }
        }
        Conversion::Char => {
            let c = args.int(position)? as u8;
            put_char::<R, S>(c, spec, sink);
        }
        Conversion::Str => match args.str(position)? {
            None => put_str::<R, S>(NULL_STR, spec, sink),
            Some(s) => {
                let max = match spec.precision() {
                    Some(p) => p as usize,
                    None => DEFAULT_STR_PRECISION,
                };
                put_str::<R, S>(&s[..strnlen(Some(s), max)], spec, sink);
            }
        },
    }
    Ok(())
}

/// Bit width of the integer argument a directive reads.
fn integer_bits(spec: &FormatSpec, position: usize) -> Result<u32, Error> {
    let bits = match spec.length {
        LengthMod::None => c_int::BITS,
        LengthMod::HalfHalf => 8,
        LengthMod::Half => 16,
        LengthMod::Long | LengthMod::LongDouble => c_long::BITS,
        LengthMod::LongLong => c_longlong::BITS,
        LengthMod::IntMax => 64,
        LengthMod::Size => usize::BITS,
        LengthMod::PtrDiff => isize::BITS,
        LengthMod::BitWidth => spec.int_bits,
        // The fast types are never narrower than a register.
        LengthMod::FastBitWidth => match spec.int_bits {
            8 => 8,
            n @ (16 | 32) => n.max(usize::BITS),
            64 => 64,
            _ => return Err(Error::invalid("unsupported fast integer width", position)),
        },
    };
    match bits {
        8 | 16 | 32 | 64 => Ok(bits),
        _ => Err(Error::invalid("unsupported integer width", position)),
    }
}

/// Sign-extends or masks the low `bits` of `raw`.
#[inline]
fn resize(raw: u64, bits: u32, signed: bool) -> u64 {
    if bits >= 64 {
        raw
    } else if signed {
        let shift = 64 - bits;
        (((raw << shift) as i64) >> shift) as u64
    } else {
        raw & ((1u64 << bits) - 1)
    }
}

/// Formatted write to the console.
///
/// The console stays locked for the whole call. Returns the number of bytes
/// written.
pub fn printf<W: Putc>(
    console: &Console<W>,
    format: impl AsRef<[u8]>,
    args: &[Arg<'_>],
) -> Result<usize, Error> {
    vprintf(console, format, ArgList::new(args))
}

/// [`printf`] with an explicit argument cursor.
pub fn vprintf<W: Putc>(
    console: &Console<W>,
    format: impl AsRef<[u8]>,
    args: ArgList<'_, '_>,
) -> Result<usize, Error> {
    let mut console = console.lock();
    let mut sink = console.sink();
    vformat::<DefaultFloatRenderer, _>(&mut sink, format.as_ref(), args)
}

/// Bounded formatted write into `buf`.
///
/// At most `buf.len() - 1` bytes are stored and the output is always
/// NUL-terminated when `buf` is not empty. Returns the length the full output
/// would have had, so a result `>= buf.len()` means it was truncated.
///
/// ```
/// use rv_printf::{args, snprintf};
///
/// let mut buf = [0u8; 6];
/// assert_eq!(Ok(11), snprintf(&mut buf, "hello %s", args!["world"]));
/// assert_eq!(b"hello\0", &buf);
/// ```
pub fn snprintf(buf: &mut [u8], format: impl AsRef<[u8]>, args: &[Arg<'_>]) -> Result<usize, Error> {
    vsnprintf(buf, format, ArgList::new(args))
}

/// [`snprintf`] with an explicit argument cursor.
pub fn vsnprintf(
    buf: &mut [u8],
    format: impl AsRef<[u8]>,
    args: ArgList<'_, '_>,
) -> Result<usize, Error> {
    let mut sink = BufferSink::new(buf);
    let result = vformat::<DefaultFloatRenderer, _>(&mut sink, format.as_ref(), args);
    let count = sink.finish();
    result.map(|_| count)
}

/// Formatted write into `buf` with no limit but the buffer itself.
///
/// A slice always knows its length, so this behaves as [`snprintf`] over all
/// of `buf`.
pub fn sprintf(buf: &mut [u8], format: impl AsRef<[u8]>, args: &[Arg<'_>]) -> Result<usize, Error> {
    vsprintf(buf, format, ArgList::new(args))
}

/// [`sprintf`] with an explicit argument cursor.
pub fn vsprintf(
    buf: &mut [u8],
    format: impl AsRef<[u8]>,
    args: ArgList<'_, '_>,
) -> Result<usize, Error> {
    vsnprintf(buf, format, args)
}

/// `printf!(console, format, args...)`
///
/// ```
/// # #[cfg(feature = "float")]
/// # {
/// use rv_printf::Console;
///
/// let mut out = Vec::new();
/// let console = Console::new(|b: u8| out.push(b));
/// rv_printf::printf!(&console, "%05.1f|%-4x|\n", 3.14159, 255u32).unwrap();
/// drop(console);
/// assert_eq!(b"003.1|ff  |\n", &out[..]);
/// # }
/// ```
#[macro_export]
macro_rules! printf {
    ($console:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf($console, $format, $crate::args![$($arg),*])
    };
}

/// `snprintf!(buf, format, args...)`
#[macro_export]
macro_rules! snprintf {
    ($buf:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::snprintf($buf, $format, $crate::args![$($arg),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize() {
        assert_eq!(u64::MAX, resize(0xff, 8, true));
        assert_eq!(0x7f, resize(0x17f, 8, true));
        assert_eq!(0xff, resize(u64::MAX, 8, false));
        assert_eq!(0xffff_8000_0000_0000, resize(0xffff_8000_0000_0000, 64, true));
        assert_eq!(0xffff_ffff_8000_0000, resize(0x8000_0000, 32, true));
    }

    #[test]
    fn test_integer_bits() {
        let mut spec = FormatSpec::new(Conversion::Int);
        assert_eq!(Ok(32), integer_bits(&spec, 0));
        spec.length = LengthMod::HalfHalf;
        assert_eq!(Ok(8), integer_bits(&spec, 0));
        spec.length = LengthMod::BitWidth;
        spec.int_bits = 12;
        assert!(integer_bits(&spec, 0).is_err());
        spec.length = LengthMod::FastBitWidth;
        spec.int_bits = 16;
        assert_eq!(Ok(16u32.max(usize::BITS)), integer_bits(&spec, 0));
        spec.int_bits = 8;
        assert_eq!(Ok(8), integer_bits(&spec, 0));
    }
}
