use arrayvec::ArrayVec;

use crate::field::{Field, Fragment};
use crate::format::{Flags, FormatSpec, Radix, Status};
use crate::impls::floats::FloatRenderer;
use crate::itoa::{self, Digits};
use crate::sink::Sink;

/// Renders an integer conversion.
///
/// `value` is already sign-extended (signed conversions) or masked
/// (unsigned ones) to the directive's width; only the `SIGNED` status
/// decides how its bits are read.
#[inline(never)]
pub(crate) fn put_integer<R, S>(value: u64, spec: &FormatSpec, sink: &mut S)
where
    R: FloatRenderer + ?Sized,
    S: Sink + ?Sized,
{
    let mut prefix = ArrayVec::<u8, 2>::new();
    let mut n = value;

    match spec.radix {
        Radix::Decimal if spec.is(Status::SIGNED) => {
            let is_negative = (value as i64) < 0;
            if is_negative {
                // convert the negative num to positive by summing 1 to it's 2 complement
                n = (!value).wrapping_add(1);
            }
            if let Some(sign) = spec.sign_char(is_negative) {
                prefix.push(sign);
            }
        }
        Radix::Hex | Radix::Binary if spec.has(Flags::ALT) && value != 0 => {
            let marker = match (spec.radix, spec.uppercase()) {
                (Radix::Hex, false) => b'x',
                (Radix::Hex, true) => b'X',
                (_, false) => b'b',
                (_, true) => b'B',
            };
            prefix.push(b'0');
            prefix.push(marker);
        }
        _ => {}
    }

    let mut digits = Digits::new();
    itoa::write_reversed(n, spec.radix, spec.uppercase(), &mut digits);
    let len = digits.len() as i32;

    let mut precision = spec.precision();
    // Alternate octal: raise the precision just enough for a leading zero.
    if spec.radix == Radix::Octal && spec.has(Flags::ALT) {
        if digits.last() != Some(&b'0') && precision.unwrap_or(0) <= len {
            precision = Some(len + 1);
        } else if value == 0 && precision == Some(0) {
            precision = Some(1);
        }
    }

    let mut num_pad = 0;
    let mut body = &digits[..];
    match precision {
        Some(p) if p > len => num_pad = -(p - len),
        Some(0) if value == 0 => body = &[],
        _ => {}
    }

    let field = Field {
        prefix: Fragment::forward(&prefix),
        body: Fragment::reversed(body),
        num_pad,
        ..Field::default()
    };
    R::field_out(&field, spec, sink);
}

/// `%c`: the low byte of the argument.
pub(crate) fn put_char<R, S>(byte: u8, spec: &FormatSpec, sink: &mut S)
where
    R: FloatRenderer + ?Sized,
    S: Sink + ?Sized,
{
    R::field_out(&Field::text(&[byte]), spec, sink);
}

/// `%s`: `bytes` is already cut to the precision (or the default ceiling).
pub(crate) fn put_str<R, S>(bytes: &[u8], spec: &FormatSpec, sink: &mut S)
where
    R: FloatRenderer + ?Sized,
    S: Sink + ?Sized,
{
    R::field_out(&Field::text(bytes), spec, sink);
}
