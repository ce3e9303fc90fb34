//! The conversion-specifier parser.
//!
//! Grammar: `%[flags][width][.precision][length]conversion`, with `*`
//! pulling width or precision from the argument stream. Flags and digits may
//! interleave the way historical C parsers allowed; in particular a `0` is a
//! digit once a width or precision literal has started and the zero-pad flag
//! before that.

use crate::args::ArgList;
use crate::error::Error;
use crate::format::{Conversion, Flags, FloatForm, FormatSpec, LengthMod, Radix, Status};

const MAX_BIT_WIDTH: u32 = u64::BITS;

/// Parses the directive whose `%` sits at `format[start]`.
///
/// Returns the descriptor and the index just past the conversion character.
/// `*` arguments are consumed from `args` as they are met, so on return the
/// cursor points at the directive's own value.
pub fn parse_directive(
    format: &[u8],
    start: usize,
    args: &mut ArgList<'_, '_>,
) -> Result<(FormatSpec, usize), Error> {
    let invalid = |reason| Error::invalid(reason, start);
    let unsupported = |what| Error::unsupported(what, start);

    let mut spec = FormatSpec::new(Conversion::Int);
    let mut bit_width = false;

    let mut i = start + 1;
    let conversion = loop {
        let c = match format.get(i) {
            Some(&c) if c != 0 => c,
            // A directive cut off by the end of the format (a lone trailing
            // `%` included) is an error, not a silent end of output.
            _ => return Err(invalid("incomplete directive")),
        };
        i += 1;

        match c {
            b'#' => spec.flags |= Flags::ALT,
            b'-' => spec.flags |= Flags::LEFT_ADJ,
            b' ' => spec.flags |= Flags::SPACE_SIGN,
            b'+' => spec.flags |= Flags::PLUS_SIGN,
            // Thousands grouping is locale business; accepted and ignored.
            b'\'' => {}
            b'0'..=b'9' => {
                let digit = (c - b'0') as i32;
                if bit_width {
                    spec.int_bits = spec.int_bits * 10 + digit as u32;
                    if spec.int_bits > MAX_BIT_WIDTH {
                        return Err(invalid("bit width larger than 64"));
                    }
                } else if c == b'0'
                    && !(spec.is(Status::HAS_PRECISION) && !spec.is(Status::PRECISION_FROM_ARG))
                    && !(spec.is(Status::HAS_WIDTH) && !spec.is(Status::WIDTH_FROM_ARG))
                {
                    if spec.has(Flags::ZERO_PAD) {
                        return Err(invalid("repeated zero flag"));
                    }
                    spec.flags |= Flags::ZERO_PAD;
                } else if spec.is(Status::HAS_PRECISION) {
                    if spec.is(Status::PRECISION_FROM_ARG) {
                        return Err(invalid("precision given both inline and by argument"));
                    }
                    spec.precision = push_digit(spec.precision, digit)
                        .ok_or_else(|| invalid("precision overflows int"))?;
                } else {
                    if spec.is(Status::WIDTH_FROM_ARG) || spec.is(Status::PRECISION_FROM_ARG) {
                        return Err(invalid("width given both inline and by argument"));
                    }
                    spec.status |= Status::HAS_WIDTH;
                    spec.width = push_digit(spec.width, digit)
                        .ok_or_else(|| invalid("width overflows int"))?;
                }
            }
            b'.' => {
                if spec.is(Status::HAS_PRECISION) {
                    return Err(invalid("repeated precision"));
                }
                spec.status |= Status::HAS_PRECISION;
            }
            b'*' => {
                if spec.is(Status::WIDTH_FROM_ARG) && spec.is(Status::PRECISION_FROM_ARG) {
                    return Err(invalid("third `*`"));
                }
                if !spec.is(Status::HAS_PRECISION) {
                    let width = args.c_int(start)?;
                    spec.status |= Status::HAS_WIDTH | Status::WIDTH_FROM_ARG;
                    // A negative width is a `-` flag plus its magnitude.
                    if width < 0 {
                        spec.flags |= Flags::LEFT_ADJ;
                    }
                    spec.width = width.checked_abs().ok_or_else(|| invalid("width overflows int"))?;
                } else {
                    let precision = args.c_int(start)?;
                    // A negative precision is as if none was given.
                    if precision < 0 {
                        spec.status.remove(Status::HAS_PRECISION);
                        continue;
                    }
                    spec.status |= Status::PRECISION_FROM_ARG;
                    spec.precision = precision;
                }
            }
            b'$' => return Err(unsupported("positional arguments")),

            b'h' => {
                spec.length = match spec.length {
                    LengthMod::None => LengthMod::Half,
                    LengthMod::Half => LengthMod::HalfHalf,
                    _ => return Err(invalid("conflicting length modifiers")),
                }
            }
            b'l' => {
                spec.length = match spec.length {
                    LengthMod::None => LengthMod::Long,
                    LengthMod::Long => LengthMod::LongLong,
                    _ => return Err(invalid("conflicting length modifiers")),
                }
            }
            b'L' | b'j' | b'z' | b't' | b'w' => {
                if spec.length != LengthMod::None {
                    return Err(invalid("conflicting length modifiers"));
                }
                spec.length = match c {
                    b'L' => LengthMod::LongDouble,
                    b'j' => LengthMod::IntMax,
                    b'z' => LengthMod::Size,
                    b't' => LengthMod::PtrDiff,
                    _ => {
                        bit_width = true;
                        if format.get(i) == Some(&b'f') {
                            i += 1;
                            LengthMod::FastBitWidth
                        } else {
                            LengthMod::BitWidth
                        }
                    }
                }
            }

            b'c' | b's' => {
                if matches!(spec.length, LengthMod::Long | LengthMod::LongDouble) {
                    return Err(unsupported("wide characters"));
                }
                break if c == b'c' {
                    Conversion::Char
                } else {
                    Conversion::Str
                };
            }
            b'd' | b'i' => {
                spec.status |= Status::SIGNED;
                break Conversion::Int;
            }
            b'u' => break Conversion::Int,
            b'o' => {
                spec.radix = Radix::Octal;
                break Conversion::Int;
            }
            b'x' | b'X' => {
                spec.radix = Radix::Hex;
                break Conversion::Int;
            }
            b'b' | b'B' => {
                spec.radix = Radix::Binary;
                break Conversion::Int;
            }
            // Same as `%#lx`.
            b'p' => {
                spec.flags |= Flags::ALT;
                spec.radix = Radix::Hex;
                break Conversion::Pointer;
            }
            b'f' | b'F' => break Conversion::Float(FloatForm::Fixed),
            b'e' | b'E' => break Conversion::Float(FloatForm::Exponent),
            b'g' | b'G' => break Conversion::Float(FloatForm::General),
            b'a' | b'A' => {
                spec.radix = Radix::Hex;
                break Conversion::Float(FloatForm::Hex);
            }
            b'n' => return Err(unsupported("%n")),
            b'm' => return Err(unsupported("%m")),
            _ => return Err(invalid("unknown conversion character")),
        }
    };

    if format[i - 1].is_ascii_uppercase() {
        spec.status |= Status::UPPERCASE;
    }
    spec.conversion = conversion;

    if spec.is_integer() && spec.is(Status::HAS_PRECISION) {
        spec.flags.remove(Flags::ZERO_PAD);
    }
    if spec.has(Flags::LEFT_ADJ) {
        spec.flags.remove(Flags::ZERO_PAD);
    }

    Ok((spec, i))
}

#[inline]
fn push_digit(value: i32, digit: i32) -> Option<i32> {
    value.checked_mul(10)?.checked_add(digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::error_kind::ErrorKind;

    fn parse(format: &str) -> Result<(FormatSpec, usize), Error> {
        parse_directive(format.as_bytes(), 0, &mut ArgList::new(args![]))
    }

    #[test]
    fn test_zero_is_flag_then_digit() {
        let (spec, end) = parse("%08.03d").unwrap();
        assert_eq!(7, end);
        assert_eq!(8, spec.width);
        assert_eq!(3, spec.precision);
        // Dropped because an integer conversion has a precision.
        assert!(!spec.has(Flags::ZERO_PAD));

        let (spec, _) = parse("%010f").unwrap();
        assert!(spec.has(Flags::ZERO_PAD));
        assert_eq!(10, spec.width);

        let (spec, _) = parse("%100d").unwrap();
        assert_eq!(100, spec.width);
        assert!(!spec.has(Flags::ZERO_PAD));
    }

    #[test]
    fn test_left_adjust_wins() {
        let (spec, _) = parse("%-05d").unwrap();
        assert!(spec.has(Flags::LEFT_ADJ));
        assert!(!spec.has(Flags::ZERO_PAD));
    }

    #[test]
    fn test_star_arguments() {
        let args = args![-7, -1, 5];
        let mut list = ArgList::new(args);
        let (spec, _) = parse_directive(b"%*.*d", 0, &mut list).unwrap();
        assert!(spec.has(Flags::LEFT_ADJ));
        assert_eq!(7, spec.width);
        assert_eq!(None, spec.precision());
        assert_eq!(1, list.remaining());
    }

    #[test]
    fn test_length_modifiers() {
        assert_eq!(LengthMod::HalfHalf, parse("%hhd").unwrap().0.length);
        assert_eq!(LengthMod::LongLong, parse("%llx").unwrap().0.length);
        assert_eq!(LengthMod::Size, parse("%zu").unwrap().0.length);
        let (spec, _) = parse("%wf16d").unwrap();
        assert_eq!(LengthMod::FastBitWidth, spec.length);
        assert_eq!(16, spec.int_bits);
        let (spec, _) = parse("%w64x").unwrap();
        assert_eq!(LengthMod::BitWidth, spec.length);
        assert_eq!(64, spec.int_bits);
    }

    #[test]
    fn test_conversions() {
        let (spec, _) = parse("%X").unwrap();
        assert_eq!(Radix::Hex, spec.radix);
        assert!(spec.uppercase());
        let (spec, _) = parse("%p").unwrap();
        assert_eq!(Conversion::Pointer, spec.conversion);
        assert!(spec.has(Flags::ALT));
        let (spec, _) = parse("%.3A").unwrap();
        assert_eq!(Conversion::Float(FloatForm::Hex), spec.conversion);
        assert_eq!(Some(3), spec.precision());
        assert!(spec.uppercase());
        let (spec, _) = parse("%i").unwrap();
        assert!(spec.is(Status::SIGNED));
    }

    #[test]
    fn test_rejections() {
        let invalid = |f: &str| match parse(f) {
            Err(e) => matches!(e.kind(), ErrorKind::InvalidArgument(_)),
            Ok(_) => false,
        };
        let unsupported = |f: &str| match parse(f) {
            Err(e) => matches!(e.kind(), ErrorKind::Unsupported(_)),
            Ok(_) => false,
        };
        assert!(invalid("%hhhd"));
        assert!(invalid("%lllu"));
        assert!(invalid("%hld"));
        assert!(invalid("%Lld"));
        assert!(invalid("%jzd"));
        assert!(invalid("%w65d"));
        assert!(invalid("%1.2.3f"));
        assert!(invalid("%00d"));
        assert!(invalid("%99999999999d"));
        assert!(invalid("%.99999999999f"));
        assert!(invalid("%5"));
        assert!(invalid("%y"));
        assert!(unsupported("%n"));
        assert!(unsupported("%m"));
        assert!(unsupported("%1$d"));
        assert!(unsupported("%lc"));
        assert!(unsupported("%ls"));
    }

    #[test]
    fn test_star_without_argument_fails() {
        assert_eq!(-22, parse("%*d").unwrap_err().status());
    }
}
