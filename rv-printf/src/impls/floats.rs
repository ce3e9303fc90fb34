//! Float conversions (`%f %e %g %a` and their uppercase forms).
//!
//! Finite non-zero values go through the shortest round-trip decimal and are
//! rounded (half-to-even) from there; positions past the shortest digits are
//! zeros. Hex form works on the binary significand directly.

use arrayvec::ArrayVec;
use cfg_if::cfg_if;

use crate::constants::{
    DEFAULT_FLOAT_PRECISION, HEX_SIGNIFICAND_DIGITS, INFINITY, MAX_FLOAT_PRECISION,
    MAX_PREFIX_LEN, MAX_SUFFIX_LEN, NAN, UNAVAILABLE,
};
use crate::field::{self, Field, Fragment};
use crate::format::{Conversion, Flags, FloatForm, FormatSpec, Radix};
use crate::itoa::{self, Digits};
use crate::ryu::{FloatClass, FloatIeeeData64, FloatingDecimal64};
use crate::sink::Sink;

/// The output strategy: how floats are rendered and how every field is laid
/// out.
///
/// Chosen at build time; [`DefaultFloatRenderer`] follows the `float` cargo
/// feature. Both hooks are static so a renderer carries no state.
pub trait FloatRenderer {
    /// Renders one `double` argument for a float conversion.
    fn put_double<S: Sink + ?Sized>(value: f64, spec: &FormatSpec, sink: &mut S);

    /// Pads and emits a rendered field. Used for every conversion, not just
    /// floats.
    #[inline]
    fn field_out<S: Sink + ?Sized>(field: &Field<'_>, spec: &FormatSpec, sink: &mut S) {
        field::field_out(field, spec, sink)
    }
}

/// The full renderer.
#[derive(Copy, Clone, Debug, Default)]
pub struct RyuRenderer;

/// A float-free renderer: every float prints as `(n/a)` and fields use the
/// reduced space-padding-only layout.
#[derive(Copy, Clone, Debug, Default)]
pub struct StubRenderer;

cfg_if! {
    if #[cfg(feature = "float")] {
        pub type DefaultFloatRenderer = RyuRenderer;
    } else {
        pub type DefaultFloatRenderer = StubRenderer;
    }
}

impl FloatRenderer for StubRenderer {
    fn put_double<S: Sink + ?Sized>(_value: f64, spec: &FormatSpec, sink: &mut S) {
        Self::field_out(&Field::text(UNAVAILABLE), spec, sink);
    }

    fn field_out<S: Sink + ?Sized>(field: &Field<'_>, spec: &FormatSpec, sink: &mut S) {
        field::field_out_simple(field, spec, sink)
    }
}

impl FloatRenderer for RyuRenderer {
    #[inline(never)]
    fn put_double<S: Sink + ?Sized>(value: f64, spec: &FormatSpec, sink: &mut S) {
        let ieee = FloatIeeeData64::from(value);
        let mut spec = *spec;
        let form = match spec.conversion {
            Conversion::Float(form) => form,
            _ => FloatForm::Fixed,
        };
        let class = ieee.class();
        if let FloatClass::Infinite | FloatClass::Nan = class {
            spec.flags.remove(Flags::ZERO_PAD);
        }

        let mut text = FloatText::default();
        let mut lead = ArrayVec::<u8, 3>::new();
        // Zero padding goes between the sign and the rest of the prefix.
        if let Some(sign) = spec.sign_char(ieee.is_negative) {
            if spec.has(Flags::ZERO_PAD) {
                lead.push(sign);
            } else {
                text.prefix.push(sign);
            }
        }

        let explicit = spec.precision().map(|p| p.min(MAX_FLOAT_PRECISION));
        let precision = explicit.unwrap_or(DEFAULT_FLOAT_PRECISION);
        let alt = spec.has(Flags::ALT);
        let uppercase = spec.uppercase();

        let mut literal: Option<&'static [u8]> = None;
        match class {
            FloatClass::Infinite => literal = Some(INFINITY[uppercase as usize]),
            FloatClass::Nan => literal = Some(NAN[uppercase as usize]),
            FloatClass::Zero | FloatClass::Normal | FloatClass::Subnormal => {
                let decimal = || {
                    ieee.shortest().unwrap_or(FloatingDecimal64 {
                        mantissa: 0,
                        exponent: 0,
                    })
                };
                match form {
                    FloatForm::Fixed => text.fixed(decimal(), precision, alt),
                    FloatForm::Exponent => text.exponent(decimal(), precision, alt, uppercase),
                    FloatForm::General => text.general(decimal(), precision, alt, uppercase),
                    FloatForm::Hex => {
                        text.hex(&ieee, explicit, alt, uppercase);
                        // and after the `0x` marker
                        if spec.has(Flags::ZERO_PAD) {
                            lead.extend(text.prefix.drain(..2));
                        }
                    }
                }
            }
        }

        let field = Field {
            prefix: Fragment::forward(&text.prefix),
            body: match literal {
                Some(literal) => Fragment::forward(literal),
                None => Fragment::reversed(&text.digits),
            },
            suffix: Fragment::forward(&text.suffix),
            lead: Fragment::forward(&lead),
            num_pad: text.num_pad,
            suffix_pad: text.suffix_pad,
        };
        Self::field_out(&field, &spec, sink);
    }
}

/// Text pieces of one float, filled in by the layout for its form.
#[derive(Default)]
struct FloatText {
    prefix: ArrayVec<u8, MAX_PREFIX_LEN>,
    /// Least significant first.
    digits: Digits,
    suffix: ArrayVec<u8, MAX_SUFFIX_LEN>,
    num_pad: i32,
    suffix_pad: i32,
}

impl FloatText {
    fn push_decimal_digits(&mut self, mantissa: u64) {
        itoa::write_reversed(mantissa, Radix::Decimal, false, &mut self.digits);
    }

    /// `[e|p][+|-]` and the exponent's decimal digits, at least `min_digits`.
    fn push_exponent(&mut self, marker: u8, exponent: i32, min_digits: usize) {
        self.suffix.push(marker);
        self.suffix.push(if exponent < 0 { b'-' } else { b'+' });
        let mut digits = Digits::new();
        itoa::write_reversed(exponent.unsigned_abs() as u64, Radix::Decimal, false, &mut digits);
        for _ in digits.len()..min_digits {
            self.suffix.push(b'0');
        }
        self.suffix.extend(digits.iter().rev().copied());
    }

    /// f-form: `precision` digits after the radix point.
    fn fixed(&mut self, d: FloatingDecimal64, precision: i32, alt: bool) {
        let int_digits = d.digit_count() + d.exponent;
        let mut d = d.round_to(int_digits + precision);
        if d.mantissa == 0 {
            d.exponent = 0;
        }
        let count = d.digit_count();

        if d.exponent >= 0 {
            // Integer: the digits, then the zeros the exponent stands for.
            self.push_decimal_digits(d.mantissa);
            self.num_pad = d.exponent;
            if precision > 0 || alt {
                self.suffix.push(b'.');
            }
            self.suffix_pad = precision;
        } else if count + d.exponent <= 0 {
            // Pure fraction: 0.000ddd
            self.prefix.push(b'0');
            self.prefix.push(b'.');
            self.num_pad = count + d.exponent;
            self.push_decimal_digits(d.mantissa);
            self.suffix_pad = precision + d.exponent;
        } else {
            // The radix point falls inside the digits.
            let fraction = -d.exponent as usize;
            self.push_decimal_digits(d.mantissa);
            self.digits.insert(fraction, b'.');
            self.suffix_pad = precision + d.exponent;
        }
    }

    /// e-form: one digit, the radix point, `precision` digits, the exponent.
    fn exponent(&mut self, d: FloatingDecimal64, precision: i32, alt: bool, uppercase: bool) {
        let d = d.round_to(precision + 1);
        let count = d.digit_count();
        let exponent10 = if d.mantissa == 0 {
            0
        } else {
            d.exponent + count - 1
        };

        self.push_decimal_digits(d.mantissa);
        if let Some(lead) = self.digits.pop() {
            self.prefix.push(lead);
        }
        if precision > 0 || alt {
            self.prefix.push(b'.');
        }
        self.num_pad = precision - (count - 1);
        self.push_exponent(if uppercase { b'E' } else { b'e' }, exponent10, 2);
    }

    /// g-form: `precision` significant digits in whichever of f and e form
    /// suits the rounded exponent, trailing fraction zeros trimmed unless
    /// `alt`.
    fn general(&mut self, d: FloatingDecimal64, precision: i32, alt: bool, uppercase: bool) {
        let p = precision.max(1);
        let mut d = d.round_to(p);
        let x = if d.mantissa == 0 {
            0
        } else {
            d.exponent + d.digit_count() - 1
        };
        if !alt {
            while d.mantissa != 0 && d.mantissa % 10 == 0 {
                d.mantissa /= 10;
                d.exponent += 1;
            }
        }

        if p > x && x >= -4 {
            let fraction = if alt {
                p - 1 - x
            } else if d.mantissa == 0 {
                0
            } else {
                (-d.exponent).max(0)
            };
            self.fixed(d, fraction, alt);
        } else {
            let fraction = if alt { p - 1 } else { d.digit_count() - 1 };
            self.exponent(d, fraction, alt, uppercase);
        }
    }

    /// a-form: `0x1.hhhp±d`, with the significand normalized so the leading
    /// hex digit is 1 (subnormals included). Without a precision all 13
    /// fraction digits are printed; zero prints as `0x0p+0`.
    fn hex(&mut self, ieee: &FloatIeeeData64, explicit: Option<i32>, alt: bool, uppercase: bool) {
        self.prefix.push(b'0');
        self.prefix.push(if uppercase { b'X' } else { b'x' });

        let (mut significand, mut exponent) = if ieee.class() == FloatClass::Zero {
            (0, 0)
        } else {
            ieee.normalized()
        };

        let frac_digits = match explicit {
            _ if significand == 0 => 0,
            Some(p) if p < HEX_SIGNIFICAND_DIGITS => {
                let shift = 4 * (HEX_SIGNIFICAND_DIGITS - p) as u32;
                let rest = significand & ((1u64 << shift) - 1);
                let half = 1u64 << (shift - 1);
                significand >>= shift;
                if rest > half || (rest == half && significand & 1 == 1) {
                    significand += 1;
                }
                // 0x1.fff rounded up to 0x2.000 renormalizes to 0x1.000p+1
                if significand >> (4 * p as u32) >= 2 {
                    significand >>= 1;
                    exponent += 1;
                }
                p
            }
            _ => HEX_SIGNIFICAND_DIGITS,
        };

        let frac_bits = 4 * frac_digits as u32;
        let lead = significand >> frac_bits;
        itoa::write_reversed(lead, Radix::Hex, uppercase, &mut self.digits);
        if let Some(lead) = self.digits.pop() {
            self.prefix.push(lead);
        }

        let requested = explicit.unwrap_or(frac_digits);
        if requested > 0 || alt {
            self.prefix.push(b'.');
        }
        itoa::write_hex_fixed_reversed(
            significand & ((1u64 << frac_bits) - 1),
            frac_digits as usize,
            uppercase,
            &mut self.digits,
        );
        self.num_pad = requested - frac_digits;
        self.push_exponent(if uppercase { b'P' } else { b'p' }, exponent, 1);
    }
}
