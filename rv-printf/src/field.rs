//! Field output: padding and emission order for one rendered directive.

use crate::format::{Flags, FormatSpec};
use crate::sink::Sink;

/// The order in which a fragment's bytes are emitted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Order {
    #[default]
    Forward,
    /// The bytes were built least-significant first.
    Reversed,
}

/// A borrowed run of output bytes plus its emission order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Fragment<'a> {
    bytes: &'a [u8],
    order: Order,
}

impl<'a> Fragment<'a> {
    pub const fn forward(bytes: &'a [u8]) -> Self {
        Fragment {
            bytes,
            order: Order::Forward,
        }
    }

    pub const fn reversed(bytes: &'a [u8]) -> Self {
        Fragment {
            bytes,
            order: Order::Reversed,
        }
    }

    pub const fn empty() -> Self {
        Fragment::forward(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) {
        match self.order {
            Order::Forward => self.bytes.iter().for_each(|&b| sink.put(b)),
            Order::Reversed => self.bytes.iter().rev().for_each(|&b| sink.put(b)),
        }
    }
}

/// The rendered payload of one directive.
///
/// `num_pad` splices zeros around the body: negative for leading zeros
/// (integer precision, the zeros after `0.`), positive for trailing ones (the
/// integer part of a large fixed-form value, e-form fraction digits past the
/// shortest representation). `suffix_pad` appends zeros after the suffix.
///
/// `lead` is only set for zero-padded floats: the sign, plus the `0x` of
/// hex form, which have to precede the padding. Everywhere else those bytes
/// are part of the prefix.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Field<'a> {
    pub prefix: Fragment<'a>,
    pub body: Fragment<'a>,
    pub suffix: Fragment<'a>,
    pub lead: Fragment<'a>,
    pub num_pad: i32,
    pub suffix_pad: i32,
}

impl<'a> Field<'a> {
    /// A plain text body with no prefix, suffix or padding.
    pub fn text(bytes: &'a [u8]) -> Self {
        Field {
            body: Fragment::forward(bytes),
            ..Field::default()
        }
    }

    fn leading_zeros(&self) -> usize {
        if self.num_pad < 0 {
            self.num_pad.unsigned_abs() as usize
        } else {
            0
        }
    }

    fn trailing_zeros(&self) -> usize {
        if self.num_pad > 0 {
            self.num_pad as usize
        } else {
            0
        }
    }

    /// Rendered width before any field-width padding.
    pub fn width(&self) -> usize {
        self.prefix.len()
            + self.leading_zeros()
            + self.body.len()
            + self.trailing_zeros()
            + self.suffix.len()
            + self.suffix_pad.max(0) as usize
            + self.lead.len()
    }

    fn width_pad(&self, spec: &FormatSpec) -> usize {
        (spec.width.max(0) as usize).saturating_sub(self.width())
    }

    fn write_number<S: Sink + ?Sized>(&self, sink: &mut S) {
        sink.pad(self.leading_zeros(), b'0');
        self.body.write_to(sink);
        sink.pad(self.trailing_zeros(), b'0');
        self.suffix.write_to(sink);
        sink.pad(self.suffix_pad.max(0) as usize, b'0');
    }
}

/// Emits `field` padded to the directive's width.
///
/// - left-adjust: `prefix zeros body zeros suffix zeros spaces`
/// - zero-pad float: `lead zeros prefix ...`
/// - zero-pad other: `prefix zeros ...`
/// - otherwise: `spaces prefix ...`
pub fn field_out<S: Sink + ?Sized>(field: &Field<'_>, spec: &FormatSpec, sink: &mut S) {
    let width_pad = field.width_pad(spec);

    if spec.has(Flags::LEFT_ADJ) {
        field.prefix.write_to(sink);
        field.write_number(sink);
        sink.pad(width_pad, b' ');
    } else if spec.has(Flags::ZERO_PAD) {
        if spec.is_float() {
            field.lead.write_to(sink);
            sink.pad(width_pad, b'0');
            field.prefix.write_to(sink);
        } else {
            field.prefix.write_to(sink);
            sink.pad(width_pad, b'0');
        }
        field.write_number(sink);
    } else {
        sink.pad(width_pad, b' ');
        field.prefix.write_to(sink);
        field.write_number(sink);
    }
}

/// The reduced layout: always space-padded on the left, no zero-pad or
/// left-adjust handling.
pub fn field_out_simple<S: Sink + ?Sized>(field: &Field<'_>, spec: &FormatSpec, sink: &mut S) {
    sink.pad(field.width_pad(spec), b' ');
    field.lead.write_to(sink);
    field.prefix.write_to(sink);
    field.write_number(sink);
}
