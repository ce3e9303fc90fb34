use bitflags::bitflags;

bitflags! {
    /// Display flags, the `# 0 - space +` part of a directive.
    #[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Flags: u8 {
        /// `#`: base prefixes, forced radix point, forced leading octal zero.
        const ALT = 0x01;
        /// `0`: pad the field with zeros instead of spaces.
        const ZERO_PAD = 0x02;
        /// `-`: pad on the right.
        const LEFT_ADJ = 0x04;
        /// ` `: a space where a `+` would go.
        const SPACE_SIGN = 0x08;
        /// `+`: always print a sign on signed conversions.
        const PLUS_SIGN = 0x10;
    }
}

bitflags! {
    /// Parser state carried along with the descriptor.
    #[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Status: u8 {
        const HAS_WIDTH = 0x01;
        const HAS_PRECISION = 0x02;
        const UPPERCASE = 0x04;
        const SIGNED = 0x08;
        const WIDTH_FROM_ARG = 0x10;
        const PRECISION_FROM_ARG = 0x20;
    }
}

/// The length modifier class of a directive.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LengthMod {
    #[default]
    None,
    /// `h`
    Half,
    /// `hh`
    HalfHalf,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `L`
    LongDouble,
    /// `j`
    IntMax,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
    /// `wN`, the width lives in [`FormatSpec::int_bits`].
    BitWidth,
    /// `wfN`
    FastBitWidth,
}

/// Which of the four float layouts a directive asks for.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum FloatForm {
    /// `f`/`F`
    Fixed,
    /// `e`/`E`
    Exponent,
    /// `g`/`G`
    General,
    /// `a`/`A`
    Hex,
}

/// The conversion-type class; exactly one per parsed directive.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Conversion {
    Int,
    Float(FloatForm),
    Char,
    Str,
    Pointer,
}

#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Radix {
    Binary = 2,
    Octal = 8,
    #[default]
    Decimal = 10,
    Hex = 16,
}

/// A parsed `%[flags][width][.precision][length]conversion` directive.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct FormatSpec {
    pub flags: Flags,
    pub status: Status,
    pub length: LengthMod,
    pub conversion: Conversion,
    pub radix: Radix,
    pub width: i32,
    pub precision: i32,
    /// Explicit `wN`/`wfN` bit width, 0 when none was given.
    pub int_bits: u32,
}

impl FormatSpec {
    pub const fn new(conversion: Conversion) -> FormatSpec {
        FormatSpec {
            flags: Flags::empty(),
            status: Status::empty(),
            length: LengthMod::None,
            conversion,
            radix: Radix::Decimal,
            width: 0,
            precision: 0,
            int_bits: 0,
        }
    }

    #[inline]
    pub fn has(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    #[inline]
    pub fn is(&self, status: Status) -> bool {
        self.status.contains(status)
    }

    #[inline]
    pub fn uppercase(&self) -> bool {
        self.is(Status::UPPERCASE)
    }

    /// The precision if one is in effect.
    #[inline]
    pub fn precision(&self) -> Option<i32> {
        if self.is(Status::HAS_PRECISION) {
            Some(self.precision)
        } else {
            None
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self.conversion, Conversion::Float(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.conversion, Conversion::Int | Conversion::Pointer)
    }

    /// `'-'`, `'+'`, `' '` or nothing for a value of the given sign.
    pub fn sign_char(&self, negative: bool) -> Option<u8> {
        if negative {
            Some(b'-')
        } else if self.has(Flags::PLUS_SIGN) {
            Some(b'+')
        } else if self.has(Flags::SPACE_SIGN) {
            Some(b' ')
        } else {
            None
        }
    }
}
