use crate::ryu::d2s::{d2d, FloatingDecimal64, DOUBLE_EXPONENT_BITS, DOUBLE_MANTISSA_BITS};

const MANTISSA_MASK: u64 = (1u64 << DOUBLE_MANTISSA_BITS) - 1;
const EXPONENT_MASK: u32 = (1u32 << DOUBLE_EXPONENT_BITS) - 1;

/// What a binary64 bit pattern encodes, as far as rendering cares.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FloatClass {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

/// The three IEEE-754 fields of a binary64, unpacked.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FloatIeeeData64 {
    pub is_negative: bool,
    pub mantissa: u64, // 52 bit significand field
    pub exponent: u32, // 11 bit biased exponent
}

impl FloatIeeeData64 {
    /// Splits a raw bit pattern; no classification or normalization.
    #[inline(never)]
    pub fn parse_ieee_data(bits: u64) -> FloatIeeeData64 {
        FloatIeeeData64 {
            is_negative: (bits >> (DOUBLE_MANTISSA_BITS + DOUBLE_EXPONENT_BITS)) & 1 != 0,
            mantissa: bits & MANTISSA_MASK,
            exponent: (bits >> DOUBLE_MANTISSA_BITS) as u32 & EXPONENT_MASK,
        }
    }

    pub fn class(&self) -> FloatClass {
        match (self.exponent, self.mantissa) {
            (0, 0) => FloatClass::Zero,
            (0, _) => FloatClass::Subnormal,
            (EXPONENT_MASK, 0) => FloatClass::Infinite,
            (EXPONENT_MASK, _) => FloatClass::Nan,
            _ => FloatClass::Normal,
        }
    }

    /// Shortest round-trip decimal, `None` for zero, infinities and NaNs.
    pub fn shortest(&self) -> Option<FloatingDecimal64> {
        match self.class() {
            FloatClass::Normal | FloatClass::Subnormal => Some(d2d(self.mantissa, self.exponent)),
            FloatClass::Zero | FloatClass::Infinite | FloatClass::Nan => None,
        }
    }

    /// Significand with the hidden bit restored and the matching unbiased
    /// binary exponent, so that the value is `significand * 2^(exp - 52)`.
    ///
    /// Subnormals are shifted up until bit 52 is set and their exponent is
    /// lowered accordingly, giving every finite non-zero value the
    /// `1.xxx * 2^exp` shape a-form prints.
    pub fn normalized(&self) -> (u64, i32) {
        if self.exponent == 0 {
            let shift = self.mantissa.leading_zeros() as i32 - (63 - DOUBLE_MANTISSA_BITS as i32);
            (self.mantissa << shift, -1022 - shift)
        } else {
            (
                (1u64 << DOUBLE_MANTISSA_BITS) | self.mantissa,
                self.exponent as i32 - 1023,
            )
        }
    }
}

impl From<f64> for FloatIeeeData64 {
    fn from(f: f64) -> FloatIeeeData64 {
        FloatIeeeData64::parse_ieee_data(f.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class() {
        assert_eq!(FloatClass::Zero, FloatIeeeData64::from(0.0).class());
        assert_eq!(FloatClass::Zero, FloatIeeeData64::from(-0.0).class());
        assert_eq!(FloatClass::Subnormal, FloatIeeeData64::parse_ieee_data(1).class());
        assert_eq!(FloatClass::Normal, FloatIeeeData64::from(1.5).class());
        assert_eq!(FloatClass::Infinite, FloatIeeeData64::from(f64::NEG_INFINITY).class());
        assert_eq!(
            FloatClass::Nan,
            FloatIeeeData64::parse_ieee_data(0x7FF8000000000000).class()
        );
        assert!(FloatIeeeData64::from(-0.0).is_negative);
        assert!(FloatIeeeData64::from(0.0).shortest().is_none());
    }

    #[test]
    fn test_normalized() {
        assert_eq!((1 << 52, 0), FloatIeeeData64::from(1.0).normalized());
        assert_eq!((3 << 51, 1), FloatIeeeData64::from(3.0).normalized());
        assert_eq!((1 << 52, -1074), FloatIeeeData64::parse_ieee_data(1).normalized());
        assert_eq!(
            (1 << 52, -1022),
            FloatIeeeData64::from(f64::MIN_POSITIVE).normalized()
        );
    }
}
