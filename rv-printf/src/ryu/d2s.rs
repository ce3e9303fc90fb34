use crate::ryu::common::{decimal_length17, log10_pow2, log10_pow5, pow5bits};
use crate::ryu::d2s_intrinsics::{
    compute_inv_pow5, compute_pow5, div10, div100, div5, mul_shift_all_64,
    multiple_of_power_of_2, multiple_of_power_of_5,
};
use crate::ryu::d2s_small_table::{DOUBLE_POW5_BITCOUNT, DOUBLE_POW5_INV_BITCOUNT};

#[cfg(feature = "no-panic")]
use no_panic::no_panic;

pub const DOUBLE_MANTISSA_BITS: u32 = 52;
pub const DOUBLE_EXPONENT_BITS: u32 = 11;
const DOUBLE_BIAS: i32 = 1023;

// 10^0 ..= 10^17
const POW10: [u64; 18] = [
    1,
    10,
    100,
    1000,
    10000,
    100000,
    1000000,
    10000000,
    100000000,
    1000000000,
    10000000000,
    100000000000,
    1000000000000,
    10000000000000,
    100000000000000,
    1000000000000000,
    10000000000000000,
    100000000000000000,
];

/// A decimal value `mantissa * 10^exponent`.
///
/// Out of [`d2d`] the mantissa is the shortest digit string that parses back
/// to the original binary64, so it never carries more than 17 digits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FloatingDecimal64 {
    pub mantissa: u64,
    pub exponent: i32,
}

impl FloatingDecimal64 {
    /// Number of decimal digits in the mantissa (1 for a zero mantissa).
    #[inline]
    pub fn digit_count(&self) -> i32 {
        decimal_length17(self.mantissa) as i32
    }

    /// Keeps the `keep` most significant digits, rounding the dropped tail
    /// half-to-even.
    ///
    /// A carry out of the kept digits (`996` to two digits) moves into the
    /// exponent (`10e2`), so the result never has more than `keep` digits.
    /// `keep == 0` collapses the value to 0 or 1 unit of the first dropped
    /// position and a negative `keep` to 0. Values that already fit are
    /// returned as is.
    #[must_use]
    pub fn round_to(self, keep: i32) -> FloatingDecimal64 {
        let count = self.digit_count();
        if keep >= count {
            return self;
        }
        if keep < 0 {
            return FloatingDecimal64 {
                mantissa: 0,
                exponent: self.exponent + count,
            };
        }
        let drop = (count - keep) as usize;
        let divisor = POW10[drop];
        let half = divisor / 2;
        let mut mantissa = self.mantissa / divisor;
        let rest = self.mantissa % divisor;
        let mut exponent = self.exponent + drop as i32;
        if rest > half || (rest == half && mantissa % 2 == 1) {
            mantissa += 1;
            if keep > 0 && mantissa == POW10[keep as usize] {
                mantissa /= 10;
                exponent += 1;
            }
        }
        FloatingDecimal64 { mantissa, exponent }
    }
}

// Integers in [1, 2^53) are their own shortest representation; only the
// trailing decimal zeros need to move into the exponent.
#[inline]
fn d2d_small_int(ieee_mantissa: u64, ieee_exponent: u32) -> Option<FloatingDecimal64> {
    let m2 = (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa;
    let e2 = ieee_exponent as i32 - (DOUBLE_BIAS + DOUBLE_MANTISSA_BITS as i32);

    if e2 > 0 || e2 < -(DOUBLE_MANTISSA_BITS as i32) {
        return None;
    }

    let mask = (1u64 << -e2) - 1;
    if m2 & mask != 0 {
        return None;
    }

    let mut v = FloatingDecimal64 {
        mantissa: m2 >> -e2,
        exponent: 0,
    };
    loop {
        let q = div10(v.mantissa);
        if v.mantissa - 10 * q != 0 {
            break;
        }
        v.mantissa = q;
        v.exponent += 1;
    }
    Some(v)
}

/// Shortest round-trip decimal of a finite, non-zero binary64 given as its
/// raw 52-bit significand field and 11-bit biased exponent.
///
/// Zero, infinities and NaNs must be filtered out by the caller; they have
/// no meaningful shortest decimal and produce an unspecified result.
#[cfg_attr(feature = "no-panic", inline)]
pub fn d2d(ieee_mantissa: u64, ieee_exponent: u32) -> FloatingDecimal64 {
    match d2d_small_int(ieee_mantissa, ieee_exponent) {
        Some(v) => v,
        None => d2d_general(ieee_mantissa, ieee_exponent),
    }
}

#[cfg_attr(feature = "no-panic", no_panic)]
fn d2d_general(ieee_mantissa: u64, ieee_exponent: u32) -> FloatingDecimal64 {
    let (e2, m2) = if ieee_exponent == 0 {
        (
            // We subtract 2 so that the bounds computation has 2 additional bits.
            1 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2,
            ieee_mantissa,
        )
    } else {
        (
            ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2,
            (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa,
        )
    };
    let even = (m2 & 1) == 0;
    let accept_bounds = even;

    // Step 2: Determine the interval of valid decimal representations.
    let mv = 4 * m2;
    // Implicit bool -> int conversion. True is 1, false is 0.
    let mm_shift = (ieee_mantissa != 0 || ieee_exponent <= 1) as u32;
    // The bounds are mv + 2 and mv - 1 - mm_shift, scaled in step 3.

    // Step 3: Convert to a decimal power base using 128-bit arithmetic.
    let mut vr: u64;
    let mut vp: u64;
    let mut vm: u64;
    let e10: i32;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    if e2 >= 0 {
        // This expression is slightly faster than max(0, log10_pow2(e2) - 1).
        let q = log10_pow2(e2) - (e2 > 3) as u32;
        e10 = q as i32;
        let k = DOUBLE_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
        let i = -e2 + q as i32 + k;
        (vr, vp, vm) = mul_shift_all_64(m2, &compute_inv_pow5(q), i as u32, mm_shift);
        if q <= 21 {
            // Only one of mp, mv, and mm can be a multiple of 5, if any.
            let mv_mod5 = (mv - 5 * div5(mv)) as u32;
            if mv_mod5 == 0 {
                vr_is_trailing_zeros = multiple_of_power_of_5(mv, q);
            } else if accept_bounds {
                // Same as min(e2 + (~mm & 1), pow5_factor(mm)) >= q
                // <=> e2 + (~mm & 1) >= q && pow5_factor(mm) >= q
                // <=> true && pow5_factor(mm) >= q, since e2 >= q.
                vm_is_trailing_zeros = multiple_of_power_of_5(mv - 1 - mm_shift as u64, q);
            } else {
                // Same as min(e2 + 1, pow5_factor(mp)) >= q.
                vp -= multiple_of_power_of_5(mv + 2, q) as u64;
            }
        }
    } else {
        // This expression is slightly faster than max(0, log10_pow5(-e2) - 1).
        let q = log10_pow5(-e2) - (-e2 > 1) as u32;
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5bits(i) - DOUBLE_POW5_BITCOUNT;
        let j = q as i32 - k;
        (vr, vp, vm) = mul_shift_all_64(m2, &compute_pow5(i as u32), j as u32, mm_shift);
        if q <= 1 {
            // {vr,vp,vm} is trailing zeros if {mv,mp,mm} has at least q
            // trailing 0 bits. mv = 4 * m2, so it always has at least two
            // trailing 0 bits.
            vr_is_trailing_zeros = true;
            if accept_bounds {
                // mm = mv - 1 - mm_shift, so it has 1 trailing 0 bit iff
                // mm_shift == 1.
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                // mp = mv + 2, so it always has at least one trailing 0 bit.
                vp -= 1;
            }
        } else if q < 63 {
            // We want to know if the full product has at least q trailing
            // zeros. We need to compute min(p2(mv), p5(mv) - e2) >= q,
            // i.e. p2(mv) >= q (because -e2 >= q).
            vr_is_trailing_zeros = multiple_of_power_of_2(mv, q);
        }
    }

    // Step 4: Find the shortest decimal representation in the interval of
    // valid representations.
    let mut removed = 0i32;
    let mut last_removed_digit = 0u8;
    let output = if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // General case, which happens rarely (~0.7%).
        loop {
            let vp_div10 = div10(vp);
            let vm_div10 = div10(vm);
            if vp_div10 <= vm_div10 {
                break;
            }
            let vm_mod10 = (vm - 10 * vm_div10) as u32;
            let vr_div10 = div10(vr);
            let vr_mod10 = (vr - 10 * vr_div10) as u32;
            vm_is_trailing_zeros &= vm_mod10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = vr_mod10 as u8;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            loop {
                let vm_div10 = div10(vm);
                let vm_mod10 = (vm - 10 * vm_div10) as u32;
                if vm_mod10 != 0 {
                    break;
                }
                let vp_div10 = div10(vp);
                let vr_div10 = div10(vr);
                let vr_mod10 = (vr - 10 * vr_div10) as u32;
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = vr_mod10 as u8;
                vr = vr_div10;
                vp = vp_div10;
                vm = vm_div10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Round even if the exact number is .....50..0.
            last_removed_digit = 4;
        }
        // We need to take vr + 1 if vr is outside bounds or we need to round up.
        vr + ((vr == vm && (!accept_bounds || !vm_is_trailing_zeros)) || last_removed_digit >= 5)
            as u64
    } else {
        // Specialized for the common case (~99.3%). Percentages below are
        // relative to this.
        let mut round_up = false;
        let vp_div100 = div100(vp);
        let vm_div100 = div100(vm);
        // Optimization: remove two digits at a time (~86.2%).
        if vp_div100 > vm_div100 {
            let vr_div100 = div100(vr);
            let vr_mod100 = (vr - 100 * vr_div100) as u32;
            round_up = vr_mod100 >= 50;
            vr = vr_div100;
            vp = vp_div100;
            vm = vm_div100;
            removed += 2;
        }
        // Loop iterations below (approximately), without optimization
        // above: 0: 0.03%, 1: 13.8%, 2: 70.6%, 3: 14.0%, 4: 1.40%, 5: 0.14%,
        // 6+: 0.02%. With the optimization: 0: 70.6%, 1: 27.8%, 2: 1.40%,
        // 3: 0.14%, 4+: 0.02%.
        loop {
            let vp_div10 = div10(vp);
            let vm_div10 = div10(vm);
            if vp_div10 <= vm_div10 {
                break;
            }
            let vr_div10 = div10(vr);
            let vr_mod10 = (vr - 10 * vr_div10) as u32;
            round_up = vr_mod10 >= 5;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        // We need to take vr + 1 if vr is outside bounds or we need to round up.
        vr + (vr == vm || round_up) as u64
    };
    let exp = e10 + removed;

    FloatingDecimal64 {
        exponent: exp,
        mantissa: output,
    }
}
