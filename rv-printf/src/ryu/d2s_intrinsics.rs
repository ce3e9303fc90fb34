//! The 128-bit arithmetic the shortest-decimal search rests on.
//!
//! Every product here is computed in native `u128`; a wrong width in any of
//! these silently corrupts the rounding of the final digit, so nothing else
//! in the crate multiplies against the power-of-5 tables directly.

use crate::ryu::common::pow5bits;
use crate::ryu::d2s_small_table::{
    DOUBLE_POW5_INV_SPLIT2, DOUBLE_POW5_SPLIT2, DOUBLE_POW5_TABLE, POW5_INV_OFFSETS,
    POW5_OFFSETS, POW5_TABLE_SIZE,
};

#[cfg(feature = "no-panic")]
use no_panic::no_panic;

#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn div5(x: u64) -> u64 {
    x / 5
}

#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn div10(x: u64) -> u64 {
    x / 10
}

#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn div100(x: u64) -> u64 {
    x / 100
}

#[cfg_attr(feature = "no-panic", inline)]
fn pow5_factor(mut value: u64) -> u32 {
    // 5 * M_INV_5 == 1 (mod 2^64), and N_DIV_5 is the largest multiple of 5
    // representable: multiplying by the inverse stays below it exactly while
    // the value is still divisible by 5.
    const M_INV_5: u64 = 14757395258967641293;
    const N_DIV_5: u64 = 3689348814741910323;
    let mut count = 0u32;
    loop {
        debug_assert!(value != 0);
        value = value.wrapping_mul(M_INV_5);
        if value > N_DIV_5 {
            break;
        }
        count += 1;
    }
    count
}

// Returns true if value is divisible by 5^p.
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn multiple_of_power_of_5(value: u64, p: u32) -> bool {
    pow5_factor(value) >= p
}

// Returns true if value is divisible by 2^p.
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    debug_assert!(value != 0);
    debug_assert!(p < 64);
    (value & ((1u64 << p) - 1)) == 0
}

/// `(m * mul) >> j` keeping only the low 64 bits of the result.
///
/// `m` carries at most 55 significant bits and the table entries at most
/// 124, and callers always pass `j >= 115`, so the shifted product fits.
#[cfg_attr(feature = "no-panic", no_panic)]
#[inline]
pub(crate) fn mul_shift_64(m: u64, mul: &(u64, u64), j: u32) -> u64 {
    debug_assert!(j > 64);
    let b0 = m as u128 * mul.0 as u128;
    let b2 = m as u128 * mul.1 as u128;
    (((b0 >> 64) + b2) >> (j - 64)) as u64
}

/// The three scaled halfway points `(mv, mv + 2, mv - 1 - mm_shift)`
/// multiplied by the same table entry, in that order.
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn mul_shift_all_64(
    m: u64,
    mul: &(u64, u64),
    j: u32,
    mm_shift: u32,
) -> (u64, u64, u64) {
    let vr = mul_shift_64(4 * m, mul, j);
    let vp = mul_shift_64(4 * m + 2, mul, j);
    let vm = mul_shift_64(4 * m - 1 - mm_shift as u64, mul, j);
    (vr, vp, vm)
}

/// `5^i` scaled to its top 125 bits, rebuilt from every 26th power in the
/// small table plus a 2-bit correction.
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn compute_pow5(i: u32) -> (u64, u64) {
    let base = i / POW5_TABLE_SIZE as u32;
    let base2 = base * POW5_TABLE_SIZE as u32;
    let offset = i - base2;
    debug_assert!(base < DOUBLE_POW5_SPLIT2.len() as u32);
    let mul = DOUBLE_POW5_SPLIT2[base as usize];
    if offset == 0 {
        return mul;
    }
    debug_assert!(offset < POW5_TABLE_SIZE as u32);
    let m = DOUBLE_POW5_TABLE[offset as usize];
    let b0 = m as u128 * mul.0 as u128;
    let b2 = m as u128 * mul.1 as u128;
    let delta = pow5bits(i as i32) - pow5bits(base2 as i32);
    debug_assert!(i / 16 < POW5_OFFSETS.len() as u32);
    let shifted_sum = (b0 >> delta)
        + (b2 << (64 - delta))
        + ((POW5_OFFSETS[(i / 16) as usize] >> ((i % 16) << 1)) & 3) as u128;
    (shifted_sum as u64, (shifted_sum >> 64) as u64)
}

/// `2^k / 5^i + 1` for the matching 125-bit `k`, rebuilt the same way as
/// [`compute_pow5`].
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn compute_inv_pow5(i: u32) -> (u64, u64) {
    let base = (i + POW5_TABLE_SIZE as u32 - 1) / POW5_TABLE_SIZE as u32;
    let base2 = base * POW5_TABLE_SIZE as u32;
    let offset = base2 - i;
    debug_assert!(base < DOUBLE_POW5_INV_SPLIT2.len() as u32);
    let mul = DOUBLE_POW5_INV_SPLIT2[base as usize]; // 1/5^base2
    if offset == 0 {
        return mul;
    }
    debug_assert!(offset < POW5_TABLE_SIZE as u32);
    let m = DOUBLE_POW5_TABLE[offset as usize]; // 5^offset
    let b0 = m as u128 * (mul.0 - 1) as u128;
    let b2 = m as u128 * mul.1 as u128; // 1/5^base2 * 5^offset = 1/5^(base2-offset) = 1/5^i
    let delta = pow5bits(base2 as i32) - pow5bits(i as i32);
    debug_assert!(i / 16 < POW5_INV_OFFSETS.len() as u32);
    let shifted_sum = ((b0 >> delta) + (b2 << (64 - delta)))
        + 1
        + ((POW5_INV_OFFSETS[(i / 16) as usize] >> ((i % 16) << 1)) & 3) as u128;
    (shifted_sum as u64, (shifted_sum >> 64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_shift_64() {
        // 2^124 * 3 >> 124 == 3
        assert_eq!(3, mul_shift_64(3, &(0, 1 << 60), 124));
        // Low limb carries into the high half before the shift.
        assert_eq!(1, mul_shift_64(4, &(1 << 63, 0), 65));
        assert_eq!(
            (u64::MAX as u128 * (1u128 << 63) >> 70) as u64,
            mul_shift_64(u64::MAX, &(1 << 63, 0), 70)
        );
    }

    #[test]
    fn test_multiple_of_power_of_5() {
        assert!(multiple_of_power_of_5(1, 0));
        assert!(!multiple_of_power_of_5(1, 1));
        assert!(multiple_of_power_of_5(5, 1));
        assert!(multiple_of_power_of_5(25, 2));
        assert!(multiple_of_power_of_5(75, 2));
        assert!(multiple_of_power_of_5(50, 2));
        assert!(!multiple_of_power_of_5(51, 2));
        assert!(!multiple_of_power_of_5(75, 4));
        assert!(multiple_of_power_of_5(298023223876953125, 25));
    }

    #[test]
    fn test_multiple_of_power_of_2() {
        assert!(multiple_of_power_of_2(1, 0));
        assert!(!multiple_of_power_of_2(1, 1));
        assert!(multiple_of_power_of_2(2, 1));
        assert!(multiple_of_power_of_2(4, 2));
        assert!(multiple_of_power_of_2(8, 2));
        assert!(multiple_of_power_of_2(12, 2));
        assert!(!multiple_of_power_of_2(13, 2));
        assert!(!multiple_of_power_of_2(8, 4));
    }

    #[test]
    fn test_compute_pow5_table_anchors() {
        assert_eq!((0, 1152921504606846976), compute_pow5(0));
        assert_eq!((0, 1490116119384765625), compute_pow5(26));
        // 5^1 scaled to 125 bits is 5 << 122.
        assert_eq!((0, 5 << 58), compute_pow5(1));
    }

    #[test]
    fn test_compute_inv_pow5_table_anchors() {
        assert_eq!((1, 2305843009213693952), compute_inv_pow5(0));
        assert_eq!(
            (5955668970331000884, 1784059615882449851),
            compute_inv_pow5(26)
        );
    }
}
