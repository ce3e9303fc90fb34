//! Radix digit generation.
//!
//! Digits come out least significant first, which is the order division
//! produces them in; the field formatter emits them reversed.

use arrayvec::ArrayVec;

use crate::constants::{DIGIT_TABLE, MAX_DIGITS_LEN};
use crate::format::Radix;

pub(crate) type Digits = ArrayVec<u8, MAX_DIGITS_LEN>;

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";
const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Appends the digits of `n` (at least one, so `0` gives `"0"`).
#[inline(never)]
pub(crate) fn write_reversed(n: u64, radix: Radix, uppercase: bool, out: &mut Digits) {
    match radix {
        Radix::Decimal => write_decimal_reversed(n, out),
        Radix::Hex => write_pow2_reversed(n, 4, uppercase, out),
        Radix::Octal => write_pow2_reversed(n, 3, false, out),
        Radix::Binary => write_pow2_reversed(n, 1, false, out),
    }
}

/// Appends exactly `count` hex digits of `n`, the low ones, zero-filled on
/// the high side.
pub(crate) fn write_hex_fixed_reversed(mut n: u64, count: usize, uppercase: bool, out: &mut Digits) {
    let table = if uppercase { UPPER_HEX } else { LOWER_HEX };
    for _ in 0..count {
        out.push(table[(n & 0xf) as usize]);
        n >>= 4;
    }
}

fn write_pow2_reversed(mut n: u64, shift: u32, uppercase: bool, out: &mut Digits) {
    let table = if uppercase { UPPER_HEX } else { LOWER_HEX };
    let mask = (1u64 << shift) - 1;
    loop {
        out.push(table[(n & mask) as usize]);
        n >>= shift;
        if n == 0 {
            break;
        }
    }
}

// Adaptation of the two-digits-per-lookup scheme of libcore's `fmt::num`,
// run back to front.
fn write_decimal_reversed(mut n: u64, out: &mut Digits) {
    let lut = DIGIT_TABLE;

    // eagerly decode 4 characters at a time
    while n >= 10000 {
        let rem = (n % 10000) as usize;
        n /= 10000;

        let d1 = (rem / 100) << 1;
        let d2 = (rem % 100) << 1;
        out.push(lut[d2 + 1]);
        out.push(lut[d2]);
        out.push(lut[d1 + 1]);
        out.push(lut[d1]);
    }

    // if we reach here numbers are <= 9999, so at most 4 chars long
    let mut n = n as usize;

    // decode 2 more chars, if > 2 chars
    if n >= 100 {
        let d1 = (n % 100) << 1;
        n /= 100;
        out.push(lut[d1 + 1]);
        out.push(lut[d1]);
    }

    // decode last 1 or 2 chars
    if n < 10 {
        out.push(b'0' + n as u8);
    } else {
        let d1 = n << 1;
        out.push(lut[d1 + 1]);
        out.push(lut[d1]);
    }
}
