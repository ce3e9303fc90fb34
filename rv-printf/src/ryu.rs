//! Binary64 to shortest round-trip decimal.
//!
//! This is Ryū using the compact ("small") tables: every 26th power of five
//! is stored at full 125-bit precision and the powers in between are rebuilt
//! with one 64x128-bit multiply plus a 2-bit correction.

mod common;
mod d2s;
mod d2s_intrinsics;
mod d2s_small_table;
pub(crate) mod float;

pub use crate::ryu::d2s::{d2d, FloatingDecimal64, DOUBLE_EXPONENT_BITS, DOUBLE_MANTISSA_BITS};
pub use crate::ryu::float::{FloatClass, FloatIeeeData64};

/// Shortest round-trip decimal of `f`, or `None` for zero, infinities and
/// NaNs.
///
/// ```
/// let d = rv_printf::ryu::shortest(1.25).unwrap();
/// assert_eq!((125, -2), (d.mantissa, d.exponent));
/// assert!(rv_printf::ryu::shortest(f64::NAN).is_none());
/// ```
pub fn shortest(f: f64) -> Option<FloatingDecimal64> {
    FloatIeeeData64::from(f).shortest()
}

/// The compact tables, exposed for `rv-printf-dev` and the table tests.
#[doc(hidden)]
pub mod tables {
    pub use crate::ryu::d2s_small_table::{
        DOUBLE_POW5_INV_SPLIT2, DOUBLE_POW5_SPLIT2, DOUBLE_POW5_TABLE, POW5_INV_OFFSETS,
        POW5_OFFSETS,
    };
}
