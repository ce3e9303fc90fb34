// Want this to be as large as the longest digit string any conversion produces,
// which is currently a 64-bit value rendered in binary for %b/%B.
pub(crate) const MAX_DIGITS_LEN: usize = 64;

// Sign, "0x", the leading digit and the radix point of an a-form float.
pub(crate) const MAX_PREFIX_LEN: usize = 5;

// "e" / "p", its sign and up to four exponent digits (-324..=308 for e-form,
// -1074..=1023 for a-form).
pub(crate) const MAX_SUFFIX_LEN: usize = 6;

/// Precision applied to `%s` when none is given.
pub const DEFAULT_STR_PRECISION: usize = 4095;

/// Ceiling applied to any float precision, whether literal or from `*`.
pub const MAX_FLOAT_PRECISION: i32 = 4096;

pub(crate) const DEFAULT_FLOAT_PRECISION: i32 = 6;

// (52 significand bits + 3) / 4
pub(crate) const HEX_SIGNIFICAND_DIGITS: i32 = 13;

pub(crate) const EINVAL: i32 = 22;
pub(crate) const ENOTSUP: i32 = 95;

pub(crate) const NAN: [&[u8]; 2] = [b"nan", b"NAN"];
pub(crate) const INFINITY: [&[u8]; 2] = [b"inf", b"INF"];
pub(crate) const NULL_STR: &[u8] = b"(null)";
pub(crate) const UNAVAILABLE: &[u8] = b"(n/a)";

pub(crate) const DIGIT_TABLE: &[u8] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";
