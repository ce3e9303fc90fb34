//! Generates `rv-printf/src/ryu/d2s_small_table.rs`.
//!
//! Usage: `cargo run -p rv-printf-dev -- <output path>`, then run rustfmt on
//! the result. Paths are relative to `rv-printf/src`.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Error};
use num_bigint::BigUint;
use num_traits::{CheckedSub, One, ToPrimitive};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

const BITCOUNT: u64 = 125;
const TABLE_SIZE: u32 = 26;
// Largest i passed to compute_pow5 / compute_inv_pow5.
const MAX_POW5: u32 = 325;
const MAX_INV_POW5: u32 = 291;
// Stored inverse powers reach 5^364, as far as the full tables go.
const INV_SPLIT_LEN: u32 = 15;

const HEADER: &str = "\
// Generated by rv-printf-dev (`cargo run -p rv-printf-dev -- ryu/d2s_small_table.rs`,
// then rustfmt). Do not edit by hand.
";

fn main() -> Result<(), Error> {
    let path = match env::args().nth(1) {
        Some(path) => PathBuf::from("rv-printf/src").join(path),
        None => bail!("usage: rv-printf-dev <output path>"),
    };

    let tables = Tables::compute()?;
    let code = tables.render()?.to_string();
    fs::write(&path, format!("{}\n{}\n", HEADER, code))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

// Bit length of 5^e as the tables index it; exact for e > 0.
fn pow5bits(e: u32) -> u64 {
    ((e as u64 * 1217359) >> 19) + 1
}

fn pow5(e: u32) -> BigUint {
    BigUint::from(5u32).pow(e)
}

/// `5^e` scaled to its top 125 bits.
fn pow5_split(e: u32) -> BigUint {
    let p = pow5(e);
    let bits = p.bits();
    if bits < BITCOUNT {
        p << (BITCOUNT - bits)
    } else {
        p >> (bits - BITCOUNT)
    }
}

/// `2^(pow5bits(e) - 1 + 125) / 5^e + 1`
fn inv_pow5_split(e: u32) -> BigUint {
    let k = pow5bits(e) - 1 + BITCOUNT;
    (BigUint::one() << k) / pow5(e) + 1u32
}

fn to_pair(n: &BigUint) -> Result<(u64, u64), Error> {
    let mask = BigUint::from(u64::MAX);
    let low = (n & &mask).to_u64().context("low word")?;
    let high = (n >> 64u32).to_u64().context("value wider than 128 bits")?;
    Ok((low, high))
}

fn from_pair(pair: (u64, u64)) -> BigUint {
    (BigUint::from(pair.1) << 64u32) + pair.0
}

fn truncate128(n: BigUint) -> BigUint {
    n & ((BigUint::one() << 128u32) - 1u32)
}

struct Tables {
    pow5: Vec<u64>,
    split: Vec<(u64, u64)>,
    inv_split: Vec<(u64, u64)>,
    offsets: Vec<u32>,
    inv_offsets: Vec<u32>,
}

impl Tables {
    fn compute() -> Result<Tables, Error> {
        let pow5 = (0..TABLE_SIZE)
            .map(|i| pow5(i).to_u64().context("5^i overflows u64"))
            .collect::<Result<Vec<_>, _>>()?;
        let split = (0..=MAX_POW5 / TABLE_SIZE)
            .map(|b| to_pair(&pow5_split(b * TABLE_SIZE)))
            .collect::<Result<Vec<_>, _>>()?;
        let inv_split = (0..INV_SPLIT_LEN)
            .map(|b| to_pair(&inv_pow5_split(b * TABLE_SIZE)))
            .collect::<Result<Vec<_>, _>>()?;

        // The 2-bit corrections between the exact value and what one
        // 64x128-bit multiply from the nearest stored power produces.
        let mut offsets = vec![0u32; (MAX_POW5 / 16 + 1) as usize];
        for i in 0..=MAX_POW5 {
            let base = i / TABLE_SIZE;
            let offset = i - base * TABLE_SIZE;
            if offset == 0 {
                continue;
            }
            let delta = pow5bits(i) - pow5bits(base * TABLE_SIZE);
            let approx = truncate128((from_pair(split[base as usize]) * pow5[offset as usize]) >> delta);
            let correction = pow5_split(i).checked_sub(&approx).context("negative correction")?;
            offsets[(i / 16) as usize] |= packed(&correction, i)?;
        }

        let mut inv_offsets = vec![0u32; (MAX_INV_POW5 / 16 + 1) as usize];
        for i in 0..=MAX_INV_POW5 {
            let base = (i + TABLE_SIZE - 1) / TABLE_SIZE;
            let offset = base * TABLE_SIZE - i;
            if offset == 0 {
                continue;
            }
            let delta = pow5bits(base * TABLE_SIZE) - pow5bits(i);
            let mul = from_pair(inv_split[base as usize]) - 1u32;
            let approx = truncate128(((mul * pow5[offset as usize]) >> delta) + 1u32);
            let correction = inv_pow5_split(i)
                .checked_sub(&approx)
                .context("negative correction")?;
            inv_offsets[(i / 16) as usize] |= packed(&correction, i)?;
        }

        Ok(Tables {
            pow5,
            split,
            inv_split,
            offsets,
            inv_offsets,
        })
    }

    fn render(&self) -> Result<TokenStream, Error> {
        let table_size = Literal::usize_unsuffixed(TABLE_SIZE as usize);
        let bitcount = Literal::i32_unsuffixed(BITCOUNT as i32);
        let pow5 = self.pow5.iter().map(|&p| Literal::u64_unsuffixed(p));
        let split = pairs(&self.split);
        let inv_split = pairs(&self.inv_split);
        let offsets = self.offsets.iter().map(|&o| hex(o)).collect::<Result<Vec<_>, _>>()?;
        let inv_offsets = self
            .inv_offsets
            .iter()
            .map(|&o| hex(o))
            .collect::<Result<Vec<_>, _>>()?;
        let split_len = Literal::usize_unsuffixed(self.split.len());
        let inv_split_len = Literal::usize_unsuffixed(self.inv_split.len());
        let offsets_len = Literal::usize_unsuffixed(self.offsets.len());
        let inv_offsets_len = Literal::usize_unsuffixed(self.inv_offsets.len());

        Ok(quote! {
            pub const DOUBLE_POW5_INV_BITCOUNT: i32 = #bitcount;
            pub const DOUBLE_POW5_BITCOUNT: i32 = #bitcount;

            pub const POW5_TABLE_SIZE: usize = #table_size;

            pub static DOUBLE_POW5_TABLE: [u64; POW5_TABLE_SIZE] = [#(#pow5),*];

            pub static DOUBLE_POW5_INV_SPLIT2: [(u64, u64); #inv_split_len] = [#(#inv_split),*];

            pub static POW5_INV_OFFSETS: [u32; #inv_offsets_len] = [#(#inv_offsets),*];

            pub static DOUBLE_POW5_SPLIT2: [(u64, u64); #split_len] = [#(#split),*];

            pub static POW5_OFFSETS: [u32; #offsets_len] = [#(#offsets),*];
        })
    }
}

fn packed(correction: &BigUint, i: u32) -> Result<u32, Error> {
    let c = correction.to_u32().context("correction overflows u32")?;
    ensure!(c < 4, "correction {} for 5^{} does not fit in 2 bits", c, i);
    Ok(c << ((i % 16) * 2))
}

fn pairs(values: &[(u64, u64)]) -> Vec<TokenStream> {
    values
        .iter()
        .map(|&(low, high)| {
            let low = Literal::u64_unsuffixed(low);
            let high = Literal::u64_unsuffixed(high);
            quote!((#low, #high))
        })
        .collect()
}

fn hex(value: u32) -> Result<Literal, Error> {
    format!("{:#010x}", value)
        .parse::<Literal>()
        .map_err(|e| anyhow::anyhow!("bad literal for {:#x}: {}", value, e))
}
