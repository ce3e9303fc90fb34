use num_bigint::BigUint;
use rand::Rng;
use rv_printf::ryu::{self, tables, FloatClass, FloatIeeeData64, FloatingDecimal64};

fn parse(mantissa: u64, exponent: i32) -> f64 {
    format!("{}e{}", mantissa, exponent).parse().unwrap()
}

fn check(f: f64) {
    let d = ryu::shortest(f).unwrap();
    assert_eq!(f.abs(), parse(d.mantissa, d.exponent), "{:?}", f);
    if d.mantissa >= 10 {
        assert_ne!(0, d.mantissa % 10, "{:?} has trailing zeros", f);
        // Neither neighbour with one digit less parses back.
        let floor = d.mantissa / 10;
        assert_ne!(f.abs(), parse(floor, d.exponent + 1), "{:?}", f);
        assert_ne!(f.abs(), parse(floor + 1, d.exponent + 1), "{:?}", f);
    }
}

#[test]
fn test_known_values() {
    let test_cases: &[(f64, u64, i32)] = &[
        (1.0, 1, 0),
        (0.3, 3, -1),
        (1.25, 125, -2),
        (123456.0, 123456, 0),
        (1e23, 1, 23),
        (5e-324, 5, -324),
        (f64::MAX, 17976931348623157, 292),
        (f64::MIN_POSITIVE, 22250738585072014, -324),
        (f64::from_bits(0x4830F0CF064DD592), 5764607523034235, 24),
    ];
    for &(f, mantissa, exponent) in test_cases {
        assert_eq!(Some(FloatingDecimal64 { mantissa, exponent }), ryu::shortest(f));
    }
}

#[test]
fn test_non_finite_and_zero() {
    assert_eq!(None, ryu::shortest(0.0));
    assert_eq!(None, ryu::shortest(-0.0));
    assert_eq!(None, ryu::shortest(f64::INFINITY));
    assert_eq!(None, ryu::shortest(f64::NAN));
    assert_eq!(FloatClass::Subnormal, FloatIeeeData64::from(5e-324).class());
    assert!(FloatIeeeData64::from(-1.0).is_negative);
}

#[test]
fn test_random_bits_round_trip() {
    let mut rng = rand::thread_rng();
    let mut checked = 0;
    while checked < 50_000 {
        let f = f64::from_bits(rng.gen());
        if !f.is_finite() || f == 0.0 {
            continue;
        }
        check(f);
        checked += 1;
    }
}

#[test]
fn test_random_integers_round_trip() {
    let mut rng = rand::thread_rng();
    for _ in 0..20_000 {
        let n: u64 = rng.gen_range(1..1u64 << 53);
        check(n as f64);
    }
}

fn bits(n: &BigUint) -> i64 {
    n.bits() as i64
}

fn split(pair: (u64, u64)) -> BigUint {
    (BigUint::from(pair.1) << 64u32) + BigUint::from(pair.0)
}

// Bit length of 5^e, the way the tables index it.
fn pow5bits(e: u32) -> i64 {
    (((e as u64 * 1217359) >> 19) + 1) as i64
}

#[test]
fn test_tables_against_big_integers() {
    let five = BigUint::from(5u32);

    for (i, &p) in tables::DOUBLE_POW5_TABLE.iter().enumerate() {
        assert_eq!(five.pow(i as u32), BigUint::from(p));
    }

    for (i, &pair) in tables::DOUBLE_POW5_SPLIT2.iter().enumerate() {
        let pow5 = five.pow(26 * i as u32);
        let shift = bits(&pow5) - 125;
        let expected = if shift < 0 {
            pow5 << (-shift) as u32
        } else {
            pow5 >> shift as u32
        };
        assert_eq!(expected, split(pair), "DOUBLE_POW5_SPLIT2[{}]", i);
    }

    for (i, &pair) in tables::DOUBLE_POW5_INV_SPLIT2.iter().enumerate() {
        let e = 26 * i as u32;
        let pow5 = five.pow(e);
        let k = (pow5bits(e) - 1 + 125) as u32;
        let expected = (BigUint::from(1u32) << k) / pow5 + 1u32;
        assert_eq!(expected, split(pair), "DOUBLE_POW5_INV_SPLIT2[{}]", i);
    }
}
