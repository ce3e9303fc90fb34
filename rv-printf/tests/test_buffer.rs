mod common;

use rv_printf::{args, snprintf, sprintf, vsnprintf, ArgList};

#[cfg(feature = "float")]
#[test]
fn test_truncation_contract() {
    use rand::Rng;
    use rv_printf::Arg;

    use crate::common::format;

    let mut rng = rand::thread_rng();
    let cases: &[(&str, &[Arg<'_>])] = &[
        ("%s-%d", args!["truncate me", -12345]),
        ("%08.3f|%-6x|%c", args![3.14159, 0xbeef, 'z']),
        ("%g %e", args![1e-7, 6.02e23]),
        ("plain text only", args![]),
    ];
    for &(fmt, args) in cases {
        let full = format(fmt, args);
        for _ in 0..64 {
            let cap = rng.gen_range(0..full.len() + 4);
            let mut buf = vec![0xaau8; cap];
            let n = snprintf(&mut buf, fmt, args).unwrap();
            assert_eq!(full.len(), n);
            if cap == 0 {
                continue;
            }
            let stored = n.min(cap - 1);
            assert_eq!(full.as_bytes()[..stored], buf[..stored]);
            assert_eq!(0, buf[stored]);
            assert!(buf[stored + 1..].iter().all(|&b| b == 0xaa));
        }
    }
}

#[cfg(feature = "float")]
#[test]
fn test_exact_fit() {
    let mut buf = [0xffu8; 6];
    assert_eq!(Ok(5), snprintf(&mut buf, "%05d", args![7]));
    assert_eq!(b"00007\0", &buf);

    let mut buf = [0xffu8; 5];
    assert_eq!(Ok(5), snprintf(&mut buf, "%05d", args![7]));
    assert_eq!(b"0000\0", &buf);
}

#[test]
fn test_empty_buffer_counts() {
    let mut buf = [0u8; 0];
    assert_eq!(Ok(11), snprintf(&mut buf, "hello %s", args!["world"]));
}

#[test]
fn test_error_still_terminates() {
    let mut buf = [0xffu8; 8];
    assert!(snprintf(&mut buf, "ab%y", args![]).is_err());
    assert_eq!(b"ab\0", &buf[..3]);
}

#[test]
fn test_sprintf_uses_whole_buffer() {
    let mut a = [0u8; 16];
    let mut b = [0u8; 16];
    let n = sprintf(&mut a, "%x:%s", args![48879, "ok"]).unwrap();
    let m = vsnprintf(&mut b, "%x:%s", ArgList::new(args![48879, "ok"])).unwrap();
    assert_eq!(n, m);
    assert_eq!(a, b);
    assert_eq!(b"beef:ok\0", &a[..8]);
}
