#![allow(dead_code)]

use rv_printf::{snprintf, vformat, Arg, ArgList, BufferSink, Error, StubRenderer};

/// Runs `snprintf` into a buffer large enough for any test output.
pub fn format(fmt: &str, args: &[Arg<'_>]) -> String {
    let mut buf = vec![0u8; 8192];
    let n = snprintf(&mut buf, fmt, args).unwrap();
    assert!(n < buf.len());
    assert_eq!(0, buf[n]);
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

/// The error a format fails with.
pub fn format_err(fmt: &str, args: &[Arg<'_>]) -> Error {
    let mut buf = [0u8; 256];
    snprintf(&mut buf, fmt, args).unwrap_err()
}

/// Formats through the float-free renderer.
pub fn format_stub(fmt: &str, args: &[Arg<'_>]) -> String {
    let mut buf = vec![0u8; 1024];
    let mut sink = BufferSink::new(&mut buf);
    let _ = vformat::<StubRenderer, _>(&mut sink, fmt.as_bytes(), ArgList::new(args)).unwrap();
    let n = sink.finish();
    String::from_utf8(buf[..n].to_vec()).unwrap()
}
