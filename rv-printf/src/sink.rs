use tracing::trace;

/// The external "emit one byte" collaborator, typically a UART transmit
/// routine.
///
/// Implemented for any `FnMut(u8)`, so a closure is enough for a console:
///
/// ```
/// use rv_printf::Putc;
///
/// let mut seen = Vec::new();
/// let mut uart = |b: u8| seen.push(b);
/// uart.putc(b'!');
/// assert_eq!(b"!", &seen[..]);
/// ```
pub trait Putc {
    fn putc(&mut self, byte: u8);
}

impl<F> Putc for F
where
    F: FnMut(u8),
{
    #[inline]
    fn putc(&mut self, byte: u8) {
        self(byte)
    }
}

/// The receive half of the character device.
pub trait Getc {
    /// The next received byte, or `None` while nothing is pending.
    fn getc(&mut self) -> Option<u8>;
}

/// Where formatted bytes go.
///
/// A sink counts every byte handed to it, whether or not it could store
/// it; that count is what the printf family returns.
pub trait Sink {
    fn put(&mut self, byte: u8);

    /// Bytes processed so far, including any that were dropped.
    fn chars_out(&self) -> usize;

    #[inline]
    fn pad(&mut self, count: usize, byte: u8) {
        for _ in 0..count {
            self.put(byte);
        }
    }
}

/// Unbounded sink in front of a [`Putc`].
#[derive(Debug)]
pub struct ConsoleSink<'a, W: Putc + ?Sized> {
    writer: &'a mut W,
    chars_out: usize,
}

impl<'a, W: Putc + ?Sized> ConsoleSink<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        ConsoleSink {
            writer,
            chars_out: 0,
        }
    }
}

impl<'a, W: Putc + ?Sized> Sink for ConsoleSink<'a, W> {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.writer.putc(byte);
        self.chars_out += 1;
    }

    #[inline]
    fn chars_out(&self) -> usize {
        self.chars_out
    }
}

/// Bounded sink over a caller-owned buffer.
///
/// Bytes are stored while there is room for them plus a terminating NUL;
/// past that they are only counted. [`BufferSink::finish`] writes the NUL.
#[derive(Debug)]
pub struct BufferSink<'a> {
    buf: &'a mut [u8],
    chars_out: usize,
}

impl<'a> BufferSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        BufferSink { buf, chars_out: 0 }
    }

    /// NUL-terminates the output (if there is any room at all) and returns
    /// the number of bytes an unbounded write would have produced.
    pub fn finish(self) -> usize {
        let cap = self.buf.len();
        if cap > 0 {
            let end = self.chars_out.min(cap - 1);
            self.buf[end] = 0;
            if self.chars_out >= cap {
                trace!(
                    needed = self.chars_out + 1,
                    capacity = cap,
                    "bounded write truncated"
                );
            }
        }
        self.chars_out
    }
}

impl<'a> Sink for BufferSink<'a> {
    #[inline]
    fn put(&mut self, byte: u8) {
        if self.chars_out + 1 < self.buf.len() {
            self.buf[self.chars_out] = byte;
        }
        self.chars_out += 1;
    }

    #[inline]
    fn chars_out(&self) -> usize {
        self.chars_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_truncates_and_terminates() {
        let mut buf = [0xffu8; 4];
        let mut sink = BufferSink::new(&mut buf);
        for &b in b"hello" {
            sink.put(b);
        }
        assert_eq!(5, sink.finish());
        assert_eq!(b"hel\0", &buf);
    }

    #[test]
    fn test_buffer_sink_fits() {
        let mut buf = [0xffu8; 8];
        let mut sink = BufferSink::new(&mut buf);
        sink.pad(3, b'x');
        assert_eq!(3, sink.finish());
        assert_eq!(b"xxx\0", &buf[..4]);
        assert_eq!(0xff, buf[4]);
    }

    #[test]
    fn test_zero_capacity_only_counts() {
        let mut buf = [0u8; 0];
        let mut sink = BufferSink::new(&mut buf);
        sink.pad(10, b'x');
        assert_eq!(10, sink.finish());
    }

    #[test]
    fn test_console_sink_counts() {
        let mut out = [0u8; 3];
        let mut n = 0;
        let mut writer = |b: u8| {
            out[n] = b;
            n += 1;
        };
        let mut sink = ConsoleSink::new(&mut writer);
        sink.put(b'a');
        sink.put(b'b');
        assert_eq!(2, sink.chars_out());
        drop(sink);
        assert_eq!(b"ab\0", &out);
    }
}
