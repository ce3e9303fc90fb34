use crate::lock::{SpinLock, SpinLockGuard};
use crate::sink::{ConsoleSink, Getc, Putc};

/// The shared console: a [`Putc`] behind a [`SpinLock`].
///
/// One `Console` is handed to every caller of the unbounded entry points
/// ([`printf`](crate::printf()), [`vprintf`](crate::vprintf())). Each call holds
/// the lock for its whole duration, so output from different harts never
/// interleaves within one call.
///
/// ```
/// use rv_printf::{args, Console};
///
/// let mut out = Vec::new();
/// let console = Console::new(|b: u8| out.push(b));
/// rv_printf::printf(&console, "%s=%d\n", args!["x", 7]).unwrap();
/// console.puts("done");
/// drop(console);
/// assert_eq!(b"x=7\ndone\n", &out[..]);
/// ```
#[derive(Debug, Default)]
pub struct Console<W> {
    writer: SpinLock<W>,
}

impl<W: Putc> Console<W> {
    pub const fn new(writer: W) -> Self {
        Console {
            writer: SpinLock::new(writer),
        }
    }

    /// Takes the console for a sequence of writes.
    pub fn lock(&self) -> ConsoleGuard<'_, W> {
        ConsoleGuard {
            guard: self.writer.lock(),
        }
    }

    /// Writes one byte and returns it, like C `putchar`.
    pub fn putchar(&self, byte: u8) -> u8 {
        self.writer.lock().putc(byte);
        byte
    }

    /// Writes `s` up to its first NUL, then a newline. Returns the number of
    /// bytes written, newline included.
    pub fn puts(&self, s: impl AsRef<[u8]>) -> usize {
        let s = s.as_ref();
        let mut writer = self.writer.lock();
        let mut written = 0;
        for &b in s.iter().take_while(|&&b| b != 0) {
            writer.putc(b);
            written += 1;
        }
        writer.putc(b'\n');
        written + 1
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Putc + Getc> Console<W> {
    /// Blocks until a byte arrives, like C `getchar`. The lock is released
    /// between polls.
    pub fn getchar(&self) -> u8 {
        loop {
            if let Some(byte) = self.writer.lock().getc() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }
}

/// A locked console; formatted output goes through [`ConsoleGuard::sink`].
pub struct ConsoleGuard<'a, W> {
    guard: SpinLockGuard<'a, W>,
}

impl<'a, W: Putc> ConsoleGuard<'a, W> {
    pub fn sink(&mut self) -> ConsoleSink<'_, W> {
        ConsoleSink::new(&mut *self.guard)
    }
}
