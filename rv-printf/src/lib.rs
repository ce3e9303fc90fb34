/*!
[![Crates.io](https://img.shields.io/crates/v/rv-printf.svg)](https://crates.io/crates/rv-printf)

A freestanding implementation of the C printf family, built for bare-metal
RISC-V firmware and usable anywhere `core` is.

# Picture

* Conversion specifiers follow C: `% [flags] [width] [.precision] [length] conversion`
  with the `d i u o x X b B c s p f F e E g G a A` conversions, `*` width and
  precision, and the `hh h l ll L j z t wN wfN` length modifiers.
* Floats are rendered from the shortest round-trip decimal ([Ryū]) and then
  rounded half-to-even, so `%f`, `%e` and `%g` never need big-number
  arithmetic.
* Output goes either to a [`Console`] (a character-output callback behind a
  spin lock) or into a byte buffer that is always NUL-terminated.
* Nothing allocates and nothing panics on malformed input: a bad directive
  returns an [`Error`] carrying the C status and the directive's position.

# Examples

```rust
# #[cfg(feature = "float")]
# {
use rv_printf::{args, snprintf};

let mut buf = [0u8; 32];
let n = snprintf(&mut buf, "%-6s|%+.3e|%#x", args!["pi", 3.14159, 255u32]).unwrap();
assert_eq!(b"pi    |+3.142e+00|0xff", &buf[..n]);
# }
```

Writing to a console:

```rust
# #[cfg(feature = "float")]
# {
use rv_printf::{args, printf, Console};

let mut out = Vec::new();
let console = Console::new(|b: u8| out.push(b));
printf(&console, "%5.1f%%\n", args![99.44]).unwrap();
console.puts("done");
drop(console);
assert_eq!(b" 99.4%\ndone\n", &out[..]);
# }
```

# Float rendering

The float path is selected at build time through the `float` cargo feature
(on by default). Without it every float conversion prints `(n/a)` and fields
are only ever space-padded on the left, which keeps the Ryū tables out of the
image. Either renderer can also be picked explicitly through [`vformat`].

# Extra features

| Available features | What to put in your `Cargo.toml`                                  |
| :----------------- | :---------------------------------------------------------------- |
| `no_std`           | `rv-printf = { version = "0.1", default-features = false }`       |
| `float`            | `rv-printf = { version = "0.1", features = ["float"] }`           |
| `no-panic`         | `rv-printf = { version = "0.1", features = ["no-panic"] }`        |

[Ryū]: https://dl.acm.org/doi/10.1145/3192366.3192369
*/

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(rust_2018_idioms)]
#![doc(html_root_url = "https://docs.rs/rv-printf/0.1.0")]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

mod args;
mod console;
mod constants;
mod error;
mod error_kind;
mod field;
mod format;
mod impls;
mod itoa;
mod lock;
mod parse;
mod printf;
pub mod ryu;
mod sink;

pub use crate::args::{strnlen, Arg, ArgList};
pub use crate::console::{Console, ConsoleGuard};
pub use crate::constants::{DEFAULT_STR_PRECISION, MAX_FLOAT_PRECISION};
pub use crate::error::Error;
pub use crate::error_kind::ErrorKind;
pub use crate::field::{field_out, field_out_simple, Field, Fragment, Order};
pub use crate::format::{
    Conversion, Flags, FloatForm, FormatSpec, LengthMod, Radix, Status,
};
pub use crate::impls::floats::{DefaultFloatRenderer, FloatRenderer, RyuRenderer, StubRenderer};
pub use crate::lock::{SpinLock, SpinLockGuard};
pub use crate::parse::parse_directive;
pub use crate::printf::{printf, snprintf, sprintf, vformat, vprintf, vsnprintf, vsprintf};
pub use crate::sink::{BufferSink, ConsoleSink, Getc, Putc, Sink};
