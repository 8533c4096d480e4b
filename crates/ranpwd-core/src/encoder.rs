//! Turns uniformly random bytes into exactly `length` units of a [`Format`].
//!
//! One loop, one counter:
//!
//! ```text
//! remaining = length
//! while remaining > 0:
//!     draw 1 byte (16 for UUIDs)
//!     accepted? -> write it, remaining -= units consumed
//!     rejected? -> remaining unchanged, draw again
//! ```
//!
//! Rejection keeps each character class uniform: a byte is masked into a
//! small range and discarded when it lands outside the class, never folded
//! back in with a modulo. Bytes are pulled one step at a time, so no more
//! entropy is read than the output needs.

use std::fmt;
use std::io::Write;

use crate::config::Config;
use crate::entropy::EntropySource;
use crate::error::{Error, Result};
use crate::format::Format;

/// Write the undecorated body for `config` into `out`.
///
/// An entropy failure aborts at once. Whatever was already written stays
/// written.
pub fn encode<S, W>(config: &Config, source: &mut S, out: &mut W) -> Result<()>
where
    S: EntropySource + ?Sized,
    W: Write + ?Sized,
{
    Encoder::new(config, source, out).run()
}

/// Write one full output line: decoration prefix, body, suffix, newline.
///
/// On failure nothing more is written, so the caller sees a truncated line
/// with no closing quote and no newline.
pub fn generate_line<S, W>(config: &Config, source: &mut S, out: &mut W) -> Result<()>
where
    S: EntropySource + ?Sized,
    W: Write + ?Sized,
{
    let decoration = config.format().decoration();
    if config.is_decorated() {
        out.write_all(decoration.prefix().as_bytes())
            .map_err(Error::Output)?;
    }
    encode(config, source, out)?;
    if config.is_decorated() {
        out.write_all(decoration.suffix().as_bytes())
            .map_err(Error::Output)?;
    }
    out.write_all(b"\n").map_err(Error::Output)
}

/// Decorated body as a `String`, without the trailing newline.
pub fn generate<S>(config: &Config, source: &mut S) -> Result<String>
where
    S: EntropySource + ?Sized,
{
    let mut line = Vec::new();
    generate_line(config, source, &mut line)?;
    line.pop();
    // Every format writes ASCII only.
    Ok(String::from_utf8_lossy(&line).into_owned())
}

struct Encoder<'a, S: ?Sized, W: ?Sized> {
    source: &'a mut S,
    out: &'a mut W,
    format: Format,
    length: usize,
    /// Quoted decoration: escape `"`, `'` and `\`.
    escape: bool,
    /// Decimal decoration still pending: leading zero pairs are dropped.
    leading: bool,
}

impl<'a, S, W> Encoder<'a, S, W>
where
    S: EntropySource + ?Sized,
    W: Write + ?Sized,
{
    fn new(config: &Config, source: &'a mut S, out: &'a mut W) -> Self {
        let format = config.format();
        Self {
            source,
            out,
            format,
            length: config.length(),
            escape: config.is_decorated() && format.decoration().escapes(),
            leading: config.is_decorated() && format == Format::Decimal,
        }
    }

    fn run(mut self) -> Result<()> {
        let mut remaining = self.length;
        while remaining > 0 {
            remaining -= self.encode_unit(remaining)?;
        }
        Ok(())
    }

    /// One draw. Returns how many units it consumed; 0 means rejected.
    fn encode_unit(&mut self, remaining: usize) -> Result<usize> {
        let first = remaining == self.length;
        match self.format {
            Format::Ascii => self.class(|b| b & 0x7f, is_printable),
            Format::LowerAscii => self.class(
                |b| b & 0x7f,
                |c| is_printable(c) && !c.is_ascii_uppercase(),
            ),
            Format::UpperAscii => self.class(
                |b| b & 0x7f,
                |c| is_printable(c) && !c.is_ascii_lowercase(),
            ),
            Format::Alnum => self.class(|b| b & 0x7f, |c| c.is_ascii_alphanumeric()),
            Format::LowerAlnum => {
                self.class(|b| (b & 0x5f) | 0x20, |c| c.is_ascii_alphanumeric())
            }
            Format::UpperAlnum => self.class(
                |b| {
                    let c = b & 0x5f;
                    if c < 0x40 { c | 0x20 } else { c }
                },
                |c| c.is_ascii_alphanumeric(),
            ),
            Format::Alpha => self.class(|b| (b & 0x3f) | 0x40, |c| c.is_ascii_alphabetic()),
            Format::LowerAlpha => {
                self.class(|b| (b & 0x1f) | 0x60, |c| c.is_ascii_alphabetic())
            }
            Format::UpperAlpha => {
                self.class(|b| (b & 0x1f) | 0x40, |c| c.is_ascii_alphabetic())
            }
            Format::Hex => self.hex(remaining, false),
            Format::UpperHex => self.hex(remaining, true),
            Format::Octal => self.octal(remaining),
            Format::Decimal => self.decimal(remaining),
            Format::Binary => self.binary(remaining),
            Format::Ip => self.ip_octet(first),
            Format::Mac => self.mac_octet(first, false),
            Format::UpperMac => self.mac_octet(first, true),
            Format::Uuid => self.uuid(remaining, false),
            Format::UpperUuid => self.uuid(remaining, true),
        }
    }

    // -----------------------------------------------------------------------
    // Character classes
    // -----------------------------------------------------------------------

    fn class(&mut self, fold: impl Fn(u8) -> u8, accept: impl Fn(u8) -> bool) -> Result<usize> {
        let c = fold(self.byte()?);
        if !accept(c) {
            return Ok(0);
        }
        if self.escape && matches!(c, b'"' | b'\'' | b'\\') {
            self.put_bytes(b"\\")?;
        }
        self.put_bytes(&[c])?;
        Ok(1)
    }

    // -----------------------------------------------------------------------
    // Numbers
    // -----------------------------------------------------------------------

    fn hex(&mut self, remaining: usize, upper: bool) -> Result<usize> {
        let b = self.byte()?;
        match (remaining, upper) {
            (1, false) => self.put(format_args!("{:x}", b & 0x0f)).map(|_| 1),
            (1, true) => self.put(format_args!("{:X}", b & 0x0f)).map(|_| 1),
            (_, false) => self.put(format_args!("{b:02x}")).map(|_| 2),
            (_, true) => self.put(format_args!("{b:02X}")).map(|_| 2),
        }
    }

    fn octal(&mut self, remaining: usize) -> Result<usize> {
        let b = self.byte()?;
        if remaining == 1 {
            self.put(format_args!("{:o}", b & 0o7))?;
            Ok(1)
        } else {
            self.put(format_args!("{:02o}", b & 0o77))?;
            Ok(2)
        }
    }

    /// Digit pairs from bytes below 200, single digits from bytes below 250.
    ///
    /// While decoration is pending, pairs are printed without zero padding
    /// and an all-zero pair is skipped entirely (its two units still count),
    /// unless it is the last pair, so the number never starts with `0`.
    fn decimal(&mut self, remaining: usize) -> Result<usize> {
        let b = self.byte()?;
        if self.leading && remaining > 1 && b < 200 {
            let pair = b % 100;
            if pair > 0 || remaining == 2 {
                self.put(format_args!("{pair}"))?;
                self.leading = false;
            }
            Ok(2)
        } else if remaining == 1 && b < 250 {
            self.put(format_args!("{}", b % 10))?;
            Ok(1)
        } else if b < 200 {
            self.put(format_args!("{:02}", b % 100))?;
            Ok(2)
        } else {
            Ok(0)
        }
    }

    /// Up to eight bits per byte, least significant first.
    fn binary(&mut self, remaining: usize) -> Result<usize> {
        let b = self.byte()?;
        let n = remaining.min(8);
        let mut bits = [0u8; 8];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = b'0' + ((b >> i) & 1);
        }
        self.put_bytes(&bits[..n])?;
        Ok(n)
    }

    // -----------------------------------------------------------------------
    // Network identifiers
    // -----------------------------------------------------------------------

    /// The leading octet is never 0 or 255.
    fn ip_octet(&mut self, first: bool) -> Result<usize> {
        let b = self.byte()?;
        if first {
            if b.wrapping_sub(1) >= 254 {
                return Ok(0);
            }
            self.put(format_args!("{b}"))?;
        } else {
            self.put(format_args!(".{b}"))?;
        }
        Ok(1)
    }

    /// The leading octet is forced to locally administered unicast.
    fn mac_octet(&mut self, first: bool, upper: bool) -> Result<usize> {
        let mut b = self.byte()?;
        if first {
            b = (b & !0x01) | 0x02;
        } else {
            self.put_bytes(b":")?;
        }
        if upper {
            self.put(format_args!("{b:02X}"))?;
        } else {
            self.put(format_args!("{b:02x}"))?;
        }
        Ok(1)
    }

    /// Version 4, RFC 4122 variant, hyphenated; several are space separated.
    fn uuid(&mut self, remaining: usize, upper: bool) -> Result<usize> {
        let mut bytes = [0u8; 16];
        self.source.fill(&mut bytes)?;
        let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        if upper {
            self.put(format_args!("{:X}", id.hyphenated()))?;
        } else {
            self.put(format_args!("{}", id.hyphenated()))?;
        }
        if remaining > 1 {
            self.put_bytes(b" ")?;
        }
        Ok(1)
    }

    // -----------------------------------------------------------------------
    // I/O
    // -----------------------------------------------------------------------

    fn byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.source.fill(&mut b)?;
        Ok(b[0])
    }

    fn put(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.out.write_fmt(args).map_err(Error::Output)
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes).map_err(Error::Output)
    }
}

fn is_printable(c: u8) -> bool {
    (0x21..=0x7e).contains(&c)
}
