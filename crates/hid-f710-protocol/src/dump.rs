//! One-line text dumps of raw reports for debugging.
//!
//! ```text
//! Raw Packet (Binary):    0 10000000 10000000 10000000 10000000 1000 0 0
//! Raw Packet (Decimal):   0 128 128 128 128 8 0 0
//! Raw Packet (HEX):       0 80 80 80 80 8 0 0
//! ```
//!
//! Every byte is followed by a single space and the line ends with `\n`.
//! Bytes are not zero-padded.

use std::fmt::{self, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RawFormat {
    #[default]
    Binary,
    Decimal,
    Hex,
}

impl RawFormat {
    /// Line prefix, padded so the byte columns of all formats line up.
    pub fn label(self) -> &'static str {
        match self {
            RawFormat::Binary => "Raw Packet (Binary):    ",
            RawFormat::Decimal => "Raw Packet (Decimal):   ",
            RawFormat::Hex => "Raw Packet (HEX):       ",
        }
    }

    fn write_byte<W: Write>(self, out: &mut W, byte: u8) -> fmt::Result {
        match self {
            RawFormat::Binary => write!(out, "{byte:b} "),
            RawFormat::Decimal => write!(out, "{byte} "),
            RawFormat::Hex => write!(out, "{byte:X} "),
        }
    }
}

/// Selector that names none of the known formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid raw format '{0}' (use 'BIN', 'DEC' or 'HEX')")]
pub struct UnknownRawFormat(pub String);

impl FromStr for RawFormat {
    type Err = UnknownRawFormat;

    /// Accepts names (`bin`, `binary`, `dec`, `decimal`, `hex`,
    /// `hexadecimal`, any case) and radixes (`2`, `10`, `16`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bin" | "binary" | "2" => Ok(RawFormat::Binary),
            "dec" | "decimal" | "10" => Ok(RawFormat::Decimal),
            "hex" | "hexadecimal" | "16" => Ok(RawFormat::Hex),
            _ => Err(UnknownRawFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RawFormat::Binary => "BIN",
            RawFormat::Decimal => "DEC",
            RawFormat::Hex => "HEX",
        })
    }
}

/// Write one dump line for `bytes` into `out`.
///
/// # Errors
///
/// Only fails if `out` does.
pub fn write_raw<W: Write>(out: &mut W, bytes: &[u8], format: RawFormat) -> fmt::Result {
    out.write_str(format.label())?;
    for &byte in bytes {
        format.write_byte(out, byte)?;
    }
    out.write_char('\n')
}

pub fn render_raw(bytes: &[u8], format: RawFormat) -> String {
    // Widest case: eight binary digits plus a space per byte.
    let mut line = String::with_capacity(
        format
            .label()
            .len()
            .saturating_add(bytes.len().saturating_mul(9))
            .saturating_add(1),
    );
    // Writing into a String cannot fail.
    if write_raw(&mut line, bytes, format).is_err() {
        line.clear();
    }
    line
}

/// Render with a textual selector.
///
/// An unknown selector produces a one-line diagnostic instead of a dump.
pub fn render_raw_selector(bytes: &[u8], selector: &str) -> String {
    match selector.parse::<RawFormat>() {
        Ok(format) => render_raw(bytes, format),
        Err(e) => format!("{e}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTERED: [u8; 8] = [0x00, 0x80, 0x80, 0x80, 0x80, 0x08, 0x00, 0x00];

    #[test]
    fn test_render_decimal() {
        assert_eq!(
            render_raw(&CENTERED, RawFormat::Decimal),
            "Raw Packet (Decimal):   0 128 128 128 128 8 0 0 \n"
        );
    }

    #[test]
    fn test_render_hex_is_upper_and_unpadded() {
        assert_eq!(
            render_raw(&[0x0A, 0xFF, 0x10], RawFormat::Hex),
            "Raw Packet (HEX):       A FF 10 \n"
        );
    }

    #[test]
    fn test_render_binary_is_unpadded() {
        assert_eq!(
            render_raw(&[0, 1, 0b1010_0000], RawFormat::Binary),
            "Raw Packet (Binary):    0 1 10100000 \n"
        );
    }

    #[test]
    fn test_selector_parsing() {
        for sel in ["BIN", "bin", "Binary", "2"] {
            assert_eq!(sel.parse::<RawFormat>(), Ok(RawFormat::Binary));
        }
        for sel in ["DEC", "decimal", "10"] {
            assert_eq!(sel.parse::<RawFormat>(), Ok(RawFormat::Decimal));
        }
        for sel in ["HEX", " hex ", "Hexadecimal", "16"] {
            assert_eq!(sel.parse::<RawFormat>(), Ok(RawFormat::Hex));
        }
        assert!(matches!("oct".parse::<RawFormat>(), Err(_)));
        assert!(matches!("8".parse::<RawFormat>(), Err(_)));
    }

    #[test]
    fn test_unknown_selector_renders_diagnostic() {
        let line = render_raw_selector(&CENTERED, "oct");
        assert_eq!(line, "invalid raw format 'oct' (use 'BIN', 'DEC' or 'HEX')\n");
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for format in [RawFormat::Binary, RawFormat::Decimal, RawFormat::Hex] {
            assert_eq!(format.to_string().parse::<RawFormat>(), Ok(format));
        }
    }
}
