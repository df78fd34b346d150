//! Capture file format and byte-string parsing.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReport {
    pub timestamp_us: u64,
    pub report_id: u8,
    /// Space-separated `0xNN` tokens.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFile {
    pub vendor_id: String,
    pub product_id: String,
    pub captures: Vec<CaptureReport>,
}

impl CaptureFile {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id: format!("0x{vendor_id:04X}"),
            product_id: format!("0x{product_id:04X}"),
            captures: Vec::new(),
        }
    }

    pub fn push(&mut self, timestamp_us: u64, data: &[u8]) {
        self.captures.push(CaptureReport {
            timestamp_us,
            report_id: data.first().copied().unwrap_or(0),
            data: format_hex_bytes(data),
        });
    }
}

pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

/// `0x00 0x80 ...`, the layout used in capture files.
pub fn format_hex_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one byte written as `0xNN` (hex), `0bNNNNNNNN` (binary) or decimal.
pub fn parse_byte(token: &str) -> Result<u8> {
    let token = token.trim();
    let (digits, radix) = if let Some(rest) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = token
        .strip_prefix("0b")
        .or_else(|| token.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (token, 10)
    };
    u8::from_str_radix(digits, radix).with_context(|| format!("invalid byte '{token}'"))
}

/// Parse the `data` field of a capture. An empty field yields no bytes.
pub fn parse_capture_data(data: &str) -> Result<Vec<u8>> {
    data.split_whitespace().map(parse_byte).collect()
}

/// Parse bytes separated by whitespace and/or commas.
pub fn parse_byte_list<'a, I>(tokens: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a str>,
{
    let bytes = tokens
        .into_iter()
        .flat_map(|t| t.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|t| !t.is_empty())
        .map(parse_byte)
        .collect::<Result<Vec<u8>>>()?;
    if bytes.is_empty() {
        bail!("no bytes given");
    }
    Ok(bytes)
}
