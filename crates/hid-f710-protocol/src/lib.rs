//! Logitech F710 gamepad (DirectInput mode) HID protocol: report decoding,
//! snapshot comparison, and raw report dumps.
//!
//! The decoding path is I/O-free and allocation-free so it can run directly
//! in a transport's read callback.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod dump;
pub mod ids;
pub mod input;
pub mod layout;
pub mod types;

pub use decoder::{DecoderStats, F710Decoder};
pub use dump::{RawFormat, UnknownRawFormat, render_raw, render_raw_selector, write_raw};
pub use ids::{LOGITECH_VENDOR_ID, is_f710, is_f710_dinput, product_ids};
pub use input::{ControllerSnapshot, decode, differs, duplicate};
pub use layout::{REPORT_LEN, bit_set};
pub use types::{Button, DpadDirection, Toggle};

use hid_gamepad_common::HidCommonError;
use thiserror::Error;

/// The only way decoding can fail.
///
/// Recoverable: drop the report and wait for the next one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Report length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

impl From<DecodeError> for HidCommonError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::LengthMismatch { expected, actual } => {
                HidCommonError::ReportLength { expected, actual }
            }
        }
    }
}
