//! Transport-facing abstractions shared by gamepad HID report decoders.
//!
//! A transport owns the device and reads reports; a decoder only implements
//! [`InputReportHandler`]. [`ReportPump`] glues the two together so neither
//! side knows about the other's concrete type.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod hid_traits;
pub mod pump;

pub use device_info::*;
pub use hid_traits::*;
pub use pump::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Report length mismatch: expected {expected} bytes, got {actual}")]
    ReportLength { expected: usize, actual: usize },

    #[error("Device disconnected")]
    Disconnected,
}

impl HidCommonError {
    /// Whether the transport may keep reading after this error.
    ///
    /// A malformed report is dropped and the next one is tried; everything
    /// else means the device is gone or unusable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HidCommonError::ReportLength { .. })
    }
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = HidCommonError::DeviceNotFound("/dev/hidraw9".to_string());
        assert_eq!(format!("{err}"), "Device not found: /dev/hidraw9");

        let err = HidCommonError::Disconnected;
        assert_eq!(format!("{err}"), "Device disconnected");

        let err = HidCommonError::ReportLength {
            expected: 8,
            actual: 7,
        };
        assert_eq!(
            format!("{err}"),
            "Report length mismatch: expected 8 bytes, got 7"
        );
    }

    #[test]
    fn test_only_length_errors_are_recoverable() {
        assert!(
            HidCommonError::ReportLength {
                expected: 8,
                actual: 9
            }
            .is_recoverable()
        );
        assert!(!HidCommonError::Disconnected.is_recoverable());
        assert!(!HidCommonError::ReadError("timeout".to_string()).is_recoverable());
    }
}
