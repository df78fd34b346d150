//! HID report traits
//!
//! [`ReportSource`] is implemented by transports (hidraw nodes, hidapi
//! handles, test doubles). [`InputReportHandler`] is implemented by decoders.

use crate::{HidCommonResult, HidDeviceInfo};

/// Metadata delivered with every inbound report.
///
/// Decoders are free to ignore all of it; it exists so that handlers keep the
/// call shape a HID host stack hands to its report parsers.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Opaque device the report came from.
    pub device: &'a HidDeviceInfo,
    /// `true` when the device prefixes reports with a report ID.
    pub numbered: bool,
}

impl<'a> ReportContext<'a> {
    pub fn new(device: &'a HidDeviceInfo, numbered: bool) -> Self {
        Self { device, numbered }
    }
}

/// Accepts one raw input report at a time.
///
/// Called synchronously on whatever thread reads the device, so
/// implementations must not block.
pub trait InputReportHandler {
    /// Consume one report. The report length is `data.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HidCommonError::ReportLength`] when the report does
    /// not have the size the handler understands. Such errors are
    /// recoverable and the transport keeps reading.
    fn handle_report(&mut self, ctx: &ReportContext<'_>, data: &[u8]) -> HidCommonResult<()>;
}

impl<H: InputReportHandler + ?Sized> InputReportHandler for &mut H {
    fn handle_report(&mut self, ctx: &ReportContext<'_>, data: &[u8]) -> HidCommonResult<()> {
        (**self).handle_report(ctx, data)
    }
}

/// Something that yields raw input reports.
pub trait ReportSource {
    /// Read the next report into `buf`, returning its length.
    ///
    /// `Ok(0)` means no report is available and none is expected.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying device fails or is gone.
    fn read_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize>;

    fn device_info(&self) -> &HidDeviceInfo;

    /// Whether reports start with a report ID byte.
    fn numbered_reports(&self) -> bool {
        false
    }

    fn is_connected(&self) -> bool;
}

pub mod mock {
    use super::*;
    use crate::HidCommonError;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Report source fed from an in-memory queue.
    #[derive(Clone)]
    pub struct MockReportSource {
        info: HidDeviceInfo,
        read_queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
        connected: Arc<Mutex<bool>>,
        numbered: bool,
    }

    impl MockReportSource {
        pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
            Self {
                info: HidDeviceInfo::new(vendor_id, product_id, path),
                read_queue: Arc::new(Mutex::new(VecDeque::new())),
                connected: Arc::new(Mutex::new(true)),
                numbered: false,
            }
        }

        pub fn with_numbered_reports(mut self, numbered: bool) -> Self {
            self.numbered = numbered;
            self
        }

        pub fn queue_read(&self, data: impl Into<Vec<u8>>) {
            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(data.into());
        }

        pub fn pending(&self) -> usize {
            self.read_queue
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .len()
        }

        pub fn disconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = false;
        }

        pub fn reconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = true;
        }
    }

    impl ReportSource for MockReportSource {
        fn read_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
            if !self.is_connected() {
                return Err(HidCommonError::Disconnected);
            }
            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            let Some(report) = queue.pop_front() else {
                return Ok(0);
            };
            let len = report.len().min(buf.len());
            let (dst, src) = (buf.get_mut(..len), report.get(..len));
            if let (Some(dst), Some(src)) = (dst, src) {
                dst.copy_from_slice(src);
            }
            Ok(len)
        }

        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }

        fn numbered_reports(&self) -> bool {
            self.numbered
        }

        fn is_connected(&self) -> bool {
            *self.connected.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    /// Handler that records every report and optionally enforces a length.
    #[derive(Debug, Default)]
    pub struct RecordingHandler {
        pub expected_len: Option<usize>,
        pub accepted: Vec<Vec<u8>>,
        pub numbered_flags: Vec<bool>,
    }

    impl RecordingHandler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn expecting(len: usize) -> Self {
            Self {
                expected_len: Some(len),
                ..Self::default()
            }
        }
    }

    impl InputReportHandler for RecordingHandler {
        fn handle_report(&mut self, ctx: &ReportContext<'_>, data: &[u8]) -> HidCommonResult<()> {
            if let Some(expected) = self.expected_len
                && data.len() != expected
            {
                return Err(HidCommonError::ReportLength {
                    expected,
                    actual: data.len(),
                });
            }
            self.accepted.push(data.to_vec());
            self.numbered_flags.push(ctx.numbered);
            Ok(())
        }
    }
}
