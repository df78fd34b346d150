//! Report source backed by a Linux hidraw node, or a plain file of
//! back-to-back raw reports.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use hid_gamepad_common::{HidCommonError, HidCommonResult, HidDeviceInfo, ReportSource};

/// [`ReportSource`] over anything readable.
///
/// Reading zero bytes marks the end of the stream; after that the source
/// reports itself disconnected.
pub struct HidrawSource<R> {
    reader: R,
    info: HidDeviceInfo,
    /// Fixed report size for sources without report framing.
    ///
    /// A hidraw node returns one report per `read`; a plain file does not.
    chunk: Option<usize>,
    eof: bool,
}

impl HidrawSource<File> {
    /// Open a hidraw node, or a regular file split into `report_len` chunks.
    ///
    /// # Errors
    ///
    /// `DeviceNotFound` when the path does not exist, `OpenError` for any
    /// other failure to open or stat it.
    pub fn open(path: &Path, report_len: usize) -> HidCommonResult<Self> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => HidCommonError::DeviceNotFound(name.clone()),
            _ => HidCommonError::OpenError(format!("{name}: {e}")),
        })?;
        let is_plain_file = file
            .metadata()
            .map_err(|e| HidCommonError::OpenError(format!("{name}: {e}")))?
            .is_file();
        let source = Self::new(file, HidDeviceInfo::from_path(name));
        Ok(if is_plain_file {
            source.with_chunk(report_len)
        } else {
            source
        })
    }
}

impl<R: Read> HidrawSource<R> {
    pub fn new(reader: R, info: HidDeviceInfo) -> Self {
        Self {
            reader,
            info,
            chunk: None,
            eof: false,
        }
    }

    /// Record the vendor and product the caller knows this node belongs to.
    pub fn with_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.info.vendor_id = vendor_id;
        self.info.product_id = product_id;
        self
    }

    pub fn with_chunk(mut self, len: usize) -> Self {
        self.chunk = Some(len);
        self
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while let Some(rest) = buf.get_mut(filled..) {
            if rest.is_empty() {
                break;
            }
            let n = self.reader.read(rest)?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<R: Read> ReportSource for HidrawSource<R> {
    fn read_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
        let read = match self.chunk {
            Some(len) => {
                let end = len.min(buf.len());
                let window = buf.get_mut(..end).unwrap_or_default();
                self.read_chunk(window)
            }
            None => self.reader.read(buf),
        };
        let n = read.map_err(|e| HidCommonError::ReadError(format!("{}: {e}", self.info.path)))?;
        if n == 0 {
            self.eof = true;
        }
        Ok(n)
    }

    fn device_info(&self) -> &HidDeviceInfo {
        &self.info
    }

    fn is_connected(&self) -> bool {
        !self.eof
    }
}
