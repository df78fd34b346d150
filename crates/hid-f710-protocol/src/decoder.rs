//! Stateful decoder that keeps the most recent snapshot.
//!
//! [`crate::decode`] does the work; this type only stores its result so a
//! transport callback has somewhere to put it.

use crate::dump::{self, RawFormat};
use crate::input::{ControllerSnapshot, decode};
use crate::DecodeResult;
use hid_gamepad_common::{HidCommonResult, InputReportHandler, ReportContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderStats {
    /// Reports that decoded and replaced the live snapshot.
    pub decoded: u64,
    /// Reports dropped for having the wrong length.
    pub rejected: u64,
}

/// Owns the single live [`ControllerSnapshot`].
///
/// Holds no history. Callers that need an earlier state must
/// [`ControllerSnapshot::duplicate`] it before the next report arrives.
/// Not synchronized; share it behind a lock if more than one thread reads it.
#[derive(Debug, Clone, Default)]
pub struct F710Decoder {
    current: ControllerSnapshot,
    has_report: bool,
    last_changed: bool,
    stats: DecoderStats,
}

impl F710Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live snapshot. All zeros until the first report is accepted.
    pub fn current(&self) -> &ControllerSnapshot {
        &self.current
    }

    /// Whether any report has been accepted yet.
    pub fn has_report(&self) -> bool {
        self.has_report
    }

    /// Decode `raw` and replace the live snapshot with the result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError::LengthMismatch`] for reports that are
    /// not exactly 8 bytes; the live snapshot is left untouched.
    pub fn decode(&mut self, raw: &[u8]) -> DecodeResult<&ControllerSnapshot> {
        let next = match decode(raw) {
            Ok(next) => next,
            Err(e) => {
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                debug!(error = %e, "ignoring report");
                return Err(e);
            }
        };

        self.last_changed = !self.has_report || next.differs(&self.current);
        self.current = next;
        self.has_report = true;
        self.stats.decoded = self.stats.decoded.saturating_add(1);
        Ok(&self.current)
    }

    /// Whether the last accepted report differed from the one before it.
    pub fn last_changed(&self) -> bool {
        self.last_changed
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Dump the live snapshot's raw bytes.
    pub fn render_raw(&self, format: RawFormat) -> String {
        dump::render_raw(&self.current.raw_bytes, format)
    }

    /// Dump the live snapshot's raw bytes using a textual selector
    /// (`BIN`, `DEC`, `HEX`). Unknown selectors yield a diagnostic line.
    pub fn render_raw_selector(&self, selector: &str) -> String {
        dump::render_raw_selector(&self.current.raw_bytes, selector)
    }
}

impl InputReportHandler for F710Decoder {
    fn handle_report(&mut self, _ctx: &ReportContext<'_>, data: &[u8]) -> HidCommonResult<()> {
        self.decode(data)?;
        Ok(())
    }
}
