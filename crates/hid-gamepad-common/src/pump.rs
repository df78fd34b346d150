//! Moves reports from a [`ReportSource`] into an [`InputReportHandler`].

use crate::{HidCommonError, HidCommonResult, InputReportHandler, ReportContext, ReportSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Largest report the pump reads in one go (full-speed interrupt packet).
pub const MAX_REPORT_LEN: usize = 64;

/// Result of a single [`ReportPump::pump_once`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    /// The handler accepted the report.
    Delivered,
    /// The handler refused the report with a recoverable error.
    Rejected,
    /// The source had nothing to read.
    Idle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpStats {
    pub delivered: u64,
    pub rejected: u64,
}

/// Holds a reference to any handler and feeds it one report per read.
pub struct ReportPump<'h> {
    handler: &'h mut dyn InputReportHandler,
    buf: [u8; MAX_REPORT_LEN],
    stats: PumpStats,
}

impl<'h> ReportPump<'h> {
    pub fn new(handler: &'h mut dyn InputReportHandler) -> Self {
        Self {
            handler,
            buf: [0u8; MAX_REPORT_LEN],
            stats: PumpStats::default(),
        }
    }

    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    /// Read one report from `source` and hand it to the handler.
    ///
    /// # Errors
    ///
    /// Propagates source failures and non-recoverable handler errors.
    /// A source that already reports itself disconnected is not read and
    /// yields [`HidCommonError::Disconnected`].
    pub fn pump_once(&mut self, source: &mut dyn ReportSource) -> HidCommonResult<PumpOutcome> {
        if !source.is_connected() {
            return Err(HidCommonError::Disconnected);
        }
        let len = source.read_report(&mut self.buf)?;
        if len == 0 {
            return Ok(PumpOutcome::Idle);
        }

        let data = self.buf.get(..len).unwrap_or(&self.buf);
        let ctx = ReportContext::new(source.device_info(), source.numbered_reports());
        trace!(len, device = %ctx.device.path, "forwarding report");

        match self.handler.handle_report(&ctx, data) {
            Ok(()) => {
                self.stats.delivered = self.stats.delivered.saturating_add(1);
                Ok(PumpOutcome::Delivered)
            }
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "report dropped");
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                Ok(PumpOutcome::Rejected)
            }
            Err(e) => Err(e),
        }
    }

    /// Pump until the source runs dry or `limit` reports were delivered.
    ///
    /// # Errors
    ///
    /// Same as [`ReportPump::pump_once`].
    pub fn run(
        &mut self,
        source: &mut dyn ReportSource,
        limit: Option<u64>,
    ) -> HidCommonResult<PumpStats> {
        while limit.is_none_or(|max| self.stats.delivered < max) {
            if self.pump_once(source)? == PumpOutcome::Idle {
                break;
            }
        }
        Ok(self.stats)
    }
}
