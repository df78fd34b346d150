//! Integration tests for the hid-gamepad-common crate.
//!
//! Covers device info, the mock report source, the report pump and error
//! classification through the public API only.

use hid_gamepad_common::{
    HidCommonError, HidDeviceInfo, InputReportHandler, PumpOutcome, PumpStats, ReportContext,
    ReportPump, ReportSource,
    hid_traits::mock::{MockReportSource, RecordingHandler},
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// HidDeviceInfo
// ---------------------------------------------------------------------------

#[test]
fn device_info_builder_chain() {
    let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw2")
        .with_serial("A1B2")
        .with_manufacturer("Logitech")
        .with_product_name("F710");
    assert_eq!(info.serial_number.as_deref(), Some("A1B2"));
    assert_eq!(info.display_name(), "F710");
    assert_eq!(info.usb_id(), "046d:c219");
}

#[test]
fn device_info_serde_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw2").with_product_name("F710");
    let json = serde_json::to_string(&info)?;
    let back: HidDeviceInfo = serde_json::from_str(&json)?;
    assert_eq!(back, info);
    Ok(())
}

// ---------------------------------------------------------------------------
// ReportPump
// ---------------------------------------------------------------------------

/// Handler that counts calls and stops the pump with a hard error on demand.
struct FailingHandler {
    calls: usize,
    fail_on: usize,
}

impl InputReportHandler for FailingHandler {
    fn handle_report(
        &mut self,
        _ctx: &ReportContext<'_>,
        _data: &[u8],
    ) -> Result<(), HidCommonError> {
        self.calls += 1;
        if self.calls == self.fail_on {
            return Err(HidCommonError::ReadError("handler gave up".to_string()));
        }
        Ok(())
    }
}

#[test]
fn pump_stops_on_non_recoverable_handler_error() {
    let mut source = MockReportSource::new(0x046D, 0xC219, "/dev/hidraw0");
    for _ in 0..4 {
        source.queue_read(vec![0u8; 8]);
    }
    let mut handler = FailingHandler {
        calls: 0,
        fail_on: 2,
    };
    let result = ReportPump::new(&mut handler).run(&mut source, None);
    assert!(matches!(result, Err(HidCommonError::ReadError(_))));
    assert_eq!(handler.calls, 2);
    assert_eq!(source.pending(), 2, "remaining reports stay queued");
}

#[test]
fn pump_once_sequence() -> Result<(), HidCommonError> {
    let mut source = MockReportSource::new(0x046D, 0xC219, "/dev/hidraw0");
    source.queue_read(vec![0u8; 8]);
    source.queue_read(vec![0u8; 9]);

    let mut handler = RecordingHandler::expecting(8);
    let mut pump = ReportPump::new(&mut handler);
    assert_eq!(pump.pump_once(&mut source)?, PumpOutcome::Delivered);
    assert_eq!(pump.pump_once(&mut source)?, PumpOutcome::Rejected);
    assert_eq!(pump.pump_once(&mut source)?, PumpOutcome::Idle);
    assert_eq!(
        pump.stats(),
        PumpStats {
            delivered: 1,
            rejected: 1
        }
    );
    Ok(())
}

#[test]
fn pump_reads_through_trait_object() -> Result<(), HidCommonError> {
    let mock = MockReportSource::new(0x046D, 0xC219, "/dev/hidraw0");
    mock.queue_read(vec![7u8; 8]);
    let mut boxed: Box<dyn ReportSource> = Box::new(mock.clone());

    let mut handler = RecordingHandler::new();
    let stats = ReportPump::new(&mut handler).run(boxed.as_mut(), None)?;
    assert_eq!(stats.delivered, 1);
    assert_eq!(mock.pending(), 0, "clones share the queue");
    Ok(())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Every queued report ends up either delivered or rejected, never both.
    #[test]
    fn prop_pump_accounts_for_every_report(
        lens in proptest::collection::vec(1usize..=16, 0..32),
    ) {
        let mut source = MockReportSource::new(0x046D, 0xC219, "/dev/hidraw0");
        for len in &lens {
            source.queue_read(vec![0xA5u8; *len]);
        }
        let mut handler = RecordingHandler::expecting(8);
        let stats = ReportPump::new(&mut handler)
            .run(&mut source, None)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected_ok = lens.iter().filter(|&&l| l == 8).count() as u64;
        prop_assert_eq!(stats.delivered, expected_ok);
        prop_assert_eq!(stats.delivered + stats.rejected, lens.len() as u64);
        prop_assert_eq!(handler.accepted.len() as u64, expected_ok);
    }
}
