//! f710-capture - decode, watch and replay Logitech F710 HID reports.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

mod capture;
mod hidraw;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hid_f710_protocol::{ControllerSnapshot, F710Decoder, RawFormat, REPORT_LEN, decode};
use hid_gamepad_common::{PumpOutcome, ReportPump, ReportSource};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::capture::{CaptureFile, parse_byte_list, parse_capture_data, parse_hex_u16};
use crate::hidraw::HidrawSource;

/// Decode raw HID reports from a Logitech F710 gamepad in DirectInput mode.
#[derive(Parser)]
#[command(
    name = "f710-capture",
    about = "Logitech F710 HID report decoder and capture tool"
)]
#[command(version)]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Raw dump format: BIN, DEC or HEX
    #[arg(long, global = true, env = "F710_RAW_FORMAT", default_value = "HEX")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one report given on the command line
    Decode {
        /// Report bytes: decimal, 0x-prefixed hex or 0b-prefixed binary
        #[arg(required = true, num_args = 1..)]
        bytes: Vec<String>,
        /// Print the decoded snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read reports from a hidraw node and print each new state
    Watch {
        /// hidraw node (e.g. /dev/hidraw3) or a file of raw 8-byte reports
        #[arg(long, env = "F710_DEVICE")]
        device: PathBuf,
        /// Stop after this many accepted reports
        #[arg(long)]
        count: Option<u64>,
        /// Save accepted reports to a JSON capture file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Vendor ID recorded in the capture file (hex)
        #[arg(long, value_parser = parse_hex_u16, default_value = "046D")]
        vid: u16,
        /// Product ID recorded in the capture file (hex)
        #[arg(long, value_parser = parse_hex_u16, default_value = "C219")]
        pid: u16,
    },
    /// Decode every report in a JSON capture file
    Replay {
        /// Capture file written by `watch --output`
        file: PathBuf,
    },
    /// List connected HID devices and mark F710 pads
    #[cfg(feature = "hidapi")]
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("f710_capture={log_level},hid_f710_protocol={log_level},hid_gamepad_common={log_level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // An unknown selector is a usage error: report it and do nothing else.
    let format: RawFormat = cli.format.parse()?;

    match &cli.command {
        Commands::Decode { bytes, json } => decode_command(bytes, format, *json),
        Commands::Watch {
            device,
            count,
            output,
            vid,
            pid,
        } => watch_device(device, format, *count, output.as_deref(), (*vid, *pid)),
        Commands::Replay { file } => replay_file(file, format),
        #[cfg(feature = "hidapi")]
        Commands::List => list_devices(),
    }
}

/// Human-readable summary of the decoded fields.
fn describe(snapshot: &ControllerSnapshot) -> String {
    let pressed: Vec<String> = snapshot
        .pressed_buttons()
        .map(|b| format!("{b:?}"))
        .collect();
    format!(
        "L=({:>3},{:>3}) R=({:>3},{:>3}) dpad={:?} buttons=[{}] mode={} vibrate={}",
        snapshot.left_stick_x,
        snapshot.left_stick_y,
        snapshot.right_stick_x,
        snapshot.right_stick_y,
        snapshot.dpad_direction(),
        pressed.join(" "),
        u8::from(snapshot.mode_toggle),
        u8::from(snapshot.vibrate_toggle),
    )
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn print_snapshot(snapshot: &ControllerSnapshot, format: RawFormat) {
    print!(
        "{}",
        hid_f710_protocol::render_raw(&snapshot.raw_bytes, format)
    );
    println!("{}", describe(snapshot));
}

fn decode_command(tokens: &[String], format: RawFormat, json: bool) -> Result<()> {
    let bytes = parse_byte_list(tokens.iter().map(String::as_str))?;
    let snapshot = decode(&bytes).context("Failed to decode report")?;

    if json {
        let out = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize snapshot")?;
        println!("{out}");
    } else {
        print_snapshot(&snapshot, format);
    }
    Ok(())
}

fn watch_device(
    device: &Path,
    format: RawFormat,
    count: Option<u64>,
    output: Option<&Path>,
    (vid, pid): (u16, u16),
) -> Result<()> {
    if !hid_f710_protocol::is_f710_dinput(vid, pid) {
        warn!("{vid:04X}:{pid:04X} is not an F710 in DirectInput mode; decoding anyway");
    }
    let mut source = HidrawSource::open(device, REPORT_LEN)
        .with_context(|| format!("Failed to open HID device '{}'", device.display()))?
        .with_ids(vid, pid);
    let mut decoder = F710Decoder::new();
    let mut captures = CaptureFile::new(vid, pid);

    let start = Instant::now();
    let epoch_start = micros(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default(),
    );

    let opened = source.device_info();
    info!(
        device = %opened.path,
        usb_id = %opened.usb_id(),
        name = %opened.display_name(),
        "watching for reports"
    );

    loop {
        if count.is_some_and(|max| decoder.stats().decoded >= max) {
            break;
        }
        let outcome = ReportPump::new(&mut decoder)
            .pump_once(&mut source)
            .with_context(|| format!("Failed to read from '{}'", device.display()))?;

        match outcome {
            PumpOutcome::Idle => break,
            PumpOutcome::Rejected => {
                warn!("dropped a report that was not {REPORT_LEN} bytes");
            }
            PumpOutcome::Delivered => {
                let snapshot = decoder.current();
                if output.is_some() {
                    let timestamp_us = epoch_start.saturating_add(micros(start.elapsed()));
                    captures.push(timestamp_us, &snapshot.raw_bytes);
                }
                if decoder.last_changed() {
                    print_snapshot(snapshot, format);
                } else {
                    debug!("report unchanged");
                }
            }
        }
    }

    let stats = decoder.stats();
    println!(
        "Decoded {} report(s), rejected {}.",
        stats.decoded, stats.rejected
    );

    if let Some(path) = output {
        let json =
            serde_json::to_string_pretty(&captures).context("Failed to serialize captures")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
        println!("Captures saved to '{}'.", path.display());
    }

    Ok(())
}

fn replay_file(path: &Path, format: RawFormat) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file '{}'", path.display()))?;
    let file: CaptureFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse capture file '{}'", path.display()))?;

    info!(
        vendor_id = %file.vendor_id,
        product_id = %file.product_id,
        captures = file.captures.len(),
        "replaying"
    );

    let mut decoder = F710Decoder::new();
    for (index, report) in file.captures.iter().enumerate() {
        let bytes = parse_capture_data(&report.data)
            .with_context(|| format!("capture #{index} has malformed data"))?;
        // Wrong-length captures, empty ones included, are counted and skipped.
        if let Err(e) = decoder.decode(&bytes) {
            warn!(index, error = %e, "skipping capture");
            continue;
        }
        if decoder.last_changed() {
            println!("[{:>16}us]", report.timestamp_us);
            print_snapshot(decoder.current(), format);
        }
    }

    let stats = decoder.stats();
    if stats.decoded == 0 && !file.captures.is_empty() {
        bail!("no capture in '{}' could be decoded", path.display());
    }
    println!(
        "Replayed {} report(s), rejected {}.",
        stats.decoded, stats.rejected
    );
    Ok(())
}

#[cfg(feature = "hidapi")]
fn list_devices() -> Result<()> {
    use hidapi::HidApi;

    let api = HidApi::new().context("Failed to initialize HidApi")?;
    let devices: Vec<_> = api.device_list().collect();
    if devices.is_empty() {
        println!("No HID devices found.");
        return Ok(());
    }
    println!("{:<10} {:<6} {:<24} {:<12} Product", "ID", "F710", "Path", "Serial");
    println!("{}", "-".repeat(80));
    for dev in devices {
        let info = device_info(dev);
        let mark = if hid_f710_protocol::is_f710_dinput(info.vendor_id, info.product_id) {
            "DInput"
        } else if hid_f710_protocol::is_f710(info.vendor_id, info.product_id) {
            "XInput"
        } else {
            ""
        };
        println!(
            "{:<10} {:<6} {:<24} {:<12} {}",
            info.usb_id(),
            mark,
            info.path,
            info.serial_number.as_deref().unwrap_or("-"),
            info.display_name(),
        );
    }
    Ok(())
}

#[cfg(feature = "hidapi")]
fn device_info(dev: &hidapi::DeviceInfo) -> hid_gamepad_common::HidDeviceInfo {
    let mut info = hid_gamepad_common::HidDeviceInfo::new(
        dev.vendor_id(),
        dev.product_id(),
        dev.path().to_string_lossy(),
    );
    if let Some(serial) = dev.serial_number() {
        info = info.with_serial(serial);
    }
    if let Some(manufacturer) = dev.manufacturer_string() {
        info = info.with_manufacturer(manufacturer);
    }
    if let Some(product) = dev.product_string() {
        info = info.with_product_name(product);
    }
    info
}

// ── BDD-style scenario tests ────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // ═══ Scenario: Argument Parsing ═════════════════════════════════════════

    /// GIVEN a decode invocation with no format flag
    /// WHEN the CLI is parsed
    /// THEN the format defaults to HEX
    #[test]
    fn given_decode_without_format_when_parsed_then_hex_default() -> TestResult {
        let cli = Cli::try_parse_from(["f710-capture", "decode", "0", "128"])?;
        assert_eq!(cli.format.parse::<RawFormat>()?, RawFormat::Hex);
        assert!(matches!(cli.command, Commands::Decode { ref bytes, json: false } if bytes.len() == 2));
        Ok(())
    }

    /// GIVEN a watch invocation with a count
    /// WHEN the CLI is parsed
    /// THEN device and count are captured
    #[test]
    fn given_watch_args_when_parsed_then_fields_set() -> TestResult {
        let cli = Cli::try_parse_from([
            "f710-capture",
            "--format",
            "dec",
            "watch",
            "--device",
            "/dev/hidraw3",
            "--count",
            "10",
        ])?;
        match cli.command {
            Commands::Watch {
                device,
                count,
                output,
                vid,
                pid,
            } => {
                assert_eq!(device, PathBuf::from("/dev/hidraw3"));
                assert_eq!(count, Some(10));
                assert!(output.is_none());
                assert_eq!((vid, pid), (0x046D, 0xC219));
            }
            _ => return Err("expected watch".into()),
        }
        Ok(())
    }

    /// GIVEN decode with no bytes
    /// WHEN the CLI is parsed
    /// THEN clap rejects it
    #[test]
    fn given_decode_without_bytes_when_parsed_then_error() {
        assert!(matches!(Cli::try_parse_from(["f710-capture", "decode"]), Err(_)));
    }

    // ═══ Scenario: Snapshot Description ═════════════════════════════════════

    /// GIVEN a report with A and Start held and mode latched
    /// WHEN it is described
    /// THEN the summary names both buttons and the toggle state
    #[test]
    fn given_buttons_when_described_then_listed() -> TestResult {
        let snapshot = decode(&[0, 128, 128, 128, 128, 0x28, 0x20, 0x08])?;
        assert_eq!(
            describe(&snapshot),
            "L=(128,128) R=(128,128) dpad=Neutral buttons=[A Start] mode=1 vibrate=0"
        );
        Ok(())
    }
}
