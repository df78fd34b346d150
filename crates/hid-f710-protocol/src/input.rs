//! F710 DirectInput input report decoding.
//!
//! All functions are pure and allocation-free.

#![deny(static_mut_refs)]

use crate::layout::{
    DPAD_MASK, REPORT_LEN, bit_set, face_bits, offsets, shoulder_bits, toggle_bits,
};
use crate::types::{Button, DpadDirection, Toggle};
use crate::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};

/// Controller state decoded from one 8-byte report.
///
/// Every field other than `raw_bytes` is derived from `raw_bytes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Byte 0, passed through.
    pub report_id: u8,
    /// 0 = full left, 128 = center, 255 = full right.
    pub left_stick_x: u8,
    /// 0 = full up, 128 = center, 255 = full down.
    pub left_stick_y: u8,
    pub right_stick_x: u8,
    pub right_stick_y: u8,
    /// Low nibble of byte 5; see [`DpadDirection`].
    pub dpad: u8,
    pub x_button: bool,
    pub a_button: bool,
    pub b_button: bool,
    pub y_button: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
    pub left_trigger: bool,
    pub right_trigger: bool,
    pub back_button: bool,
    pub start_button: bool,
    pub left_stick_button: bool,
    pub right_stick_button: bool,
    /// Latched on the pad: flips on each press, holds between presses.
    pub mode_toggle: bool,
    /// Latched like `mode_toggle`.
    pub vibrate_toggle: bool,
    /// The report exactly as received.
    pub raw_bytes: [u8; REPORT_LEN],
}

impl ControllerSnapshot {
    /// Decode a report whose length is already known to be correct.
    pub const fn from_report(raw: &[u8; REPORT_LEN]) -> Self {
        let face = raw[offsets::DPAD_FACE];
        let shoulder = raw[offsets::SHOULDER_MENU];
        let toggles = raw[offsets::TOGGLES];

        Self {
            report_id: raw[offsets::REPORT_ID],
            left_stick_x: raw[offsets::LEFT_STICK_X],
            left_stick_y: raw[offsets::LEFT_STICK_Y],
            right_stick_x: raw[offsets::RIGHT_STICK_X],
            right_stick_y: raw[offsets::RIGHT_STICK_Y],
            dpad: face & DPAD_MASK,
            x_button: bit_set(face, face_bits::X),
            a_button: bit_set(face, face_bits::A),
            b_button: bit_set(face, face_bits::B),
            y_button: bit_set(face, face_bits::Y),
            left_bumper: bit_set(shoulder, shoulder_bits::LEFT_BUMPER),
            right_bumper: bit_set(shoulder, shoulder_bits::RIGHT_BUMPER),
            left_trigger: bit_set(shoulder, shoulder_bits::LEFT_TRIGGER),
            right_trigger: bit_set(shoulder, shoulder_bits::RIGHT_TRIGGER),
            back_button: bit_set(shoulder, shoulder_bits::BACK),
            start_button: bit_set(shoulder, shoulder_bits::START),
            left_stick_button: bit_set(shoulder, shoulder_bits::LEFT_STICK),
            right_stick_button: bit_set(shoulder, shoulder_bits::RIGHT_STICK),
            mode_toggle: bit_set(toggles, toggle_bits::MODE),
            vibrate_toggle: bit_set(toggles, toggle_bits::VIBRATE),
            raw_bytes: *raw,
        }
    }

    pub fn dpad_direction(&self) -> DpadDirection {
        DpadDirection::from_nibble(self.dpad)
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::X => self.x_button,
            Button::A => self.a_button,
            Button::B => self.b_button,
            Button::Y => self.y_button,
            Button::LeftBumper => self.left_bumper,
            Button::RightBumper => self.right_bumper,
            Button::LeftTrigger => self.left_trigger,
            Button::RightTrigger => self.right_trigger,
            Button::Back => self.back_button,
            Button::Start => self.start_button,
            Button::LeftStick => self.left_stick_button,
            Button::RightStick => self.right_stick_button,
        }
    }

    pub fn is_latched(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Mode => self.mode_toggle,
            Toggle::Vibrate => self.vibrate_toggle,
        }
    }

    /// Buttons currently held, in report order.
    pub fn pressed_buttons(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.is_pressed(*b))
    }

    /// Independent copy of this snapshot.
    pub fn duplicate(&self) -> Self {
        *self
    }

    /// Whether the two snapshots came from different raw reports.
    ///
    /// Only `raw_bytes` is compared, so a change in a reserved bit counts.
    pub fn differs(&self, other: &Self) -> bool {
        self.raw_bytes
            .iter()
            .zip(other.raw_bytes.iter())
            .any(|(a, b)| a != b)
    }
}

/// Decode one F710 DirectInput report.
///
/// # Errors
///
/// Returns [`DecodeError::LengthMismatch`] unless `raw` is exactly
/// [`REPORT_LEN`] bytes. Byte values are never rejected.
pub fn decode(raw: &[u8]) -> DecodeResult<ControllerSnapshot> {
    let Ok(report) = <&[u8; REPORT_LEN]>::try_from(raw) else {
        return Err(DecodeError::LengthMismatch {
            expected: REPORT_LEN,
            actual: raw.len(),
        });
    };
    Ok(ControllerSnapshot::from_report(report))
}

/// Free-function form of [`ControllerSnapshot::duplicate`].
pub fn duplicate(snapshot: &ControllerSnapshot) -> ControllerSnapshot {
    snapshot.duplicate()
}

/// Free-function form of [`ControllerSnapshot::differs`].
pub fn differs(a: &ControllerSnapshot, b: &ControllerSnapshot) -> bool {
    a.differs(b)
}
