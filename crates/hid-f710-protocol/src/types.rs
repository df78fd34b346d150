//! Named controls of the F710 and where they live in the report.

use crate::layout::{face_bits, offsets, shoulder_bits, toggle_bits};
use serde::{Deserialize, Serialize};

/// D-pad state carried in the low nibble of byte 5.
///
/// The pad encodes the eight compass points as 0..=7 clockwise from up and
/// uses 8 for "nothing pressed", so opposite directions can never be reported
/// together. The remaining nibble values are never sent by real hardware and
/// are kept as [`DpadDirection::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DpadDirection {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    #[default]
    Neutral,
    Reserved(u8),
}

impl DpadDirection {
    pub const NEUTRAL_VALUE: u8 = 8;

    pub fn from_nibble(value: u8) -> Self {
        match value {
            0 => DpadDirection::Up,
            1 => DpadDirection::UpRight,
            2 => DpadDirection::Right,
            3 => DpadDirection::DownRight,
            4 => DpadDirection::Down,
            5 => DpadDirection::DownLeft,
            6 => DpadDirection::Left,
            7 => DpadDirection::UpLeft,
            8 => DpadDirection::Neutral,
            other => DpadDirection::Reserved(other),
        }
    }

    /// Inverse of [`DpadDirection::from_nibble`].
    pub fn to_nibble(self) -> u8 {
        match self {
            DpadDirection::Up => 0,
            DpadDirection::UpRight => 1,
            DpadDirection::Right => 2,
            DpadDirection::DownRight => 3,
            DpadDirection::Down => 4,
            DpadDirection::DownLeft => 5,
            DpadDirection::Left => 6,
            DpadDirection::UpLeft => 7,
            DpadDirection::Neutral => Self::NEUTRAL_VALUE,
            DpadDirection::Reserved(value) => value,
        }
    }

    pub fn is_pressed(self) -> bool {
        !matches!(self, DpadDirection::Neutral | DpadDirection::Reserved(_))
    }
}

/// Momentary buttons, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    X,
    A,
    B,
    Y,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Back,
    Start,
    LeftStick,
    RightStick,
}

impl Button {
    pub const ALL: [Button; 12] = [
        Button::X,
        Button::A,
        Button::B,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::Back,
        Button::Start,
        Button::LeftStick,
        Button::RightStick,
    ];

    /// `(byte offset, bit position)` of the button in the report.
    pub const fn location(self) -> (usize, u8) {
        match self {
            Button::X => (offsets::DPAD_FACE, face_bits::X),
            Button::A => (offsets::DPAD_FACE, face_bits::A),
            Button::B => (offsets::DPAD_FACE, face_bits::B),
            Button::Y => (offsets::DPAD_FACE, face_bits::Y),
            Button::LeftBumper => (offsets::SHOULDER_MENU, shoulder_bits::LEFT_BUMPER),
            Button::RightBumper => (offsets::SHOULDER_MENU, shoulder_bits::RIGHT_BUMPER),
            Button::LeftTrigger => (offsets::SHOULDER_MENU, shoulder_bits::LEFT_TRIGGER),
            Button::RightTrigger => (offsets::SHOULDER_MENU, shoulder_bits::RIGHT_TRIGGER),
            Button::Back => (offsets::SHOULDER_MENU, shoulder_bits::BACK),
            Button::Start => (offsets::SHOULDER_MENU, shoulder_bits::START),
            Button::LeftStick => (offsets::SHOULDER_MENU, shoulder_bits::LEFT_STICK),
            Button::RightStick => (offsets::SHOULDER_MENU, shoulder_bits::RIGHT_STICK),
        }
    }
}

/// Latched controls. Each press flips the stored state on the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toggle {
    Mode,
    Vibrate,
}

impl Toggle {
    pub const ALL: [Toggle; 2] = [Toggle::Mode, Toggle::Vibrate];

    pub const fn location(self) -> (usize, u8) {
        match self {
            Toggle::Mode => (offsets::TOGGLES, toggle_bits::MODE),
            Toggle::Vibrate => (offsets::TOGGLES, toggle_bits::VIBRATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dpad_nibble_mapping() {
        assert_eq!(DpadDirection::from_nibble(0), DpadDirection::Up);
        assert_eq!(DpadDirection::from_nibble(2), DpadDirection::Right);
        assert_eq!(DpadDirection::from_nibble(4), DpadDirection::Down);
        assert_eq!(DpadDirection::from_nibble(6), DpadDirection::Left);
        assert_eq!(DpadDirection::from_nibble(8), DpadDirection::Neutral);
        assert_eq!(DpadDirection::from_nibble(9), DpadDirection::Reserved(9));
        assert_eq!(DpadDirection::from_nibble(15), DpadDirection::Reserved(15));
    }

    #[test]
    fn test_dpad_nibble_inverse() {
        for value in 0u8..16 {
            assert_eq!(DpadDirection::from_nibble(value).to_nibble(), value);
        }
    }

    #[test]
    fn test_dpad_pressed() {
        assert!(DpadDirection::UpLeft.is_pressed());
        assert!(!DpadDirection::Neutral.is_pressed());
        assert!(!DpadDirection::Reserved(12).is_pressed());
    }

    #[test]
    fn test_button_locations_unique() {
        let locations: HashSet<_> = Button::ALL.iter().map(|b| b.location()).collect();
        assert_eq!(locations.len(), Button::ALL.len());
        for toggle in Toggle::ALL {
            assert!(!locations.contains(&toggle.location()));
        }
    }
}
