//! Byte offsets and bit positions of the F710 DirectInput report.
//!
//! | Byte | Contents                                                   |
//! |------|------------------------------------------------------------|
//! | 0    | report ID / reserved                                       |
//! | 1–4  | left X, left Y, right X, right Y (0..255, 128 = center)    |
//! | 5    | D-pad nibble (bits 0–3), X A B Y (bits 4–7)                |
//! | 6    | LB RB LT RT Back Start LS RS (bits 0–7)                    |
//! | 7    | mode toggle (bit 3), vibrate toggle (bit 5), rest reserved |

#![deny(static_mut_refs)]

/// Length of every DirectInput input report.
pub const REPORT_LEN: usize = 8;

/// Byte offsets inside the report.
pub mod offsets {
    pub const REPORT_ID: usize = 0;
    pub const LEFT_STICK_X: usize = 1;
    pub const LEFT_STICK_Y: usize = 2;
    pub const RIGHT_STICK_X: usize = 3;
    pub const RIGHT_STICK_Y: usize = 4;
    pub const DPAD_FACE: usize = 5;
    pub const SHOULDER_MENU: usize = 6;
    pub const TOGGLES: usize = 7;
}

/// Mask of the D-pad value in [`offsets::DPAD_FACE`].
pub const DPAD_MASK: u8 = 0x0F;

/// Bit positions in [`offsets::DPAD_FACE`].
pub mod face_bits {
    pub const X: u8 = 4;
    pub const A: u8 = 5;
    pub const B: u8 = 6;
    pub const Y: u8 = 7;
}

/// Bit positions in [`offsets::SHOULDER_MENU`].
pub mod shoulder_bits {
    pub const LEFT_BUMPER: u8 = 0;
    pub const RIGHT_BUMPER: u8 = 1;
    pub const LEFT_TRIGGER: u8 = 2;
    pub const RIGHT_TRIGGER: u8 = 3;
    pub const BACK: u8 = 4;
    pub const START: u8 = 5;
    pub const LEFT_STICK: u8 = 6;
    pub const RIGHT_STICK: u8 = 7;
}

/// Bit positions in [`offsets::TOGGLES`].
///
/// Both toggles are latched on the pad itself; the report carries the
/// current latch state.
pub mod toggle_bits {
    pub const MODE: u8 = 3;
    pub const VIBRATE: u8 = 5;
}

/// Bits of [`offsets::TOGGLES`] with no known meaning.
pub const TOGGLES_RESERVED_MASK: u8 = !((1 << toggle_bits::MODE) | (1 << toggle_bits::VIBRATE));

/// Whether bit `position` (0 = LSB) of `byte` is set.
///
/// Positions above 7 are never set.
#[inline]
pub const fn bit_set(byte: u8, position: u8) -> bool {
    match 1u8.checked_shl(position as u32) {
        Some(mask) => byte & mask != 0,
        None => false,
    }
}
