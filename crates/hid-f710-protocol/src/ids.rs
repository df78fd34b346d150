//! Logitech F710 USB vendor and product ID constants.

#![deny(static_mut_refs)]

/// Logitech USB vendor ID.
pub const LOGITECH_VENDOR_ID: u16 = 0x046D;

/// Product IDs the F710 enumerates with, selected by the switch on the pad.
pub mod product_ids {
    /// DirectInput mode ("D" switch position). Sends the 8-byte report decoded here.
    pub const F710_DINPUT: u16 = 0xC219;
    /// XInput mode ("X" switch position). Uses the Xbox 360 wire format instead.
    pub const F710_XINPUT: u16 = 0xC21F;
}

/// Whether a device speaks the DirectInput report this crate decodes.
pub fn is_f710_dinput(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == LOGITECH_VENDOR_ID && product_id == product_ids::F710_DINPUT
}

/// Whether a device is an F710 in either switch position.
pub fn is_f710(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == LOGITECH_VENDOR_ID
        && matches!(
            product_id,
            product_ids::F710_DINPUT | product_ids::F710_XINPUT
        )
}
