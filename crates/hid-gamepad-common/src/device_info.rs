//! Device information types for HID devices

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl HidDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Device reached through a path only, e.g. a hidraw node opened by hand.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::new(0, 0, path)
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    /// `vvvv:pppp` in lower-case hex, the form `lsusb` prints.
    pub fn usb_id(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| self.usb_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_creation() {
        let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw0");
        assert_eq!(info.vendor_id, 0x046D);
        assert_eq!(info.product_id, 0xC219);
        assert!(info.matches(0x046D, 0xC219));
        assert!(!info.matches(0x046D, 0xC21F));
    }

    #[test]
    fn test_device_info_display_name() {
        let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw0")
            .with_product_name("Logitech Cordless RumblePad 2");
        assert_eq!(info.display_name(), "Logitech Cordless RumblePad 2");

        let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw0").with_manufacturer("Logitech");
        assert_eq!(info.display_name(), "Logitech");

        let info = HidDeviceInfo::new(0x046D, 0xC219, "/dev/hidraw0");
        assert_eq!(info.display_name(), "046d:c219");
    }

    #[test]
    fn test_from_path_has_zero_ids() {
        let info = HidDeviceInfo::from_path("/dev/hidraw3");
        assert_eq!(info.usb_id(), "0000:0000");
        assert_eq!(info.path, "/dev/hidraw3");
        assert!(info.serial_number.is_none());
    }
}
