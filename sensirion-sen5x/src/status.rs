use core::fmt;

use heapless::Vec;

/// Flag names paired with their bit position, ascending.
const FLAGS: [(u8, &str); 6] = [
    (4, "fan_error"),
    (5, "laser_error"),
    (6, "sht_error"),
    (7, "sgp_error"),
    (19, "fan_cleaning"),
    (21, "fan_speed_out_of_specs"),
];

/// Snapshot of the device status register.
///
/// Error flags are sticky on the device: they stay set until they are cleared
/// with `read_device_status(true)` or a device reset. All other flags follow
/// their trigger condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceStatus {
    value: u32,
}

impl DeviceStatus {
    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    /// The status word as received from the device.
    pub fn value(&self) -> u32 {
        self.value
    }

    fn bit(&self, index: u8) -> bool {
        self.value & (1 << index) != 0
    }

    pub fn fan_error(&self) -> bool {
        self.bit(4)
    }

    pub fn laser_error(&self) -> bool {
        self.bit(5)
    }

    pub fn sht_error(&self) -> bool {
        self.bit(6)
    }

    pub fn sgp_error(&self) -> bool {
        self.bit(7)
    }

    /// Fan cleaning is running right now.
    pub fn fan_cleaning(&self) -> bool {
        self.bit(19)
    }

    pub fn fan_speed_out_of_specs(&self) -> bool {
        self.bit(21)
    }

    /// Names of all set flags in ascending bit order.
    pub fn flags(&self) -> Vec<&'static str, 6> {
        FLAGS
            .iter()
            .filter(|(index, _)| self.bit(*index))
            .map(|(_, name)| *name)
            .collect()
    }

    pub fn is_ok(&self) -> bool {
        self.flags().is_empty()
    }
}

impl From<u32> for DeviceStatus {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X} [", self.value)?;
        let flags = self.flags();
        if flags.is_empty() {
            f.write_str("OK")?;
        }
        for (i, name) in flags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}
