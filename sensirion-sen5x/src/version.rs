use core::fmt;

use getset::CopyGetters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[get_copy = "pub"]
pub struct FirmwareVersion {
    major: u8,
    minor: u8,
    /// `false` for official releases.
    debug: bool,
}

impl FirmwareVersion {
    pub const fn new(major: u8, minor: u8, debug: bool) -> Self {
        Self {
            major,
            minor,
            debug,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.debug {
            f.write_str("-debug")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[get_copy = "pub"]
pub struct HardwareVersion {
    major: u8,
    minor: u8,
}

impl HardwareVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for HardwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Version of the I2C protocol spoken by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[get_copy = "pub"]
pub struct ProtocolVersion {
    major: u8,
    minor: u8,
}

impl ProtocolVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Response of the "Get Version" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[get_copy = "pub"]
pub struct Version {
    firmware: FirmwareVersion,
    hardware: HardwareVersion,
    protocol: ProtocolVersion,
}

impl Version {
    pub const fn new(
        firmware: FirmwareVersion,
        hardware: HardwareVersion,
        protocol: ProtocolVersion,
    ) -> Self {
        Self {
            firmware,
            hardware,
            protocol,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Firmware {}, Hardware {}, Protocol {}",
            self.firmware, self.hardware, self.protocol
        )
    }
}
