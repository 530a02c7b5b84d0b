//! Driver for the Sensirion SEN5x environmental sensor node (SEN50, SEN54, SEN55).
//!
//! The crate is split into the command codec ([`commands`]), the typed responses
//! ([`values`], [`measured_values`], [`status`], [`version`], [`parameters`]) and a
//! thin facade ([`Sen5x`]) which sends one command per method call. Framing and
//! CRC handling belong to the [`Transport`], [`SensirionI2c`] being the
//! implementation for `embedded-hal` I2C buses.
//!
//! There is no caching and no retrying: every call is exactly one exchange with
//! the device.
#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod device;
mod i2c;
pub mod measured_values;
pub mod parameters;
pub mod state;
pub mod status;
pub mod values;
pub mod version;

pub use device::Sen5x;
pub use i2c::{SensirionCrc, SensirionI2c};
pub use measured_values::MeasuredValues;
pub use parameters::{
    AlgorithmTuningParameters, Scaling, TemperatureOffsetParameters, VocAlgorithmState, WarmStart,
};
pub use status::DeviceStatus;
pub use values::{AirQualityIndex, Humidity, MassConcentration, Scaled, Temperature};
pub use version::{FirmwareVersion, HardwareVersion, ProtocolVersion, Version};

/// I2C address of every SEN5x.
pub const DEFAULT_ADDRESS: u8 = 0x69;

pub enum Error<Inner: core::fmt::Debug> {
    Bus(Inner),
    Parsing(ParsingError),
}

impl<E: core::fmt::Debug> core::fmt::Debug for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => f.debug_tuple("Bus").field(e).finish(),
            Error::Parsing(e) => f.debug_tuple("Parsing").field(e).finish(),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Parsing(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug + defmt::Format> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Bus(e) => e.format(fmt),
            Error::Parsing(e) => e.format(fmt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParsingError {
    /// A received word did not match its checksum.
    Crc,
    /// Payload or response length cannot be framed into CRC-protected words.
    InvalidLength,
}

impl core::fmt::Display for ParsingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParsingError::Crc => f.write_str("checksum mismatch"),
            ParsingError::InvalidLength => f.write_str("invalid frame length"),
        }
    }
}

impl<T: core::fmt::Debug> From<ParsingError> for Error<T> {
    fn from(e: ParsingError) -> Self {
        Error::Parsing(e)
    }
}

impl<E: core::fmt::Debug> Error<E> {
    /// `true` if the exchange failed because of a corrupted word.
    pub fn is_checksum_error(&self) -> bool {
        matches!(self, Error::Parsing(ParsingError::Crc))
    }
}

/// The link to the device.
///
/// Implementations add framing and integrity checks on top of the raw command
/// and payload bytes and report corruption as [`ParsingError::Crc`]. They must
/// deliver exactly `response.len()` payload bytes or fail.
pub trait Transport {
    type Error: core::fmt::Debug;

    fn transmit(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
    ) -> Result<(), Error<Self::Error>>;

    fn transmit_and_receive(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
        response: &mut [u8],
    ) -> Result<(), Error<Self::Error>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transmit(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
    ) -> Result<(), Error<Self::Error>> {
        (**self).transmit(address, command, payload, execution_time_ms)
    }

    fn transmit_and_receive(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
        response: &mut [u8],
    ) -> Result<(), Error<Self::Error>> {
        (**self).transmit_and_receive(address, command, payload, execution_time_ms, response)
    }
}
