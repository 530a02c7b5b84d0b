//! One definition per SEN5x I2C command.
//!
//! Every command knows its opcode, how to encode its arguments and how to decode
//! the payload of its response (CRC bytes already removed by the transport).
//! Arguments are not range checked: the device silently ignores out-of-range
//! values, and so does this codec.

use heapless::String;

use crate::measured_values::MeasuredValues;
use crate::parameters::{
    AlgorithmTuningParameters, Scaling, TemperatureOffsetParameters, VocAlgorithmState, WarmStart,
};
use crate::status::DeviceStatus;
use crate::version::{FirmwareVersion, HardwareVersion, ProtocolVersion, Version};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    StartMeasurement = 0x0021,
    StartMeasurementWithoutPm = 0x0037,
    StopMeasurement = 0x0104,
    ReadDataReady = 0x0202,
    ReadMeasuredValues = 0x03c4,
    TemperatureOffsetParameters = 0x60b2,
    WarmStartParameter = 0x60c6,
    VocAlgorithmTuningParameters = 0x60d0,
    NoxAlgorithmTuningParameters = 0x60e1,
    RhtAccelerationMode = 0x60f7,
    VocAlgorithmState = 0x6181,
    StartFanCleaning = 0x5607,
    FanAutoCleaningInterval = 0x8004,
    ProductName = 0xd014,
    SerialNumber = 0xd033,
    Version = 0xd100,
    ReadDeviceStatus = 0xd206,
    ReadAndClearDeviceStatus = 0xd210,
    DeviceReset = 0xd304,
}

impl Opcode {
    pub const ALL: [Opcode; 19] = [
        Opcode::StartMeasurement,
        Opcode::StartMeasurementWithoutPm,
        Opcode::StopMeasurement,
        Opcode::ReadDataReady,
        Opcode::ReadMeasuredValues,
        Opcode::TemperatureOffsetParameters,
        Opcode::WarmStartParameter,
        Opcode::VocAlgorithmTuningParameters,
        Opcode::NoxAlgorithmTuningParameters,
        Opcode::RhtAccelerationMode,
        Opcode::VocAlgorithmState,
        Opcode::StartFanCleaning,
        Opcode::FanAutoCleaningInterval,
        Opcode::ProductName,
        Opcode::SerialNumber,
        Opcode::Version,
        Opcode::ReadDeviceStatus,
        Opcode::ReadAndClearDeviceStatus,
        Opcode::DeviceReset,
    ];

    pub fn raw(&self) -> u16 {
        *self as u16
    }

    pub fn from_raw(raw: u16) -> Option<Opcode> {
        Self::ALL.iter().copied().find(|opcode| opcode.raw() == raw)
    }
}

/// Encoding and decoding rules of a single command.
///
/// `Buffer` is the fixed-size response payload, a zero-length array for
/// commands without response.
pub trait Command {
    type Response;
    type Payload: AsRef<[u8]>;
    type Buffer: AsRef<[u8]> + AsMut<[u8]> + Default;

    const OPCODE: Opcode;
    /// Time the device needs before it accepts the read or the next command.
    const EXECUTION_TIME_MS: u32;

    fn encode(&self) -> Self::Payload;

    fn decode(&self, data: &Self::Buffer) -> Self::Response;

    /// Response payload length, `None` for send-only commands.
    fn response_len(&self) -> Option<usize> {
        let len = Self::Buffer::default().as_ref().len();
        (len > 0).then_some(len)
    }
}

macro_rules! action {
    ($(#[$meta:meta])* $name:ident, $opcode:ident, $execution_time_ms:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name;

        impl Command for $name {
            type Response = ();
            type Payload = [u8; 0];
            type Buffer = [u8; 0];

            const OPCODE: Opcode = Opcode::$opcode;
            const EXECUTION_TIME_MS: u32 = $execution_time_ms;

            fn encode(&self) -> [u8; 0] {
                []
            }

            fn decode(&self, _: &[u8; 0]) {}
        }
    };
}

action!(
    /// Starts a continuous measurement, first results are available after ~1 s.
    StartMeasurement,
    StartMeasurement,
    50
);
action!(
    /// Starts a continuous measurement of RH/T/VOC/NOx only (low-power).
    /// Not supported by SEN50.
    StartMeasurementWithoutPm,
    StartMeasurementWithoutPm,
    50
);
action!(
    /// Returns to idle mode, no effect if already idle.
    StopMeasurement,
    StopMeasurement,
    200
);
action!(
    /// Runs the fan at maximum speed for a few seconds. Only has an effect while
    /// measuring with PM enabled and no cleaning is running.
    StartFanCleaning,
    StartFanCleaning,
    20
);
action!(
    /// Reboots the firmware, reverting all volatile configuration.
    DeviceReset,
    DeviceReset,
    100
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetProductName;

impl Command for GetProductName {
    type Response = String<32>;
    type Payload = [u8; 0];
    type Buffer = [u8; 32];

    const OPCODE: Opcode = Opcode::ProductName;
    const EXECUTION_TIME_MS: u32 = 50;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 32]) -> String<32> {
        raw_data_processing::parse_string(data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetSerialNumber;

impl Command for GetSerialNumber {
    type Response = String<32>;
    type Payload = [u8; 0];
    type Buffer = [u8; 32];

    const OPCODE: Opcode = Opcode::SerialNumber;
    const EXECUTION_TIME_MS: u32 = 50;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 32]) -> String<32> {
        raw_data_processing::parse_string(data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetVersion;

impl Command for GetVersion {
    type Response = Version;
    type Payload = [u8; 0];
    type Buffer = [u8; 8];

    const OPCODE: Opcode = Opcode::Version;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 8]) -> Version {
        let [fw_major, fw_minor, fw_debug, hw_major, hw_minor, proto_major, proto_minor, _] = *data;
        Version::new(
            FirmwareVersion::new(fw_major, fw_minor, fw_debug != 0),
            HardwareVersion::new(hw_major, hw_minor),
            ProtocolVersion::new(proto_major, proto_minor),
        )
    }
}

/// Reads the status register without clearing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadDeviceStatus;

impl Command for ReadDeviceStatus {
    type Response = DeviceStatus;
    type Payload = [u8; 0];
    type Buffer = [u8; 4];

    const OPCODE: Opcode = Opcode::ReadDeviceStatus;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 4]) -> DeviceStatus {
        DeviceStatus::new(u32::from_be_bytes(*data))
    }
}

/// Reads the status register and clears all flags afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadAndClearDeviceStatus;

impl Command for ReadAndClearDeviceStatus {
    type Response = DeviceStatus;
    type Payload = [u8; 0];
    type Buffer = [u8; 4];

    const OPCODE: Opcode = Opcode::ReadAndClearDeviceStatus;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 4]) -> DeviceStatus {
        DeviceStatus::new(u32::from_be_bytes(*data))
    }
}

/// `true` once new results are ready; reset by reading them. Stays `false`
/// while no measurement is running and during fan cleaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadDataReady;

impl Command for ReadDataReady {
    type Response = bool;
    type Payload = [u8; 0];
    type Buffer = [u8; 2];

    const OPCODE: Opcode = Opcode::ReadDataReady;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 2]) -> bool {
        let [_padding, ready] = *data;
        ready != 0
    }
}

/// Latest results; the previous ones again if nothing new is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadMeasuredValues;

impl Command for ReadMeasuredValues {
    type Response = MeasuredValues;
    type Payload = [u8; 0];
    type Buffer = [u8; 16];

    const OPCODE: Opcode = Opcode::ReadMeasuredValues;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 16]) -> MeasuredValues {
        raw_data_processing::parse_measured_values(data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetTemperatureOffsetParameters {
    pub scaling: Scaling,
}

impl Command for GetTemperatureOffsetParameters {
    type Response = TemperatureOffsetParameters;
    type Payload = [u8; 0];
    type Buffer = [u8; 6];

    const OPCODE: Opcode = Opcode::TemperatureOffsetParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 6]) -> TemperatureOffsetParameters {
        let [offset, slope, time_constant] = raw_data_processing::unpack::<3>(data);
        TemperatureOffsetParameters::from_raw(
            offset as i16,
            slope as i16,
            time_constant,
            self.scaling,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetTemperatureOffsetParameters {
    pub parameters: TemperatureOffsetParameters,
}

impl Command for SetTemperatureOffsetParameters {
    type Response = ();
    type Payload = [u8; 6];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::TemperatureOffsetParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 6] {
        let (offset, slope, time_constant) = self.parameters.to_raw();
        raw_data_processing::pack(&[offset as u16, slope as u16, time_constant])
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetWarmStartParameter {
    pub scaling: Scaling,
}

impl Command for GetWarmStartParameter {
    type Response = WarmStart;
    type Payload = [u8; 0];
    type Buffer = [u8; 2];

    const OPCODE: Opcode = Opcode::WarmStartParameter;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 2]) -> WarmStart {
        WarmStart::from_raw(u16::from_be_bytes(*data), self.scaling)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetWarmStartParameter {
    pub warm_start: WarmStart,
}

impl Command for SetWarmStartParameter {
    type Response = ();
    type Payload = [u8; 2];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::WarmStartParameter;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 2] {
        self.warm_start.to_raw().to_be_bytes()
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetRhtAccelerationMode;

impl Command for GetRhtAccelerationMode {
    type Response = u16;
    type Payload = [u8; 0];
    type Buffer = [u8; 2];

    const OPCODE: Opcode = Opcode::RhtAccelerationMode;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 2]) -> u16 {
        u16::from_be_bytes(*data)
    }
}

/// Adapts the RH/T acceleration to the thermal behavior of the design-in:
/// 0 = default / air purifier / IAQ (slow), 1 = IAQ (fast), 2 = IAQ (medium).
/// Applied when the next measurement starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetRhtAccelerationMode {
    pub mode: u16,
}

impl Command for SetRhtAccelerationMode {
    type Response = ();
    type Payload = [u8; 2];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::RhtAccelerationMode;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 2] {
        self.mode.to_be_bytes()
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetVocAlgorithmTuningParameters;

impl Command for GetVocAlgorithmTuningParameters {
    type Response = AlgorithmTuningParameters;
    type Payload = [u8; 0];
    type Buffer = [u8; 12];

    const OPCODE: Opcode = Opcode::VocAlgorithmTuningParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 12]) -> AlgorithmTuningParameters {
        AlgorithmTuningParameters::from_words(raw_data_processing::unpack(data))
    }
}

/// Only has an effect in idle mode with every value inside the device limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetVocAlgorithmTuningParameters {
    pub parameters: AlgorithmTuningParameters,
}

impl Command for SetVocAlgorithmTuningParameters {
    type Response = ();
    type Payload = [u8; 12];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::VocAlgorithmTuningParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 12] {
        raw_data_processing::pack(&self.parameters.to_words())
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetNoxAlgorithmTuningParameters;

impl Command for GetNoxAlgorithmTuningParameters {
    type Response = AlgorithmTuningParameters;
    type Payload = [u8; 0];
    type Buffer = [u8; 12];

    const OPCODE: Opcode = Opcode::NoxAlgorithmTuningParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 12]) -> AlgorithmTuningParameters {
        AlgorithmTuningParameters::from_words(raw_data_processing::unpack(data))
    }
}

/// Only has an effect in idle mode with every value inside the device limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetNoxAlgorithmTuningParameters {
    pub parameters: AlgorithmTuningParameters,
}

impl Command for SetNoxAlgorithmTuningParameters {
    type Response = ();
    type Payload = [u8; 12];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::NoxAlgorithmTuningParameters;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 12] {
        raw_data_processing::pack(&self.parameters.to_words())
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetVocAlgorithmState;

impl Command for GetVocAlgorithmState {
    type Response = VocAlgorithmState;
    type Payload = [u8; 0];
    type Buffer = [u8; 8];

    const OPCODE: Opcode = Opcode::VocAlgorithmState;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 8]) -> VocAlgorithmState {
        *data
    }
}

/// Only has an effect in idle mode; applied once when the next measurement starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetVocAlgorithmState {
    pub state: VocAlgorithmState,
}

impl Command for SetVocAlgorithmState {
    type Response = ();
    type Payload = VocAlgorithmState;
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::VocAlgorithmState;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> VocAlgorithmState {
        self.state
    }

    fn decode(&self, _: &[u8; 0]) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetFanAutoCleaningInterval;

impl Command for GetFanAutoCleaningInterval {
    type Response = u32;
    type Payload = [u8; 0];
    type Buffer = [u8; 4];

    const OPCODE: Opcode = Opcode::FanAutoCleaningInterval;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 0] {
        []
    }

    fn decode(&self, data: &[u8; 4]) -> u32 {
        u32::from_be_bytes(*data)
    }
}

/// Interval in seconds of fan run time, zero disables auto cleaning.
/// Defaults to 604800 (one week).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetFanAutoCleaningInterval {
    pub interval_s: u32,
}

impl Command for SetFanAutoCleaningInterval {
    type Response = ();
    type Payload = [u8; 4];
    type Buffer = [u8; 0];

    const OPCODE: Opcode = Opcode::FanAutoCleaningInterval;
    const EXECUTION_TIME_MS: u32 = 20;

    fn encode(&self) -> [u8; 4] {
        self.interval_s.to_be_bytes()
    }

    fn decode(&self, _: &[u8; 0]) {}
}

mod raw_data_processing {
    use super::*;

    pub(super) fn pack<const BYTES: usize>(words: &[u16]) -> [u8; BYTES] {
        let mut buffer = [0u8; BYTES];
        for (target, word) in buffer.chunks_exact_mut(2).zip(words) {
            target.copy_from_slice(&word.to_be_bytes());
        }
        buffer
    }

    pub(super) fn unpack<const WORDS: usize>(data: &[u8]) -> [u16; WORDS] {
        let mut words = [0u16; WORDS];
        for (word, bytes) in words.iter_mut().zip(data.chunks_exact(2)) {
            *word = u16::from_be_bytes([bytes[0], bytes[1]]);
        }
        words
    }

    pub(super) fn parse_measured_values(data: &[u8; 16]) -> MeasuredValues {
        let [pm1_0, pm2_5, pm4_0, pm10_0, humidity, temperature, voc, nox] = unpack::<8>(data);
        MeasuredValues::from_ticks(
            pm1_0,
            pm2_5,
            pm4_0,
            pm10_0,
            humidity as i16,
            temperature as i16,
            voc as i16,
            nox as i16,
        )
    }

    /// NUL-terminated ASCII; the longest valid UTF-8 prefix if the device sends garbage.
    pub(super) fn parse_string(data: &[u8; 32]) -> String<32> {
        let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
        let bytes = &data[..end];
        let text = match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        };
        String::try_from(text).unwrap_or_default()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes() {
        assert_eq!(Opcode::StartMeasurement.raw(), 0x0021);
        assert_eq!(Opcode::ReadMeasuredValues.raw(), 0x03c4);
        assert_eq!(Opcode::DeviceReset.raw(), 0xd304);
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::from_raw(opcode.raw()), Some(opcode));
        }
        assert_eq!(Opcode::from_raw(0x1234), None);
    }

    #[test]
    fn response_lengths() {
        assert_eq!(StartMeasurement.response_len(), None);
        assert_eq!(SetFanAutoCleaningInterval { interval_s: 1 }.response_len(), None);
        assert_eq!(ReadDataReady.response_len(), Some(2));
        assert_eq!(ReadMeasuredValues.response_len(), Some(16));
        assert_eq!(GetProductName.response_len(), Some(32));
        assert_eq!(GetVersion.response_len(), Some(8));
    }

    #[test]
    fn data_ready_ignores_padding() {
        assert!(ReadDataReady.decode(&[0x00, 0x01]));
        assert!(!ReadDataReady.decode(&[0x01, 0x00]));
        assert!(!ReadDataReady.decode(&[0xff, 0x00]));
    }

    #[test]
    fn version() {
        let version = GetVersion.decode(&[2, 1, 0, 4, 0, 1, 0, 0xaa]);
        assert_eq!(version.firmware(), FirmwareVersion::new(2, 1, false));
        assert_eq!(version.hardware(), HardwareVersion::new(4, 0));
        assert_eq!(version.protocol(), ProtocolVersion::new(1, 0));

        let debug = GetVersion.decode(&[2, 1, 1, 4, 0, 1, 0, 0]);
        assert!(debug.firmware().debug());
    }

    #[test]
    fn device_status() {
        let status = ReadDeviceStatus.decode(&[0x00, 0x08, 0x00, 0x11]);
        assert_eq!(status.value(), 0x0008_0011);
        assert_eq!(status.flags().as_slice(), &["fan_error", "fan_cleaning"]);

        let cleared = ReadAndClearDeviceStatus.decode(&[0x00, 0x00, 0x00, 0x20]);
        assert!(cleared.laser_error());
    }

    #[test]
    fn temperature_offset_parameters() {
        let set = SetTemperatureOffsetParameters {
            parameters: TemperatureOffsetParameters::Physical {
                offset: 1.2,
                slope: 0.34,
                time_constant: 5.6,
            },
        };
        let payload = set.encode();
        assert_eq!(payload, [0x00, 0xf0, 0x0d, 0x48, 0x00, 0x06]);

        let raw = GetTemperatureOffsetParameters {
            scaling: Scaling::Raw,
        };
        assert_eq!(
            raw.decode(&payload),
            TemperatureOffsetParameters::Raw {
                offset: 240,
                slope: 3400,
                time_constant: 6
            }
        );

        let physical = GetTemperatureOffsetParameters::default();
        assert_eq!(
            physical.decode(&payload),
            TemperatureOffsetParameters::Physical {
                offset: 1.2,
                slope: 0.34,
                time_constant: 6.0
            }
        );
    }

    #[test]
    fn negative_temperature_offset() {
        let set = SetTemperatureOffsetParameters {
            parameters: TemperatureOffsetParameters::Raw {
                offset: -200,
                slope: -1,
                time_constant: 0,
            },
        };
        let payload = set.encode();
        assert_eq!(payload, [0xff, 0x38, 0xff, 0xff, 0x00, 0x00]);

        let get = GetTemperatureOffsetParameters {
            scaling: Scaling::Physical,
        };
        match get.decode(&payload) {
            TemperatureOffsetParameters::Physical { offset, slope, .. } => {
                assert_eq!(offset, -1.0);
                assert_eq!(slope, -0.0001);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn warm_start_parameter() {
        let set = SetWarmStartParameter {
            warm_start: WarmStart::Normalized(0.8),
        };
        let payload = set.encode();
        assert_eq!(u16::from_be_bytes(payload), 52428);

        let raw = GetWarmStartParameter {
            scaling: Scaling::Raw,
        };
        assert_eq!(raw.decode(&payload), WarmStart::Raw(52428));
    }

    #[test]
    fn tuning_parameters_are_passed_through() {
        let parameters = AlgorithmTuningParameters::new(110, 16, 12, 90, 40, 200);
        let payload = SetVocAlgorithmTuningParameters { parameters }.encode();
        assert_eq!(payload, [0, 110, 0, 16, 0, 12, 0, 90, 0, 40, 0, 200]);
        assert_eq!(GetVocAlgorithmTuningParameters.decode(&payload), parameters);

        // out of range values are encoded anyway
        let out_of_range = AlgorithmTuningParameters::new(0, 5000, 12, 9000, 50, 0);
        let payload = SetNoxAlgorithmTuningParameters {
            parameters: out_of_range,
        }
        .encode();
        assert_eq!(GetNoxAlgorithmTuningParameters.decode(&payload), out_of_range);
    }

    #[test]
    fn voc_state_is_opaque() {
        let state = [1, 2, 3, 4, 5, 6, 7, 8];
        let payload = SetVocAlgorithmState { state }.encode();
        assert_eq!(payload, state);
        assert_eq!(GetVocAlgorithmState.decode(&payload), state);
    }

    #[test]
    fn fan_auto_cleaning_interval() {
        let payload = SetFanAutoCleaningInterval { interval_s: 604800 }.encode();
        assert_eq!(payload, [0x00, 0x09, 0x3a, 0x80]);
        assert_eq!(GetFanAutoCleaningInterval.decode(&payload), 604800);
    }

    #[test]
    fn rht_acceleration_mode() {
        let payload = SetRhtAccelerationMode { mode: 2 }.encode();
        assert_eq!(payload, [0x00, 0x02]);
        assert_eq!(GetRhtAccelerationMode.decode(&payload), 2);
    }

    #[test]
    fn decoding_is_repeatable() {
        let data = [0, 11, 0, 22, 0, 33, 0, 44, 0, 55, 0, 66, 0, 77, 0, 88];
        assert_eq!(
            ReadMeasuredValues.decode(&data),
            ReadMeasuredValues.decode(&data)
        );
    }
}
