//! Operating modes of the device and which commands they accept.
//!
//! The device does not report rejected commands, it simply ignores them. The
//! driver itself does not track the mode; this table is for callers that want to
//! know in advance whether a command will have an effect.

use crate::commands::Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMode {
    /// After power-up, reset or stop.
    #[default]
    Idle,
    Measuring,
    /// Low-power measurement of RH/T/VOC/NOx.
    MeasuringWithoutPm,
}

impl DeviceMode {
    pub fn is_measuring(&self) -> bool {
        !matches!(self, DeviceMode::Idle)
    }

    /// Whether the device acts on `opcode` in this mode.
    ///
    /// Getters sharing their opcode with a restricted setter are reported as
    /// restricted too; reading is accepted in every mode.
    pub fn takes_effect(&self, opcode: Opcode) -> bool {
        match opcode {
            Opcode::VocAlgorithmTuningParameters
            | Opcode::NoxAlgorithmTuningParameters
            | Opcode::VocAlgorithmState => *self == DeviceMode::Idle,
            Opcode::StartFanCleaning => *self == DeviceMode::Measuring,
            Opcode::StartMeasurement => *self != DeviceMode::Measuring,
            Opcode::StartMeasurementWithoutPm => *self != DeviceMode::MeasuringWithoutPm,
            _ => true,
        }
    }

    /// Mode after the device executed `opcode`.
    pub fn after(self, opcode: Opcode) -> DeviceMode {
        match opcode {
            Opcode::StartMeasurement => DeviceMode::Measuring,
            Opcode::StartMeasurementWithoutPm => DeviceMode::MeasuringWithoutPm,
            Opcode::StopMeasurement | Opcode::DeviceReset => DeviceMode::Idle,
            _ => self,
        }
    }
}
