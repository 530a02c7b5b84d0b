//! A SEN55 living in memory, reachable through `embedded_hal::i2c::I2c`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use sensirion_sen5x::commands::Opcode;
use sensirion_sen5x::state::DeviceMode;
use sensirion_sen5x::{AlgorithmTuningParameters, SensirionCrc, DEFAULT_ADDRESS};

pub const FAN_CLEANING: u32 = 1 << 19;
pub const FAN_ERROR: u32 = 1 << 4;
pub const LASER_ERROR: u32 = 1 << 5;

/// Reading reported while measuring: PM 1.1/2.2/3.3/4.4, 55 %RH, 22 °C, VOC 100, NOx 1.
pub const READING: [u16; 8] = [11, 22, 33, 44, 5500, 4400, 1000, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedError {
    Nack(NoAcknowledgeSource),
}

impl embedded_hal::i2c::Error for SimulatedError {
    fn kind(&self) -> ErrorKind {
        match self {
            SimulatedError::Nack(source) => ErrorKind::NoAcknowledge(*source),
        }
    }
}

#[derive(Debug, Clone)]
struct Settings {
    temperature_offset: [u16; 3],
    warm_start: u16,
    voc_tuning: AlgorithmTuningParameters,
    nox_tuning: AlgorithmTuningParameters,
    rht_acceleration_mode: u16,
    voc_state: [u8; 8],
    fan_auto_cleaning_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature_offset: [0; 3],
            warm_start: 0,
            voc_tuning: AlgorithmTuningParameters::voc_default(),
            nox_tuning: AlgorithmTuningParameters::nox_default(),
            rht_acceleration_mode: 0,
            voc_state: [0; 8],
            fan_auto_cleaning_interval: 604800,
        }
    }
}

#[derive(Debug)]
struct State {
    address: u8,
    mode: DeviceMode,
    settings: Settings,
    status: u32,
    data_ready: bool,
    product_name: Vec<u8>,
    serial_number: Vec<u8>,
    version: [u8; 8],
    /// Response words of the last read command, CRC not yet added.
    pending: Option<Vec<u8>>,
    corrupt_next_response: bool,
    commands: Vec<u16>,
}

/// Shared handle, clones talk to the same device.
#[derive(Debug, Clone)]
pub struct SimulatedSen5x {
    state: Rc<RefCell<State>>,
}

impl Default for SimulatedSen5x {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSen5x {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                address: DEFAULT_ADDRESS,
                mode: DeviceMode::Idle,
                settings: Settings::default(),
                status: 0,
                data_ready: false,
                product_name: b"SEN55".to_vec(),
                serial_number: b"8DB2A6E1F4C3D5B7".to_vec(),
                version: [2, 0, 0, 4, 0, 1, 0, 0],
                pending: None,
                corrupt_next_response: false,
                commands: Vec::new(),
            })),
        }
    }

    pub fn with_address(self, address: u8) -> Self {
        self.state.borrow_mut().address = address;
        self
    }

    pub fn mode(&self) -> DeviceMode {
        self.state.borrow().mode
    }

    pub fn raise_status(&self, bits: u32) {
        self.state.borrow_mut().status |= bits;
    }

    pub fn set_product_name(&self, name: &[u8]) {
        self.state.borrow_mut().product_name = name.to_vec();
    }

    pub fn corrupt_next_response(&self) {
        self.state.borrow_mut().corrupt_next_response = true;
    }

    /// Opcodes in the order they were received.
    pub fn commands(&self) -> Vec<u16> {
        self.state.borrow().commands.clone()
    }

    pub fn temperature_offset_words(&self) -> [u16; 3] {
        self.state.borrow().settings.temperature_offset
    }

    pub fn warm_start_word(&self) -> u16 {
        self.state.borrow().settings.warm_start
    }
}

impl State {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SimulatedError> {
        let data_nack = SimulatedError::Nack(NoAcknowledgeSource::Data);
        if bytes.len() < 2 || (bytes.len() - 2) % 3 != 0 {
            return Err(data_nack);
        }

        let mut crc = SensirionCrc::new();
        let mut payload = Vec::new();
        for word in bytes[2..].chunks_exact(3) {
            if crc.calculate(&word[..2]) != word[2] {
                return Err(data_nack);
            }
            payload.extend_from_slice(&word[..2]);
        }

        let raw = u16::from_be_bytes([bytes[0], bytes[1]]);
        let opcode = Opcode::from_raw(raw).ok_or(data_nack)?;
        self.commands.push(raw);
        self.execute(opcode, &payload);
        Ok(())
    }

    fn execute(&mut self, opcode: Opcode, payload: &[u8]) {
        self.pending = None;
        let takes_effect = self.mode.takes_effect(opcode);

        if payload.is_empty() {
            if let Some(response) = self.read_register(opcode) {
                self.pending = Some(response);
                return;
            }
        } else {
            if takes_effect {
                self.write_register(opcode, payload);
            }
            return;
        }

        if !takes_effect {
            return;
        }
        match opcode {
            Opcode::StartMeasurement | Opcode::StartMeasurementWithoutPm => {
                self.data_ready = true;
            }
            Opcode::StopMeasurement => {
                self.data_ready = false;
                self.status &= !FAN_CLEANING;
            }
            Opcode::StartFanCleaning => self.status |= FAN_CLEANING,
            Opcode::DeviceReset => {
                self.settings = Settings::default();
                self.status = 0;
                self.data_ready = false;
            }
            _ => {}
        }
        self.mode = self.mode.after(opcode);
    }

    fn read_register(&mut self, opcode: Opcode) -> Option<Vec<u8>> {
        let settings = &self.settings;
        let response = match opcode {
            Opcode::ReadDataReady => vec![0x00, self.data_ready as u8],
            Opcode::ReadMeasuredValues => {
                self.data_ready = false;
                words(&self.reading())
            }
            Opcode::TemperatureOffsetParameters => words(&settings.temperature_offset),
            Opcode::WarmStartParameter => words(&[settings.warm_start]),
            Opcode::VocAlgorithmTuningParameters => words(&settings.voc_tuning.to_words()),
            Opcode::NoxAlgorithmTuningParameters => words(&settings.nox_tuning.to_words()),
            Opcode::RhtAccelerationMode => words(&[settings.rht_acceleration_mode]),
            Opcode::VocAlgorithmState => settings.voc_state.to_vec(),
            Opcode::FanAutoCleaningInterval => {
                settings.fan_auto_cleaning_interval.to_be_bytes().to_vec()
            }
            Opcode::ProductName => string(&self.product_name),
            Opcode::SerialNumber => string(&self.serial_number),
            Opcode::Version => self.version.to_vec(),
            Opcode::ReadDeviceStatus => self.status.to_be_bytes().to_vec(),
            Opcode::ReadAndClearDeviceStatus => {
                let status = self.status;
                // only the sticky error flags are cleared
                self.status &= FAN_CLEANING;
                status.to_be_bytes().to_vec()
            }
            _ => return None,
        };
        Some(response)
    }

    fn write_register(&mut self, opcode: Opcode, payload: &[u8]) {
        let words: Vec<u16> = payload
            .chunks_exact(2)
            .map(|word| u16::from_be_bytes([word[0], word[1]]))
            .collect();
        let settings = &mut self.settings;

        match (opcode, words.as_slice()) {
            (Opcode::TemperatureOffsetParameters, &[offset, slope, time_constant]) => {
                settings.temperature_offset = [offset, slope, time_constant];
            }
            (Opcode::WarmStartParameter, &[warm_start]) => settings.warm_start = warm_start,
            (Opcode::VocAlgorithmTuningParameters, &[a, b, c, d, e, f]) => {
                let parameters = AlgorithmTuningParameters::new(a, b, c, d, e, f);
                if parameters.is_within_device_limits_voc() {
                    settings.voc_tuning = parameters;
                }
            }
            (Opcode::NoxAlgorithmTuningParameters, &[a, b, c, d, e, f]) => {
                let parameters = AlgorithmTuningParameters::new(a, b, c, d, e, f);
                if parameters.is_within_device_limits_nox() {
                    settings.nox_tuning = parameters;
                }
            }
            (Opcode::RhtAccelerationMode, &[mode]) if mode <= 2 => {
                settings.rht_acceleration_mode = mode;
            }
            (Opcode::VocAlgorithmState, _) if payload.len() == 8 => {
                settings.voc_state.copy_from_slice(payload);
            }
            (Opcode::FanAutoCleaningInterval, &[high, low]) => {
                settings.fan_auto_cleaning_interval = (u32::from(high) << 16) | u32::from(low);
            }
            _ => {}
        }
    }

    fn reading(&self) -> [u16; 8] {
        let unavailable = [0xffff, 0xffff, 0xffff, 0xffff, 0x7fff, 0x7fff, 0x7fff, 0x7fff];
        match self.mode {
            DeviceMode::Idle => unavailable,
            DeviceMode::Measuring => READING,
            DeviceMode::MeasuringWithoutPm => {
                let mut reading = READING;
                reading[..4].copy_from_slice(&unavailable[..4]);
                reading
            }
        }
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), SimulatedError> {
        let response = self
            .pending
            .take()
            .ok_or(SimulatedError::Nack(NoAcknowledgeSource::Address))?;

        let mut crc = SensirionCrc::new();
        let mut framed = Vec::new();
        for word in response.chunks_exact(2) {
            framed.extend_from_slice(word);
            framed.push(crc.calculate(word));
        }
        if std::mem::take(&mut self.corrupt_next_response) {
            if let Some(last) = framed.last_mut() {
                *last ^= 0xff;
            }
        }

        let len = buffer.len().min(framed.len());
        buffer[..len].copy_from_slice(&framed[..len]);
        Ok(())
    }
}

fn words(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|word| word.to_be_bytes()).collect()
}

fn string(text: &[u8]) -> Vec<u8> {
    let mut response = vec![0u8; 32];
    let len = text.len().min(32);
    response[..len].copy_from_slice(&text[..len]);
    response
}

impl ErrorType for SimulatedSen5x {
    type Error = SimulatedError;
}

impl I2c for SimulatedSen5x {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if address != state.address {
            return Err(SimulatedError::Nack(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => state.write(bytes)?,
                Operation::Read(buffer) => state.read(buffer)?,
            }
        }
        Ok(())
    }
}

/// Accumulates the requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
