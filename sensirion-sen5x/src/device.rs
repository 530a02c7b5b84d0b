use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::commands::*;
use crate::measured_values::MeasuredValues;
use crate::parameters::{
    AlgorithmTuningParameters, Scaling, TemperatureOffsetParameters, VocAlgorithmState, WarmStart,
};
use crate::status::DeviceStatus;
use crate::version::Version;
use crate::{Error, SensirionI2c, Transport, DEFAULT_ADDRESS};

/// SEN5x driver, one device exchange per method call.
///
/// The device mode is not tracked: commands sent in the wrong mode are ignored
/// by the device and reported as success here. See [`crate::state`] for the
/// rules.
pub struct Sen5x<T>
where
    T: Transport,
{
    transport: T,
    address: u8,
}

impl<I, D> Sen5x<SensirionI2c<I, D>>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(bus: I, delay: D) -> Self {
        Self::with_transport(SensirionI2c::new(bus, delay))
    }
}

impl<T> Sen5x<T>
where
    T: Transport,
{
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            address: DEFAULT_ADDRESS,
        }
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> T {
        self.transport
    }

    /// Sends `command` and decodes its response.
    pub fn execute<C: Command>(&mut self, command: &C) -> Result<C::Response, Error<T::Error>> {
        let payload = command.encode();
        let mut buffer = C::Buffer::default();
        log::debug!(
            "{:?} ({:#06x}): {} bytes out, {} bytes in",
            C::OPCODE,
            C::OPCODE.raw(),
            payload.as_ref().len(),
            buffer.as_ref().len()
        );

        if buffer.as_ref().is_empty() {
            self.transport.transmit(
                self.address,
                C::OPCODE.raw(),
                payload.as_ref(),
                C::EXECUTION_TIME_MS,
            )?;
        } else {
            self.transport.transmit_and_receive(
                self.address,
                C::OPCODE.raw(),
                payload.as_ref(),
                C::EXECUTION_TIME_MS,
                buffer.as_mut(),
            )?;
        }

        Ok(command.decode(&buffer))
    }

    pub fn get_product_name(&mut self) -> Result<String<32>, Error<T::Error>> {
        self.execute(&GetProductName)
    }

    pub fn get_serial_number(&mut self) -> Result<String<32>, Error<T::Error>> {
        self.execute(&GetSerialNumber)
    }

    pub fn get_version(&mut self) -> Result<Version, Error<T::Error>> {
        self.execute(&GetVersion)
    }

    /// Reads the status register, clearing it afterwards if `clear` is set.
    pub fn read_device_status(&mut self, clear: bool) -> Result<DeviceStatus, Error<T::Error>> {
        if clear {
            self.execute(&ReadAndClearDeviceStatus)
        } else {
            self.execute(&ReadDeviceStatus)
        }
    }

    pub fn device_reset(&mut self) -> Result<(), Error<T::Error>> {
        self.execute(&DeviceReset)
    }

    pub fn start_measurement(&mut self) -> Result<(), Error<T::Error>> {
        self.execute(&StartMeasurement)
    }

    pub fn start_measurement_without_pm(&mut self) -> Result<(), Error<T::Error>> {
        self.execute(&StartMeasurementWithoutPm)
    }

    pub fn stop_measurement(&mut self) -> Result<(), Error<T::Error>> {
        self.execute(&StopMeasurement)
    }

    pub fn read_data_ready(&mut self) -> Result<bool, Error<T::Error>> {
        self.execute(&ReadDataReady)
    }

    pub fn read_measured_values(&mut self) -> Result<MeasuredValues, Error<T::Error>> {
        self.execute(&ReadMeasuredValues)
    }

    pub fn get_temperature_offset_parameters(
        &mut self,
        scaling: Scaling,
    ) -> Result<TemperatureOffsetParameters, Error<T::Error>> {
        self.execute(&GetTemperatureOffsetParameters { scaling })
    }

    pub fn set_temperature_offset_parameters(
        &mut self,
        parameters: TemperatureOffsetParameters,
    ) -> Result<(), Error<T::Error>> {
        self.execute(&SetTemperatureOffsetParameters { parameters })
    }

    pub fn get_warm_start_parameter(
        &mut self,
        scaling: Scaling,
    ) -> Result<WarmStart, Error<T::Error>> {
        self.execute(&GetWarmStartParameter { scaling })
    }

    pub fn set_warm_start_parameter(&mut self, warm_start: WarmStart) -> Result<(), Error<T::Error>> {
        self.execute(&SetWarmStartParameter { warm_start })
    }

    pub fn get_rht_acceleration_mode(&mut self) -> Result<u16, Error<T::Error>> {
        self.execute(&GetRhtAccelerationMode)
    }

    pub fn set_rht_acceleration_mode(&mut self, mode: u16) -> Result<(), Error<T::Error>> {
        self.execute(&SetRhtAccelerationMode { mode })
    }

    pub fn get_voc_tuning_parameters(
        &mut self,
    ) -> Result<AlgorithmTuningParameters, Error<T::Error>> {
        self.execute(&GetVocAlgorithmTuningParameters)
    }

    pub fn set_voc_tuning_parameters(
        &mut self,
        parameters: AlgorithmTuningParameters,
    ) -> Result<(), Error<T::Error>> {
        self.execute(&SetVocAlgorithmTuningParameters { parameters })
    }

    pub fn get_nox_tuning_parameters(
        &mut self,
    ) -> Result<AlgorithmTuningParameters, Error<T::Error>> {
        self.execute(&GetNoxAlgorithmTuningParameters)
    }

    pub fn set_nox_tuning_parameters(
        &mut self,
        parameters: AlgorithmTuningParameters,
    ) -> Result<(), Error<T::Error>> {
        self.execute(&SetNoxAlgorithmTuningParameters { parameters })
    }

    pub fn get_voc_state(&mut self) -> Result<VocAlgorithmState, Error<T::Error>> {
        self.execute(&GetVocAlgorithmState)
    }

    pub fn set_voc_state(&mut self, state: VocAlgorithmState) -> Result<(), Error<T::Error>> {
        self.execute(&SetVocAlgorithmState { state })
    }

    pub fn start_fan_cleaning(&mut self) -> Result<(), Error<T::Error>> {
        self.execute(&StartFanCleaning)
    }

    pub fn get_fan_auto_cleaning_interval(&mut self) -> Result<u32, Error<T::Error>> {
        self.execute(&GetFanAutoCleaningInterval)
    }

    pub fn set_fan_auto_cleaning_interval(&mut self, interval_s: u32) -> Result<(), Error<T::Error>> {
        self.execute(&SetFanAutoCleaningInterval { interval_s })
    }
}
