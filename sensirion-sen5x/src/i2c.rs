use crc_all::Crc;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::{Error, ParsingError, Transport};

const MAX_PAYLOAD_WORDS: usize = 6;
const MAX_RESPONSE_WORDS: usize = 16;

/// [`Transport`] over an `embedded-hal` I2C bus using the Sensirion framing:
/// big-endian command followed by 16-bit words, each protected by a CRC-8.
pub struct SensirionI2c<T, D>
where
    T: I2c,
    D: DelayNs,
{
    bus: T,
    delay: D,
    crc: SensirionCrc,
}

impl<T, D> SensirionI2c<T, D>
where
    T: I2c,
    D: DelayNs,
{
    pub fn new(bus: T, delay: D) -> SensirionI2c<T, D> {
        Self {
            bus,
            delay,
            crc: Default::default(),
        }
    }

    pub fn release(self) -> (T, D) {
        (self.bus, self.delay)
    }

    fn write_frame(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
    ) -> Result<(), Error<T::Error>> {
        if payload.len() % 2 != 0 || payload.len() > MAX_PAYLOAD_WORDS * 2 {
            log::debug!(
                "refusing to frame {} payload bytes for command {:#06x}",
                payload.len(),
                command
            );
            return Err(Error::Parsing(ParsingError::InvalidLength));
        }

        let mut buffer = [0u8; 2 + MAX_PAYLOAD_WORDS * 3];
        buffer[0..2].copy_from_slice(&command.to_be_bytes());
        let mut length = 2;
        for word in payload.chunks_exact(2) {
            buffer[length..length + 2].copy_from_slice(word);
            buffer[length + 2] = self.crc.calculate(word);
            length += 3;
        }

        log::trace!("command {:#06x} <- {:02x?}", command, &buffer[..length]);
        self.bus.write(address, &buffer[..length]).map_err(Error::Bus)?;

        self.delay.delay_ms(execution_time_ms);
        Ok(())
    }
}

impl<T, D> Transport for SensirionI2c<T, D>
where
    T: I2c,
    D: DelayNs,
{
    type Error = T::Error;

    fn transmit(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
    ) -> Result<(), Error<Self::Error>> {
        self.write_frame(address, command, payload, execution_time_ms)
    }

    fn transmit_and_receive(
        &mut self,
        address: u8,
        command: u16,
        payload: &[u8],
        execution_time_ms: u32,
        response: &mut [u8],
    ) -> Result<(), Error<Self::Error>> {
        if response.len() % 2 != 0 || response.len() > MAX_RESPONSE_WORDS * 2 {
            return Err(Error::Parsing(ParsingError::InvalidLength));
        }

        self.write_frame(address, command, payload, execution_time_ms)?;

        let mut buffer = [0u8; MAX_RESPONSE_WORDS * 3];
        let raw = &mut buffer[..response.len() / 2 * 3];
        self.bus.read(address, raw).map_err(Error::Bus)?;
        log::trace!("command {:#06x} -> {:02x?}", command, raw);

        for (word, target) in raw.chunks_exact(3).zip(response.chunks_exact_mut(2)) {
            if self.crc.calculate(&word[..2]) != word[2] {
                log::debug!("crc mismatch in response to command {:#06x}", command);
                return Err(Error::Parsing(ParsingError::Crc));
            }
            target.copy_from_slice(&word[..2]);
        }

        Ok(())
    }
}

/// CRC-8 as used by all Sensirion I2C sensors: polynomial 0x31, init 0xFF.
pub struct SensirionCrc {
    inner: Crc<u8>,
}

impl SensirionCrc {
    pub fn new() -> Self {
        Self {
            inner: crc_all::Crc::<u8>::new(0x31, 8, 0xff, 0x00, false),
        }
    }

    pub fn calculate(&mut self, input: &[u8]) -> u8 {
        self.inner.init();
        self.inner.update(input);
        self.inner.finish()
    }
}

impl Default for SensirionCrc {
    fn default() -> Self {
        Self::new()
    }
}
