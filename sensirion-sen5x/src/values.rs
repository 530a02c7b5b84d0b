//! Scaled measurement signals.
//!
//! Every signal is transmitted as a 16-bit integer ("ticks") with a fixed scale
//! factor. One raw value per signal is reserved as sentinel for "not available",
//! e.g. mass concentrations in low-power mode or NOx on a SEN54.

use core::fmt;
use core::marker::PhantomData;

/// Conversion parameters of one kind of signal.
pub trait Quantity {
    /// Integer type used on the wire.
    type Ticks: Copy + PartialEq + fmt::Debug + Into<f32>;
    /// Raw value meaning "not available".
    const SENTINEL: Self::Ticks;
    /// Ticks per physical unit.
    const SCALE: f32;
    /// Decimal places used when displaying the value.
    const PRECISION: usize;
    /// Unit suffix used when displaying the value, empty for unitless signals.
    const UNIT: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicrogramsPerCubicMeter;

impl Quantity for MicrogramsPerCubicMeter {
    type Ticks = u16;
    const SENTINEL: u16 = 0xFFFF;
    const SCALE: f32 = 10.0;
    const PRECISION: usize = 1;
    const UNIT: &'static str = "µg/m^3";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeHumidity;

impl Quantity for RelativeHumidity {
    type Ticks = i16;
    const SENTINEL: i16 = 0x7FFF;
    const SCALE: f32 = 100.0;
    const PRECISION: usize = 2;
    const UNIT: &'static str = "%RH";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreesCelsius;

impl Quantity for DegreesCelsius {
    type Ticks = i16;
    const SENTINEL: i16 = 0x7FFF;
    const SCALE: f32 = 200.0;
    const PRECISION: usize = 2;
    const UNIT: &'static str = "°C";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPoints;

impl Quantity for IndexPoints {
    type Ticks = i16;
    const SENTINEL: i16 = 0x7FFF;
    const SCALE: f32 = 10.0;
    const PRECISION: usize = 1;
    const UNIT: &'static str = "";
}

/// A raw signal together with its conversion rules.
///
/// `physical()` is NaN whenever `available()` is `false`; both are derived from
/// the ticks on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "Q::Ticks: serde::Serialize",
            deserialize = "Q::Ticks: serde::Deserialize<'de>"
        )
    )
)]
pub struct Scaled<Q: Quantity> {
    ticks: Q::Ticks,
    #[cfg_attr(feature = "serde", serde(skip))]
    quantity: PhantomData<Q>,
}

/// Particulate matter mass concentration [µg/m³].
pub type MassConcentration = Scaled<MicrogramsPerCubicMeter>;
/// Compensated ambient humidity [%RH].
pub type Humidity = Scaled<RelativeHumidity>;
/// Compensated ambient temperature [°C].
pub type Temperature = Scaled<DegreesCelsius>;
/// VOC or NOx index.
pub type AirQualityIndex = Scaled<IndexPoints>;

impl<Q: Quantity> Scaled<Q> {
    pub const fn new(ticks: Q::Ticks) -> Self {
        Self {
            ticks,
            quantity: PhantomData,
        }
    }

    /// The value as received from the device.
    pub fn ticks(&self) -> Q::Ticks {
        self.ticks
    }

    pub fn available(&self) -> bool {
        self.ticks != Q::SENTINEL
    }

    /// The value converted to its physical unit, NaN if not available.
    pub fn physical(&self) -> f32 {
        if self.available() {
            let ticks: f32 = self.ticks.into();
            ticks / Q::SCALE
        } else {
            f32::NAN
        }
    }
}

impl Scaled<RelativeHumidity> {
    pub fn percent_rh(&self) -> f32 {
        self.physical()
    }
}

impl Scaled<DegreesCelsius> {
    pub fn degrees_celsius(&self) -> f32 {
        self.physical()
    }

    pub fn degrees_fahrenheit(&self) -> f32 {
        self.degrees_celsius() * 9.0 / 5.0 + 32.0
    }
}

impl Scaled<IndexPoints> {
    pub fn scaled(&self) -> f32 {
        self.physical()
    }
}

impl<Q: Quantity> fmt::Display for Scaled<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.available() {
            return f.write_str("N/A");
        }
        write!(f, "{:.*}", Q::PRECISION, self.physical())?;
        if !Q::UNIT.is_empty() {
            write!(f, " {}", Q::UNIT)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<Q: Quantity> defmt::Format for Scaled<Q> {
    fn format(&self, fmt: defmt::Formatter) {
        if self.available() {
            defmt::write!(fmt, "{=f32} {=str}", self.physical(), Q::UNIT)
        } else {
            defmt::write!(fmt, "N/A")
        }
    }
}
