use core::fmt;

use getset::CopyGetters;

use crate::values::{AirQualityIndex, Humidity, MassConcentration, Temperature};

/// Response of the "Read Measured Values" command.
///
/// All eight signals are always present, but which of them are
/// [available](crate::Scaled::available) depends on the product and the measure
/// mode: mass concentrations are missing in the low-power mode, RH/T/VOC on a
/// SEN50 and NOx on SEN50/SEN54. In idle mode nothing is available.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[get_copy = "pub"]
pub struct MeasuredValues {
    /// Mass Concentration PM1.0 [μg/m³]
    mass_concentration_1p0: MassConcentration,
    /// Mass Concentration PM2.5 [μg/m³]
    mass_concentration_2p5: MassConcentration,
    /// Mass Concentration PM4.0 [μg/m³]
    mass_concentration_4p0: MassConcentration,
    /// Mass Concentration PM10 [μg/m³]
    mass_concentration_10p0: MassConcentration,
    /// Compensated Ambient Humidity [%RH]
    ambient_humidity: Humidity,
    /// Compensated Ambient Temperature [°C]
    ambient_temperature: Temperature,
    /// VOC Index
    voc_index: AirQualityIndex,
    /// NOx Index
    nox_index: AirQualityIndex,
}

impl MeasuredValues {
    /// Builds the aggregate from the raw words in wire order.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_ticks(
        mass_concentration_1p0: u16,
        mass_concentration_2p5: u16,
        mass_concentration_4p0: u16,
        mass_concentration_10p0: u16,
        ambient_humidity: i16,
        ambient_temperature: i16,
        voc_index: i16,
        nox_index: i16,
    ) -> Self {
        Self {
            mass_concentration_1p0: MassConcentration::new(mass_concentration_1p0),
            mass_concentration_2p5: MassConcentration::new(mass_concentration_2p5),
            mass_concentration_4p0: MassConcentration::new(mass_concentration_4p0),
            mass_concentration_10p0: MassConcentration::new(mass_concentration_10p0),
            ambient_humidity: Humidity::new(ambient_humidity),
            ambient_temperature: Temperature::new(ambient_temperature),
            voc_index: AirQualityIndex::new(voc_index),
            nox_index: AirQualityIndex::new(nox_index),
        }
    }

    /// Printable representation with a custom line separator.
    pub fn display_with<'a>(&'a self, separator: &'a str) -> MeasuredValuesDisplay<'a> {
        MeasuredValuesDisplay {
            values: self,
            separator,
        }
    }
}

impl fmt::Display for MeasuredValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with("\n"), f)
    }
}

pub struct MeasuredValuesDisplay<'a> {
    values: &'a MeasuredValues,
    separator: &'a str,
}

impl fmt::Display for MeasuredValuesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.values;
        let sep = self.separator;
        write!(f, "Mass Concentration PM1.0:    {}{}", v.mass_concentration_1p0, sep)?;
        write!(f, "Mass Concentration PM2.5:    {}{}", v.mass_concentration_2p5, sep)?;
        write!(f, "Mass Concentration PM4.0:    {}{}", v.mass_concentration_4p0, sep)?;
        write!(f, "Mass Concentration PM10.0:   {}{}", v.mass_concentration_10p0, sep)?;
        write!(f, "Ambient Humidity:            {}{}", v.ambient_humidity, sep)?;
        write!(f, "Ambient Temperature:         {}{}", v.ambient_temperature, sep)?;
        write!(f, "VOC Index:                   {}{}", v.voc_index, sep)?;
        write!(f, "NOx Index:                   {}", v.nox_index)
    }
}
