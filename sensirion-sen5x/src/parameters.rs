//! Configuration values exchanged with the device.
//!
//! Parameters with a fixed-point encoding come in two representations. Which one
//! a getter returns is chosen with [`Scaling`] at call time; setters accept
//! either case.

/// Representation requested from a getter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scaling {
    /// Integers exactly as transmitted.
    Raw,
    /// Physical or normalized floating point values.
    #[default]
    Physical,
}

const OFFSET_SCALE: f32 = 200.0;
const SLOPE_SCALE: f32 = 10000.0;
const WARM_START_SCALE: f32 = 65535.0;

/// Temperature compensation of the design-in at customer side.
///
/// The device computes
/// `T_compensated = T_ambient + offset + slope * T_ambient`,
/// smoothed with the time constant: after that many seconds 63% of the new
/// offset and slope are applied, zero applies them within the next second.
///
/// Volatile, reverts to zero after a device reset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureOffsetParameters {
    /// Offset in 1/200 °C, slope in 1/10000, time constant in seconds.
    Raw {
        offset: i16,
        slope: i16,
        time_constant: u16,
    },
    /// Offset in °C, normalized slope, time constant in seconds.
    Physical {
        offset: f32,
        slope: f32,
        time_constant: f32,
    },
}

impl TemperatureOffsetParameters {
    /// The integers put on the wire, physical values rounded to the nearest tick.
    pub fn to_raw(&self) -> (i16, i16, u16) {
        match *self {
            Self::Raw {
                offset,
                slope,
                time_constant,
            } => (offset, slope, time_constant),
            Self::Physical {
                offset,
                slope,
                time_constant,
            } => (
                round(offset * OFFSET_SCALE) as i16,
                round(slope * SLOPE_SCALE) as i16,
                round(time_constant) as u16,
            ),
        }
    }

    pub fn from_raw(offset: i16, slope: i16, time_constant: u16, scaling: Scaling) -> Self {
        match scaling {
            Scaling::Raw => Self::Raw {
                offset,
                slope,
                time_constant,
            },
            Scaling::Physical => Self::Physical {
                offset: f32::from(offset) / OFFSET_SCALE,
                slope: f32::from(slope) / SLOPE_SCALE,
                time_constant: f32::from(time_constant),
            },
        }
    }
}

/// How warm the device is when a measurement starts.
///
/// The temperature compensation assumes a cold start by default. The value is
/// applied the next time a measurement is started, so it has to be set before.
/// Volatile, reverts to zero after a device reset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WarmStart {
    /// 0 (cold start) ..= 65535 (warm start).
    Raw(u16),
    /// 0.0 (cold start) ..= 1.0 (warm start).
    Normalized(f32),
}

impl WarmStart {
    pub fn to_raw(&self) -> u16 {
        match *self {
            Self::Raw(raw) => raw,
            Self::Normalized(value) => round(value * WARM_START_SCALE) as u16,
        }
    }

    pub fn from_raw(raw: u16, scaling: Scaling) -> Self {
        match scaling {
            Scaling::Raw => Self::Raw(raw),
            Scaling::Physical => Self::Normalized(f32::from(raw) / WARM_START_SCALE),
        }
    }
}

/// Tuning of the VOC or NOx index algorithm.
///
/// The device rejects the whole set without notice when a single value is out
/// of range, see [`is_within_device_limits_voc`](Self::is_within_device_limits_voc)
/// and [`is_within_device_limits_nox`](Self::is_within_device_limits_nox).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlgorithmTuningParameters {
    /// Index representing typical (average) conditions.
    pub index_offset: u16,
    /// Time constant to estimate the offset from the history [h].
    pub learning_time_offset_hours: u16,
    /// Time constant to estimate the gain from the history [h]. No effect for NOx.
    pub learning_time_gain_hours: u16,
    /// Maximum duration of gating [min], zero disables gating.
    pub gating_max_duration_minutes: u16,
    /// Initial estimate for the standard deviation. No effect for NOx.
    pub std_initial: u16,
    /// Gain factor to amplify or attenuate the index output.
    pub gain_factor: u16,
}

impl AlgorithmTuningParameters {
    pub const fn new(
        index_offset: u16,
        learning_time_offset_hours: u16,
        learning_time_gain_hours: u16,
        gating_max_duration_minutes: u16,
        std_initial: u16,
        gain_factor: u16,
    ) -> Self {
        Self {
            index_offset,
            learning_time_offset_hours,
            learning_time_gain_hours,
            gating_max_duration_minutes,
            std_initial,
            gain_factor,
        }
    }

    pub const fn voc_default() -> Self {
        Self::new(100, 12, 12, 180, 50, 230)
    }

    pub const fn nox_default() -> Self {
        Self::new(1, 12, 12, 720, 50, 230)
    }

    pub fn is_within_device_limits_voc(&self) -> bool {
        (1..=250).contains(&self.index_offset)
            && (1..=1000).contains(&self.learning_time_offset_hours)
            && (1..=1000).contains(&self.learning_time_gain_hours)
            && self.gating_max_duration_minutes <= 3000
            && (10..=5000).contains(&self.std_initial)
            && (1..=1000).contains(&self.gain_factor)
    }

    pub fn is_within_device_limits_nox(&self) -> bool {
        (1..=250).contains(&self.index_offset)
            && (1..=1000).contains(&self.learning_time_offset_hours)
            && self.learning_time_gain_hours == 12
            && self.gating_max_duration_minutes <= 3000
            && self.std_initial == 50
            && (1..=1000).contains(&self.gain_factor)
    }

    pub fn to_words(&self) -> [u16; 6] {
        [
            self.index_offset,
            self.learning_time_offset_hours,
            self.learning_time_gain_hours,
            self.gating_max_duration_minutes,
            self.std_initial,
            self.gain_factor,
        ]
    }

    pub fn from_words(words: [u16; 6]) -> Self {
        let [a, b, c, d, e, f] = words;
        Self::new(a, b, c, d, e, f)
    }
}

/// Opaque VOC algorithm state, used to skip the initial learning phase after a
/// short interruption.
pub type VocAlgorithmState = [u8; 8];

/// Rounds half away from zero. `as` casts saturate, so results outside the
/// target range clamp instead of wrapping.
fn round(value: f32) -> f32 {
    let truncated = value as i64 as f32;
    let fraction = value - truncated;
    if fraction >= 0.5 {
        truncated + 1.0
    } else if fraction <= -0.5 {
        truncated - 1.0
    } else {
        truncated
    }
}
