//! Sound intensity classification.
//!
//! Turns a batch of raw microphone codes into a single [`IntensityLevel`]:
//! RMS of the raw codes, mapped to a voltage centered on the microphone bias,
//! scaled, then quantized into fixed steps.

use crate::config::Config;

/// Discrete loudness level, always within `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    /// Quietest level.
    pub const SILENT: IntensityLevel = IntensityLevel(0);

    /// Loudest level; anything louder saturates here.
    pub const MAX: IntensityLevel = IntensityLevel(4);

    /// Number of distinct levels.
    pub const COUNT: usize = Self::MAX.0 as usize + 1;

    /// Creates a level, clamping values above [`IntensityLevel::MAX`].
    #[inline]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            IntensityLevel(value)
        }
    }

    /// Returns the level as a plain number.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.0
    }
}

/// Root of the mean of the squared samples, in raw code units.
///
/// Squares are summed as integers, so the result only loses precision in the
/// final division and square root. Returns 0 for an empty slice.
pub fn rms(samples: &[u16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: u64 = samples.iter().map(|&s| (s as u64) * (s as u64)).sum();
    let mean = sum_of_squares as f64 / samples.len() as f64;
    libm::sqrt(mean) as f32
}

/// Maps sample batches to intensity levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    full_scale: f32,
    half_scale: f32,
    resolution: f32,
    step: f32,
}

impl Classifier {
    /// Builds a classifier from the voltage and step settings in `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            full_scale: config.full_scale_volts,
            half_scale: config.half_scale_volts(),
            resolution: config.adc_resolution as f32,
            step: config.intensity_step(),
        }
    }

    /// Scaled distance of an RMS code from the bias point.
    ///
    /// `full_scale * |rms * full_scale / resolution - half_scale|`
    pub fn adjusted_magnitude(&self, rms: f32) -> f32 {
        let volts = rms * self.full_scale / self.resolution - self.half_scale;
        self.full_scale * libm::fabsf(volts)
    }

    /// Number of whole steps that fit in `magnitude`, saturating at the top level.
    pub fn level(&self, magnitude: f32) -> IntensityLevel {
        if magnitude.is_nan() || magnitude <= 0.0 {
            return IntensityLevel::SILENT;
        }

        let steps = libm::floorf(magnitude / self.step);
        if steps >= IntensityLevel::MAX.value() as f32 {
            IntensityLevel::MAX
        } else {
            IntensityLevel::new(steps as u8)
        }
    }

    /// Classifies one batch. An empty batch carries no sound and is silent.
    pub fn classify(&self, samples: &[u16]) -> IntensityLevel {
        if samples.is_empty() {
            return IntensityLevel::SILENT;
        }

        let magnitude = self.adjusted_magnitude(rms(samples));
        let level = self.level(magnitude);
        debug!("adjusted magnitude {}, level {}", magnitude, level.value());
        level
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&Config::DEFAULT)
    }
}
