//! Tunable constants for sampling, classification, input and timing.

/// Number of microphone samples per acquisition in the reference build.
pub const DEFAULT_SAMPLE_COUNT: usize = 200;

/// Highest raw code a 12-bit ADC can report.
pub const AXIS_MAX: u16 = 4095;

/// Runtime configuration for [`KitchenApp`](crate::KitchenApp).
///
/// `Config::DEFAULT` matches the reference hardware. Fields are public so a
/// board can override individual values before calling [`Config::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// ADC input the microphone is wired to.
    pub mic_channel: u8,
    /// ADC clock divisor; sets the per-sample conversion time.
    pub adc_clock_divisor: f32,
    /// Give up on a batch transfer after this long.
    pub acquisition_timeout_ms: u64,

    /// ADC reference voltage in volts.
    pub full_scale_volts: f32,
    /// Number of distinct ADC codes (4096 for 12 bits).
    pub adc_resolution: u32,
    /// Number of quantization bands the full scale is split into.
    pub intensity_bands: f32,
    /// Extra divisor applied to a band to get the classifier step.
    pub step_divisor: f32,

    /// Joystick X above this selects the first option.
    pub axis_high: u16,
    /// Joystick X below this selects the second option.
    pub axis_low: u16,
    /// Minimum time between two accepted presses of the same button.
    pub debounce_ms: u64,

    /// Short noodle preset.
    pub noodle_short_ms: u64,
    /// Long noodle preset.
    pub noodle_long_ms: u64,
    /// Bean stopwatch starts on the first level strictly above this.
    pub bean_trigger_level: u8,

    /// Alarm tone frequency.
    pub tone_hz: u32,
    /// Alarm tone length.
    pub tone_ms: u32,

    /// Idle time the LED strip needs after a frame before it latches.
    pub led_settle_us: u32,
    /// Sleep at the end of every control loop iteration.
    pub tick_interval_ms: u32,
    /// How long each boot animation frame stays lit.
    pub boot_frame_ms: u32,
}

impl Config {
    /// Reference hardware settings.
    pub const DEFAULT: Config = Config {
        mic_channel: 2,
        adc_clock_divisor: 96.0,
        acquisition_timeout_ms: 50,

        full_scale_volts: 3.3,
        adc_resolution: 4096,
        intensity_bands: 5.0,
        step_divisor: 20.0,

        axis_high: 3000,
        axis_low: 1000,
        debounce_ms: 200,

        noodle_short_ms: 3 * 60 * 1000,
        noodle_long_ms: 10 * 60 * 1000,
        bean_trigger_level: 1,

        tone_hz: 1000,
        tone_ms: 1000,

        led_settle_us: 100,
        tick_interval_ms: 100,
        boot_frame_ms: 100,
    };

    /// Half the reference voltage; the microphone bias point.
    #[inline]
    pub fn half_scale_volts(&self) -> f32 {
        self.full_scale_volts / 2.0
    }

    /// Magnitude covered by one intensity level.
    #[inline]
    pub fn intensity_step(&self) -> f32 {
        self.full_scale_volts / self.intensity_bands / self.step_divisor
    }

    /// Checks the values the core relies on.
    ///
    /// # Errors
    /// * `NonPositiveStep` - classifier step would not be a positive number
    /// * `InvertedAxisThresholds` - `axis_low` is not below `axis_high`
    /// * `ZeroResolution` - `adc_resolution` is zero
    /// * `TriggerAboveMax` - bean trigger can never be exceeded
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.intensity_step();
        if step.is_nan() || step <= 0.0 || step.is_infinite() {
            return Err(ConfigError::NonPositiveStep);
        }

        if self.axis_low >= self.axis_high {
            return Err(ConfigError::InvertedAxisThresholds);
        }

        if self.adc_resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }

        if self.bean_trigger_level >= crate::IntensityLevel::MAX.value() {
            return Err(ConfigError::TriggerAboveMax);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Intensity step is zero, negative or not a number.
    NonPositiveStep,

    /// Low joystick threshold is not below the high one.
    InvertedAxisThresholds,

    /// ADC resolution of zero codes.
    ZeroResolution,

    /// Bean trigger level at or above the highest intensity level.
    TriggerAboveMax,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NonPositiveStep => {
                write!(f, "intensity step must be a positive number")
            }
            ConfigError::InvertedAxisThresholds => {
                write!(f, "axis_low must be below axis_high")
            }
            ConfigError::ZeroResolution => {
                write!(f, "adc_resolution must be non-zero")
            }
            ConfigError::TriggerAboveMax => {
                write!(f, "bean trigger level must be below the maximum intensity level")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
