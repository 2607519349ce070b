//! Application state machine.
//!
//! [`KitchenApp`] owns every peripheral, the sampler, the feedback driver and
//! the timer. The firmware calls [`KitchenApp::run`], or drives
//! [`KitchenApp::tick`] itself, once per loop iteration.

use crate::config::Config;
use crate::hal::{Axis, Button, Buzzer, ControlPanel, InitError, LedStrip, SampleSource, StatusDisplay};
use crate::input::{Debouncer, Tilt, clamp_axis};
use crate::intensity::{Classifier, IntensityLevel};
use crate::matrix::FeedbackDriver;
use crate::sampler::Sampler;
use crate::screen::{self, ClockLabel};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::timer::{KitchenTimer, TimerStatus};
use embedded_hal::delay::DelayNs;

/// Top-level mode of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    /// Choosing between noodle and bean mode.
    #[default]
    Menu,
    /// Choosing a noodle preset.
    NoodleTimerSelect,
    /// Noodle countdown running.
    NoodleTimerRunning,
    /// Listening for the pressure cooker to get loud.
    BeanMonitor,
    /// Pressure reached, stopwatch running.
    BeanTimerRunning,
}

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOption {
    #[default]
    Noodle,
    Bean,
}

/// Noodle countdown presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoodlePreset {
    /// `Config::noodle_short_ms`, 3 minutes by default.
    #[default]
    Short,
    /// `Config::noodle_long_ms`, 10 minutes by default.
    Long,
}

impl MenuOption {
    fn index(self) -> usize {
        match self {
            MenuOption::Noodle => 0,
            MenuOption::Bean => 1,
        }
    }
}

impl NoodlePreset {
    fn index(self) -> usize {
        match self {
            NoodlePreset::Short => 0,
            NoodlePreset::Long => 1,
        }
    }

    fn millis(self, config: &Config) -> u64 {
        match self {
            NoodlePreset::Short => config.noodle_short_ms,
            NoodlePreset::Long => config.noodle_long_ms,
        }
    }
}

/// Board peripherals handed to [`KitchenApp::new`].
pub struct Peripherals<A, L, D, C, B, Y> {
    /// Microphone ADC and its transfer engine.
    pub source: A,
    /// WS2812 strip behind the 5x5 matrix.
    pub strip: L,
    /// Text display.
    pub display: D,
    /// Joystick and buttons.
    pub controls: C,
    /// Alarm buzzer.
    pub buzzer: B,
    /// Blocking delay used for LED settle time, boot frames and the loop sleep.
    pub delay: Y,
}

/// The kitchen helper: menu, noodle countdown and bean pressure monitor.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `T` - Time source
/// * `A` - Sample source
/// * `L` - LED strip
/// * `D` - Status display
/// * `C` - Control panel
/// * `B` - Buzzer
/// * `Y` - Delay provider
/// * `N` - Samples per batch
pub struct KitchenApp<'t, I, T, A, L, D, C, B, Y, const N: usize>
where
    I: TimeInstant,
    T: TimeSource<I>,
    A: SampleSource,
    L: LedStrip,
    D: StatusDisplay,
    C: ControlPanel,
    B: Buzzer,
    Y: DelayNs,
{
    time_source: &'t T,
    sampler: Sampler<A, N>,
    classifier: Classifier,
    feedback: FeedbackDriver<L>,
    display: D,
    controls: C,
    buzzer: B,
    delay: Y,
    config: Config,

    state: SystemState,
    menu_option: MenuOption,
    noodle_preset: NoodlePreset,
    timer: KitchenTimer<I>,
    confirm: Debouncer<I>,
    back: Debouncer<I>,
}

impl<'t, I, T, A, L, D, C, B, Y, const N: usize> KitchenApp<'t, I, T, A, L, D, C, B, Y, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
    A: SampleSource,
    L: LedStrip,
    D: StatusDisplay,
    C: ControlPanel,
    B: Buzzer,
    Y: DelayNs,
{
    /// Validates `config`, configures the sampler and blanks the matrix.
    ///
    /// # Errors
    /// * `InvalidConfig` - `config` failed [`Config::validate`]
    /// * any error the sample source reports while configuring
    pub fn new(
        time_source: &'t T,
        peripherals: Peripherals<A, L, D, C, B, Y>,
        config: Config,
    ) -> Result<Self, InitError> {
        config.validate()?;

        let Peripherals {
            source,
            strip,
            display,
            controls,
            buzzer,
            mut delay,
        } = peripherals;

        let sampler = Sampler::new(source, &config)?;
        let mut feedback = FeedbackDriver::new(strip, config.led_settle_us);
        feedback.clear(&mut delay);

        Ok(Self {
            time_source,
            sampler,
            classifier: Classifier::new(&config),
            feedback,
            display,
            controls,
            buzzer,
            delay,
            config,
            state: SystemState::Menu,
            menu_option: MenuOption::default(),
            noodle_preset: NoodlePreset::default(),
            timer: KitchenTimer::new(),
            confirm: Debouncer::new(config.debounce_ms),
            back: Debouncer::new(config.debounce_ms),
        })
    }

    /// Shows the splash screen and plays the boot animation.
    ///
    /// Buttons held during boot are not reported as presses afterwards.
    pub fn boot(&mut self) {
        screen::draw_splash(&mut self.display);
        self.feedback
            .play_boot_animation(self.config.boot_frame_ms, &mut self.delay);
        self.feedback.clear(&mut self.delay);

        self.confirm
            .suppress(self.controls.is_pressed(Button::Confirm));
        self.back.suppress(self.controls.is_pressed(Button::Back));
        info!("boot complete");
    }

    /// Boots, then ticks forever with `tick_interval_ms` between iterations.
    pub fn run(&mut self) -> ! {
        self.boot();
        loop {
            self.tick();
            self.delay.delay_ms(self.config.tick_interval_ms);
        }
    }

    /// Runs one control loop iteration.
    ///
    /// Inputs are read once up front. The back button is handled after the
    /// state body, so it wins over anything the body just did.
    pub fn tick(&mut self) {
        let now = self.time_source.now();
        let tilt = Tilt::from_axis(
            clamp_axis(self.controls.read_axis(Axis::X)),
            self.config.axis_low,
            self.config.axis_high,
        );
        let confirm = self
            .confirm
            .check_press(self.controls.is_pressed(Button::Confirm), now);
        let back = self
            .back
            .check_press(self.controls.is_pressed(Button::Back), now);

        match self.state {
            SystemState::Menu => self.menu(tilt, confirm),
            SystemState::NoodleTimerSelect => self.noodle_select(tilt, confirm, now),
            SystemState::NoodleTimerRunning => self.noodle_running(now),
            SystemState::BeanMonitor => self.bean_monitor(now),
            SystemState::BeanTimerRunning => self.bean_running(now),
        }

        if back && self.state != SystemState::Menu {
            self.return_to_menu();
        }
    }

    fn menu(&mut self, tilt: Tilt, confirm: bool) {
        match tilt {
            Tilt::First => self.menu_option = MenuOption::Noodle,
            Tilt::Second => self.menu_option = MenuOption::Bean,
            Tilt::Neutral => {}
        }
        screen::draw_menu(&mut self.display, self.menu_option.index());

        if confirm {
            match self.menu_option {
                MenuOption::Noodle => self.enter(SystemState::NoodleTimerSelect),
                MenuOption::Bean => self.enter(SystemState::BeanMonitor),
            }
        }
    }

    fn noodle_select(&mut self, tilt: Tilt, confirm: bool, now: I) {
        match tilt {
            Tilt::First => self.noodle_preset = NoodlePreset::Short,
            Tilt::Second => self.noodle_preset = NoodlePreset::Long,
            Tilt::Neutral => {}
        }
        screen::draw_noodle_presets(&mut self.display, self.noodle_preset.index());

        if confirm {
            let target = self.noodle_preset.millis(&self.config);
            self.timer
                .start_countdown(now, I::Duration::from_millis(target));
            info!("noodle countdown started: {} ms", target);
            self.enter(SystemState::NoodleTimerRunning);
        }
    }

    fn noodle_running(&mut self, now: I) {
        match self.timer.poll(now) {
            TimerStatus::Counting { remaining } => {
                screen::draw_clock(&mut self.display, ClockLabel::Remaining, remaining.as_secs_ceil());
            }
            TimerStatus::Expired => {
                screen::draw_clock(&mut self.display, ClockLabel::Remaining, 0);
                info!("noodle countdown expired");
                self.buzzer
                    .play_tone(self.config.tone_hz, self.config.tone_ms);
                self.enter(SystemState::Menu);
            }
            TimerStatus::Idle | TimerStatus::Elapsed { .. } => {
                warn!("noodle state without a countdown");
                self.timer.cancel();
                self.enter(SystemState::Menu);
            }
        }
    }

    fn bean_monitor(&mut self, now: I) {
        let triggered = self
            .sample_level()
            .is_some_and(|level| level.value() > self.config.bean_trigger_level);

        if triggered && !self.timer.is_active() {
            self.timer.start_stopwatch(now);
            info!("pressure reached, stopwatch started");
            self.enter(SystemState::BeanTimerRunning);
            screen::draw_clock(&mut self.display, ClockLabel::Pressure, 0);
        } else {
            screen::draw_monitoring(&mut self.display);
        }
    }

    fn bean_running(&mut self, now: I) {
        self.sample_level();

        match self.timer.poll(now) {
            TimerStatus::Elapsed { elapsed } => {
                screen::draw_clock(&mut self.display, ClockLabel::Pressure, elapsed.as_secs_floor());
            }
            _ => {
                warn!("bean state without a stopwatch");
                self.timer.cancel();
                self.enter(SystemState::BeanMonitor);
            }
        }
    }

    /// Acquires, classifies and renders one batch.
    ///
    /// `None` on acquisition timeout; the matrix then keeps its last frame.
    fn sample_level(&mut self) -> Option<IntensityLevel> {
        let samples = self.sampler.acquire(self.time_source).ok()?;
        let level = self.classifier.classify(samples.as_slice());
        self.feedback.render(level, &mut self.delay);
        Some(level)
    }

    fn return_to_menu(&mut self) {
        self.timer.cancel();
        self.feedback.clear(&mut self.delay);
        self.enter(SystemState::Menu);
    }

    fn enter(&mut self, state: SystemState) {
        info!("state {} -> {}", self.state, state);
        self.state = state;
    }

    /// Current mode.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Highlighted main menu entry.
    pub fn menu_option(&self) -> MenuOption {
        self.menu_option
    }

    /// Highlighted noodle preset.
    pub fn noodle_preset(&self) -> NoodlePreset {
        self.noodle_preset
    }

    /// The countdown or stopwatch, if any.
    pub fn timer(&self) -> &KitchenTimer<I> {
        &self.timer
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the feedback driver.
    pub fn feedback(&self) -> &FeedbackDriver<L> {
        &self.feedback
    }

    /// Returns a reference to the LED strip.
    pub fn strip(&self) -> &L {
        self.feedback.strip()
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns a reference to the buzzer.
    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    /// Returns a reference to the delay provider.
    pub fn delay(&self) -> &Y {
        &self.delay
    }

    /// Returns a mutable reference to the controls.
    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    /// Returns a mutable reference to the sample source.
    pub fn source_mut(&mut self) -> &mut A {
        self.sampler.source_mut()
    }
}
