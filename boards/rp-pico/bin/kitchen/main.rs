#![no_std]
#![no_main]

use fugit::RateExtU32;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, I2C, Sio, Timer,
    adc::AdcPin,
    clocks::init_clocks_and_plls,
    gpio::{FunctionI2C, FunctionPio0, PullUp},
    pac,
    pio::PIOExt,
    pwm::Slices,
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use kitchen_monitor_rp_pico::analog::{MicSampler, enable_adc, enable_dma};
use kitchen_monitor_rp_pico::buzzer::PwmBuzzer;
use kitchen_monitor_rp_pico::controls::Controls;
use kitchen_monitor_rp_pico::display::OledDisplay;
use kitchen_monitor_rp_pico::time::HardwareTimer;
use kitchen_monitor_rp_pico::ws2812::Ws2812;

use kitchen_monitor::{Config, DEFAULT_SAMPLE_COUNT, InitError, KitchenApp, Peripherals};

/// DMA channel reserved for the microphone.
const MIC_DMA_CHANNEL: usize = 0;

fn halt(err: InitError) -> ! {
    rprintln!("Initialization failed: {}", err);
    loop {
        cortex_m::asm::wfi();
    }
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Kitchen Monitor ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();
    let system_clock_hz = clocks.system_clock.freq().to_Hz();

    rprintln!("System clock configured: {} Hz", system_clock_hz);

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let time_source = HardwareTimer::new(timer);

    // Analog inputs: joystick X/Y on ADC0/ADC1, microphone on ADC2
    let _joystick_x = AdcPin::new(pins.gpio26.into_floating_input())
        .unwrap_or_else(|_| halt(InitError::Peripheral("ADC0 pin")));
    let _joystick_y = AdcPin::new(pins.gpio27.into_floating_input())
        .unwrap_or_else(|_| halt(InitError::Peripheral("ADC1 pin")));
    let _mic = AdcPin::new(pins.gpio28.into_floating_input())
        .unwrap_or_else(|_| halt(InitError::Peripheral("ADC2 pin")));

    let adc = enable_adc(pac.ADC, &mut pac.RESETS);
    let dma = enable_dma(pac.DMA, &mut pac.RESETS);
    let buffer = cortex_m::singleton!(: [u16; DEFAULT_SAMPLE_COUNT] = [0; DEFAULT_SAMPLE_COUNT])
        .unwrap_or_else(|| halt(InitError::Peripheral("sample buffer")));
    let source = MicSampler::new(&adc, dma, MIC_DMA_CHANNEL, buffer);

    // LED matrix on GPIO7 through PIO0
    let (mut pio, sm0, _, _, _) = pac.PIO0.split(&mut pac.RESETS);
    let strip = Ws2812::new(
        pins.gpio7.into_function::<FunctionPio0>(),
        &mut pio,
        sm0,
        clocks.peripheral_clock.freq(),
    );

    // SSD1306 on I2C1: GPIO14 SDA, GPIO15 SCL
    let sda = pins.gpio14.into_function::<FunctionI2C>().into_pull_type::<PullUp>();
    let scl = pins.gpio15.into_function::<FunctionI2C>().into_pull_type::<PullUp>();
    let i2c = I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        clocks.system_clock.freq(),
    );
    let display = OledDisplay::new(i2c).unwrap_or_else(halt);

    // Buttons A (confirm) and B (back), active low
    let controls = Controls::new(
        &adc,
        pins.gpio5.into_pull_up_input(),
        pins.gpio6.into_pull_up_input(),
    );

    // Buzzer on GPIO10 (PWM5 A)
    let mut pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);
    pwm_slices.pwm5.channel_a.output_to(pins.gpio10);
    let buzzer = PwmBuzzer::new(pwm_slices.pwm5, timer);

    rprintln!("=== Hardware Ready ===");

    let peripherals = Peripherals {
        source,
        strip,
        display,
        controls,
        buzzer,
        delay: timer,
    };

    let mut app: KitchenApp<_, _, _, _, _, _, _, _, DEFAULT_SAMPLE_COUNT> =
        KitchenApp::new(&time_source, peripherals, Config::DEFAULT).unwrap_or_else(halt);

    app.run()
}
