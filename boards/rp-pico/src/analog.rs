//! ADC front-end shared by the microphone and the joystick.
//!
//! The microphone batch goes ADC FIFO -> DMA -> RAM. The HAL's FIFO driver
//! borrows the whole ADC for the lifetime of the transfer, which would lock the
//! joystick out, so the ADC and the DMA channel are driven at register level
//! here and the ADC is shared through a `RefCell`.

use core::cell::RefCell;
use core::sync::atomic::{Ordering, compiler_fence};

use kitchen_monitor::{DEFAULT_SAMPLE_COUNT, InitError, SampleSource};
use rp_pico::hal::pac::{ADC, DMA, RESETS};

/// DREQ number of the ADC FIFO.
const DREQ_ADC: u8 = 36;

/// Highest ADC input (channel 4 is the temperature sensor).
const MAX_ADC_CHANNEL: u8 = 4;

/// ADC peripheral shared between the sampler and the joystick.
pub type SharedAdc = RefCell<ADC>;

/// Takes the ADC out of reset, powers it up and waits until it is ready.
pub fn enable_adc(adc: ADC, resets: &mut RESETS) -> SharedAdc {
    resets.reset().modify(|_, w| w.adc().clear_bit());
    while resets.reset_done().read().adc().bit_is_clear() {}

    adc.cs().write(|w| w.en().set_bit());
    while adc.cs().read().ready().bit_is_clear() {}

    RefCell::new(adc)
}

/// Takes the DMA controller out of reset.
pub fn enable_dma(dma: DMA, resets: &mut RESETS) -> DMA {
    resets.reset().modify(|_, w| w.dma().clear_bit());
    while resets.reset_done().read().dma().bit_is_clear() {}
    dma
}

/// Single blocking conversion on `channel`.
///
/// Leaves the FIFO untouched; a sampled value that lands there is dropped by
/// the next microphone acquisition's drain.
pub fn read_once(adc: &SharedAdc, channel: u8) -> u16 {
    let adc = adc.borrow();
    adc.cs().modify(|_, w| unsafe { w.ainsel().bits(channel) });
    adc.cs().modify(|_, w| w.start_once().set_bit());
    while adc.cs().read().ready().bit_is_clear() {}
    adc.result().read().result().bits()
}

/// Microphone sampler: ADC free-running into the FIFO, drained by one DMA channel.
pub struct MicSampler<'a> {
    adc: &'a SharedAdc,
    dma: DMA,
    dma_channel: usize,
    buffer: &'static mut [u16; DEFAULT_SAMPLE_COUNT],
    channel: u8,
    count: usize,
}

impl<'a> MicSampler<'a> {
    /// Creates a sampler writing into `buffer` through `dma_channel`.
    pub fn new(
        adc: &'a SharedAdc,
        dma: DMA,
        dma_channel: usize,
        buffer: &'static mut [u16; DEFAULT_SAMPLE_COUNT],
    ) -> Self {
        Self {
            adc,
            dma,
            dma_channel,
            buffer,
            channel: 0,
            count: 0,
        }
    }
}

impl SampleSource for MicSampler<'_> {
    fn configure(&mut self, channel: u8, clock_divisor: f32) -> Result<(), InitError> {
        if channel > MAX_ADC_CHANNEL {
            return Err(InitError::Peripheral("ADC input"));
        }
        if self.dma_channel >= 12 || self.dma.ch(self.dma_channel).ch_ctrl_trig().read().busy().bit_is_set() {
            return Err(InitError::NoFreeDmaChannel);
        }

        let integer = clock_divisor as u16;
        let fraction = ((clock_divisor - integer as f32) * 256.0) as u8;

        let adc = self.adc.borrow();
        adc.div()
            .write(|w| unsafe { w.int().bits(integer).frac().bits(fraction) });
        // 12-bit results, DREQ as soon as one sample is queued
        adc.fcs().write(|w| unsafe {
            w.en()
                .set_bit()
                .dreq_en()
                .set_bit()
                .thresh()
                .bits(1)
                .shift()
                .clear_bit()
        });

        self.channel = channel;
        rtt_target::rprintln!(
            "mic on ADC{}, divisor {}.{}/256, DMA channel {}",
            channel,
            integer,
            fraction,
            self.dma_channel
        );
        Ok(())
    }

    fn drain(&mut self) {
        let adc = self.adc.borrow();
        adc.cs().modify(|_, w| w.start_many().clear_bit());
        while adc.fcs().read().empty().bit_is_clear() {
            let _ = adc.fifo().read();
        }
    }

    fn start(&mut self, count: usize) {
        self.count = count.min(self.buffer.len());

        let adc = self.adc.borrow();
        adc.cs().modify(|_, w| unsafe { w.ainsel().bits(self.channel) });

        let ch = self.dma.ch(self.dma_channel);
        ch.ch_read_addr()
            .write(|w| unsafe { w.bits(adc.fifo().as_ptr() as u32) });
        ch.ch_write_addr()
            .write(|w| unsafe { w.bits(self.buffer.as_mut_ptr() as u32) });
        ch.ch_trans_count()
            .write(|w| unsafe { w.bits(self.count as u32) });

        compiler_fence(Ordering::SeqCst);
        ch.ch_ctrl_trig().write(|w| unsafe {
            w.data_size()
                .size_halfword()
                .incr_read()
                .clear_bit()
                .incr_write()
                .set_bit()
                .treq_sel()
                .bits(DREQ_ADC)
                .chain_to()
                .bits(self.dma_channel as u8)
                .en()
                .set_bit()
        });

        adc.cs().modify(|_, w| w.start_many().set_bit());
    }

    fn is_complete(&mut self) -> bool {
        self.dma
            .ch(self.dma_channel)
            .ch_ctrl_trig()
            .read()
            .busy()
            .bit_is_clear()
    }

    fn abort(&mut self) {
        let mask = 1u16 << self.dma_channel;
        self.dma
            .chan_abort()
            .write(|w| unsafe { w.chan_abort().bits(mask) });
        while self.dma.chan_abort().read().chan_abort().bits() & mask != 0 {}
    }

    fn halt(&mut self) {
        self.adc
            .borrow()
            .cs()
            .modify(|_, w| w.start_many().clear_bit());
    }

    fn read_into(&mut self, buffer: &mut [u16]) {
        compiler_fence(Ordering::SeqCst);
        let n = buffer.len().min(self.count);
        for (slot, sample) in buffer[..n].iter_mut().zip(self.buffer.iter()) {
            // written by the DMA engine, not by this code
            *slot = unsafe { core::ptr::read_volatile(sample) };
        }
    }
}
