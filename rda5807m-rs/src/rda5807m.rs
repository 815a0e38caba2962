use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;

use crate::read_write::ReadWrite;
use crate::registers::{
    Field, Register, AFCD, BAND, BASS, CHAN, CHIP_ID, CLK_MODE, DE, DHIZ, DMUTE, ENABLE,
    MODE_65M_50M, MONO, NEW_METHOD, RCLK_DIRECT_INPUT, RCLK_NON_CALIBRATE, RDS_EN, READCHAN, RSSI,
    SEEK, SEEK_MODE, SEEK_TH, SEEK_UP, SOFTBLEND_EN, SOFTMUTE_EN, SPACE, TH_SOFTBLEND, TUNE,
    VOLUME,
};
use crate::settings::{
    Band, ChannelSpacing, ClockMode, Config, PollLimit, POLL_INTERVAL_MS,
    READABLE_REGISTER_COUNT, WRITABLE_REGISTER_COUNT,
};

pub const CHAN_MAX: u16 = CHAN.max();
pub const VOLUME_MAX: u16 = VOLUME.max();
pub const SEEK_THRESHOLD_MAX: u16 = SEEK_TH.max();
pub const SOFT_BLEND_THRESHOLD_MAX: u16 = TH_SOFTBLEND.max();
pub const RSSI_MAX: u16 = RSSI.max();

const DEFAULT_SEEK_THRESHOLD: u16 = 8;
const DEFAULT_VOLUME: u16 = 11;
const DEFAULT_SOFT_BLEND_THRESHOLD: u16 = 16;

pub struct Rda5807m<I2C, D> {
    pub(crate) i2c: I2C,
    pub(crate) delay: D,
    config: Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rda5807mError {
    BusRead(ErrorKind),
    BusWrite(ErrorKind),
    /// TUNE or SEEK did not clear within the configured poll limit.
    Timeout,
}

impl fmt::Display for Rda5807mError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusRead(kind) => write!(f, "register read failed: {}", kind),
            Self::BusWrite(kind) => write!(f, "register write failed: {}", kind),
            Self::Timeout => write!(f, "timed out waiting for the chip"),
        }
    }
}

impl core::error::Error for Rda5807mError {}

impl<I2C, D> Rda5807m<I2C, D>
where
    I2C: ReadWrite,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, Config::default())
    }

    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Self {
        Rda5807m { i2c, delay, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the bus and delay back. Dropping the driver releases them too.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn chip_id(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(CHIP_ID)
    }

    pub fn is_powered_up(&mut self) -> Result<bool, Rda5807mError> {
        Ok(self.decode(ENABLE)? != 0)
    }

    /// Power up and load the operating defaults.
    ///
    /// Every call rewrites the defaults, even when the chip is already
    /// running. An error part way through leaves a mix of old and new
    /// settings; calling `begin` again recovers.
    pub fn begin(&mut self) -> Result<(), Rda5807mError> {
        self.update(ENABLE, 1)?;

        self.modify(Register::Control, |word| {
            let word = DHIZ.inject(word, 1);
            let word = DMUTE.inject(word, 1);
            let word = MONO.inject(word, 0);
            let word = BASS.inject(word, 0);
            let word = RCLK_NON_CALIBRATE.inject(word, 0);
            let word = RCLK_DIRECT_INPUT.inject(word, 0);
            let word = SEEK_UP.inject(word, 0);
            let word = SEEK.inject(word, 0);
            let word = SEEK_MODE.inject(word, 0);
            let word = CLK_MODE.inject(word, ClockMode::Khz32_768 as u16);
            let word = RDS_EN.inject(word, 0);
            NEW_METHOD.inject(word, 0)
        })?;

        let plan = self.config.band_plan;
        self.modify(Register::Channel, |word| {
            let word = CHAN.inject(word, 0);
            let word = TUNE.inject(word, 0);
            let word = BAND.inject(word, plan.band as u16);
            SPACE.inject(word, plan.spacing as u16)
        })?;

        let de_emphasis = self.config.de_emphasis;
        self.modify(Register::Config, |word| {
            let word = DE.inject(word, de_emphasis as u16);
            let word = SOFTMUTE_EN.inject(word, 0);
            AFCD.inject(word, 0)
        })?;

        self.modify(Register::Volume, |word| {
            let word = SEEK_TH.inject(word, DEFAULT_SEEK_THRESHOLD);
            VOLUME.inject(word, DEFAULT_VOLUME)
        })?;

        self.modify(Register::Blend, |word| {
            let word = TH_SOFTBLEND.inject(word, DEFAULT_SOFT_BLEND_THRESHOLD);
            let word = MODE_65M_50M.inject(word, 1);
            SOFTBLEND_EN.inject(word, 1)
        })?;

        log::debug!("powered up");
        Ok(())
    }

    /// Power down. Other registers keep their contents.
    pub fn end(&mut self) -> Result<(), Rda5807mError> {
        self.update(ENABLE, 0)?;
        log::debug!("powered down");
        Ok(())
    }

    pub fn band(&mut self) -> Result<Band, Rda5807mError> {
        Ok(Band::from_bits(self.decode(BAND)?))
    }

    pub fn channel_spacing(&mut self) -> Result<ChannelSpacing, Rda5807mError> {
        Ok(ChannelSpacing::from_bits(self.decode(SPACE)?))
    }

    /// Lower band edge in kHz as currently programmed in the chip.
    pub fn frequency_min(&mut self) -> Result<u32, Rda5807mError> {
        let band = self.band()?;
        let mode_65m = match band {
            Band::EastEurope => self.decode(MODE_65M_50M)? != 0,
            _ => false,
        };
        Ok(band.min_khz(mode_65m))
    }

    pub fn read_channel(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(READCHAN)
    }

    /// Tuned frequency in kHz, assuming the configured band plan.
    ///
    /// Only READCHAN is read. If Band or Spacing were changed behind the
    /// driver's back the result is wrong; use
    /// [`frequency_from_registers`](Self::frequency_from_registers) then.
    pub fn frequency(&mut self) -> Result<u32, Rda5807mError> {
        let channel = self.read_channel()?;
        Ok(self.config.band_plan.frequency_for(channel))
    }

    /// Tuned frequency in kHz, reading Band and Spacing from the chip.
    pub fn frequency_from_registers(&mut self) -> Result<u32, Rda5807mError> {
        let min = self.frequency_min()?;
        let spacing = self.channel_spacing()?.khz();
        let channel = self.read_channel()?;
        Ok(spacing * channel as u32 + min)
    }

    /// Tune to `khz`. The target is clamped to the band plan and rounded down
    /// to the channel grid.
    ///
    /// With `wait_for_completion` false the call returns as soon as the tune
    /// has been started.
    pub fn set_frequency(
        &mut self,
        khz: u32,
        wait_for_completion: bool,
    ) -> Result<(), Rda5807mError> {
        let channel = self.config.band_plan.channel_for(khz, CHAN_MAX);
        log::debug!("tune to {} kHz, channel {}", khz, channel);

        // CHAN is ignored unless TUNE is set in the same write
        self.modify(Register::Channel, |word| {
            TUNE.inject(CHAN.inject(word, channel), 1)
        })?;

        if wait_for_completion {
            self.wait_for_clear(TUNE)?;
        }
        Ok(())
    }

    /// Seek to the next station and block until the chip is done.
    ///
    /// With `wrap` the seek continues from the opposite band edge instead of
    /// stopping at the limit.
    pub fn seek(&mut self, up: bool, wrap: bool) -> Result<(), Rda5807mError> {
        log::debug!("seek {}, wrap {}", if up { "up" } else { "down" }, wrap);

        self.update(SEEK_UP, up as u16)?;
        self.update(SEEK_MODE, !wrap as u16)?;
        self.update(SEEK, 1)?;

        self.wait_for_clear(SEEK)
    }

    pub fn rssi(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(RSSI)
    }

    pub fn seek_threshold(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(SEEK_TH)
    }

    pub fn set_seek_threshold(&mut self, threshold: u16) -> Result<(), Rda5807mError> {
        self.update(SEEK_TH, threshold.min(SEEK_THRESHOLD_MAX))
    }

    pub fn volume(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(VOLUME)
    }

    pub fn set_volume(&mut self, volume: u16) -> Result<(), Rda5807mError> {
        self.update(VOLUME, volume.min(VOLUME_MAX))
    }

    pub fn is_muted(&mut self) -> Result<bool, Rda5807mError> {
        let method = self.config.mute_method;
        Ok(method.is_muted(self.decode(method.field())?))
    }

    pub fn set_mute(&mut self, mute: bool) -> Result<(), Rda5807mError> {
        let method = self.config.mute_method;
        self.update(method.field(), method.encode(mute))?;
        log::debug!("mute {}", mute);
        Ok(())
    }

    pub fn is_soft_blend_enabled(&mut self) -> Result<bool, Rda5807mError> {
        Ok(self.decode(SOFTBLEND_EN)? != 0)
    }

    pub fn enable_soft_blend(&mut self, enable: bool) -> Result<(), Rda5807mError> {
        self.update(SOFTBLEND_EN, enable as u16)
    }

    pub fn soft_blend_threshold(&mut self) -> Result<u16, Rda5807mError> {
        self.decode(TH_SOFTBLEND)
    }

    pub fn set_soft_blend_threshold(&mut self, threshold: u16) -> Result<(), Rda5807mError> {
        self.update(TH_SOFTBLEND, threshold.min(SOFT_BLEND_THRESHOLD_MAX))
    }

    /// Dump of every readable register, for diagnostics.
    pub fn read_registers(&mut self) -> Result<[u16; READABLE_REGISTER_COUNT as usize], Rda5807mError> {
        let mut registers = [0u16; READABLE_REGISTER_COUNT as usize];
        for (address, word) in (0..READABLE_REGISTER_COUNT).zip(registers.iter_mut()) {
            *word = self.read_register(address)?;
        }
        Ok(registers)
    }

    pub fn decode(&mut self, field: Field) -> Result<u16, Rda5807mError> {
        Ok(field.extract(self.read_register(field.register.addr())?))
    }

    /// Read-modify-write of one field. `value` must already fit the field,
    /// excess bits are masked off.
    pub fn update(&mut self, field: Field, value: u16) -> Result<(), Rda5807mError> {
        self.modify(field.register, |word| field.inject(word, value))
    }

    // The register is always read fresh, so a write from another bus master
    // between the read and the write is lost.
    fn modify<F>(&mut self, register: Register, f: F) -> Result<(), Rda5807mError>
    where
        F: FnOnce(u16) -> u16,
    {
        let word = self.read_register(register.addr())?;
        self.write_register(register.addr(), f(word))
    }

    /// Addresses past the readable window read as zero without touching the
    /// bus.
    pub fn read_register(&mut self, address: u8) -> Result<u16, Rda5807mError> {
        if address >= READABLE_REGISTER_COUNT {
            return Ok(0);
        }

        let mut buffer = [0u8; 2];
        let result = self
            .i2c
            .read_many(self.config.address, address, &mut buffer);
        self.delay.delay_us(self.config.settle_us);
        result.map_err(Rda5807mError::BusRead)?;

        let word = u16::from_be_bytes(buffer);
        log::trace!("read  {:#04x} = {:#06x}", address, word);
        Ok(word)
    }

    /// Writes past the writable window are dropped.
    pub fn write_register(&mut self, address: u8, word: u16) -> Result<(), Rda5807mError> {
        if address >= WRITABLE_REGISTER_COUNT {
            return Ok(());
        }

        log::trace!("write {:#04x} = {:#06x}", address, word);
        let result = self
            .i2c
            .write_many(self.config.address, address, &word.to_be_bytes());
        self.delay.delay_us(self.config.settle_us);
        result.map_err(Rda5807mError::BusWrite)
    }

    fn wait_for_clear(&mut self, field: Field) -> Result<(), Rda5807mError> {
        let mut polls: u32 = 0;
        while self.decode(field)? != 0 {
            if let PollLimit::MaxPolls(limit) = self.config.poll_limit {
                if polls >= limit {
                    log::warn!("{:?} still set after {} polls", field.register, polls);
                    return Err(Rda5807mError::Timeout);
                }
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            polls = polls.saturating_add(1);
        }
        Ok(())
    }
}
