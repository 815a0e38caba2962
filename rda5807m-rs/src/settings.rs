use crate::registers::{Field, DHIZ, DMUTE, SOFTMUTE_EN};

pub const RDA5807M_I2C_ADDRESS: u8 = 0x11;

pub const READABLE_REGISTER_COUNT: u8 = 16;
pub const WRITABLE_REGISTER_COUNT: u8 = 8;

// STOP to START time is 1.3us minimum
pub const SETTLE_DELAY_US: u32 = 10;
pub const POLL_INTERVAL_MS: u32 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Us = 0b00,         // 87 - 108 MHz
    Japan = 0b01,      // 76 - 91 MHz
    WorldWide = 0b10,  // 76 - 108 MHz
    EastEurope = 0b11, // 65 - 76 MHz, or 50 - 65 MHz without 65M_50M_MODE
}

impl Band {
    pub fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b00 => Self::Us,
            0b01 => Self::Japan,
            0b10 => Self::WorldWide,
            _ => Self::EastEurope,
        }
    }

    /// Lower band edge in kHz. `mode_65m` is the 65M_50M_MODE bit and only
    /// matters for [`Band::EastEurope`].
    pub fn min_khz(self, mode_65m: bool) -> u32 {
        match self {
            Self::Us => 87_000,
            Self::Japan | Self::WorldWide => 76_000,
            Self::EastEurope if mode_65m => 65_000,
            Self::EastEurope => 50_000,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelSpacing {
    Khz100 = 0b00,
    Khz200 = 0b01,
    Khz50 = 0b10,
    Khz25 = 0b11,
}

impl ChannelSpacing {
    pub fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0b00 => Self::Khz100,
            0b01 => Self::Khz200,
            0b10 => Self::Khz50,
            _ => Self::Khz25,
        }
    }

    pub fn khz(self) -> u32 {
        match self {
            Self::Khz100 => 100,
            Self::Khz200 => 200,
            Self::Khz50 => 50,
            Self::Khz25 => 25,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeEmphasis {
    Us75 = 0,
    Us50 = 1,
}

/// Reference clock input. Only the 32.768 kHz crystal is used by `begin`.
#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    Khz32_768 = 0b000,
    Mhz12 = 0b001,
    Mhz13 = 0b010,
    Mhz19_2 = 0b011,
    Mhz24 = 0b101,
    Mhz26 = 0b110,
    Mhz38_4 = 0b111,
}

/// The chip offers three ways to silence the audio output. Exactly one of
/// them is used for both setting and reading the mute state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuteMethod {
    /// SOFTMUTE_EN set means muted.
    SoftMute,
    /// DMUTE cleared means muted.
    DacMute,
    /// DHIZ cleared means muted, the output is left floating.
    HighZ,
}

impl MuteMethod {
    pub fn field(self) -> Field {
        match self {
            Self::SoftMute => SOFTMUTE_EN,
            Self::DacMute => DMUTE,
            Self::HighZ => DHIZ,
        }
    }

    /// Field value that represents `muted`.
    pub fn encode(self, muted: bool) -> u16 {
        match self {
            Self::SoftMute => muted as u16,
            Self::DacMute | Self::HighZ => !muted as u16,
        }
    }

    pub fn is_muted(self, value: u16) -> bool {
        match self {
            Self::SoftMute => value != 0,
            Self::DacMute | Self::HighZ => value == 0,
        }
    }
}

/// Band and spacing the driver assumes the chip is running with.
///
/// `begin` programs the chip with this plan, after which frequency
/// conversions are done locally instead of reading BAND and SPACE back on
/// every call. The assumption holds only while nothing else on the bus
/// changes Band or Spacing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BandPlan {
    pub band: Band,
    pub spacing: ChannelSpacing,
}

impl BandPlan {
    pub const WORLD_WIDE_100K: BandPlan = BandPlan {
        band: Band::WorldWide,
        spacing: ChannelSpacing::Khz100,
    };

    /// `begin` always sets 65M_50M_MODE, so East Europe starts at 65 MHz.
    pub fn min_khz(&self) -> u32 {
        self.band.min_khz(true)
    }

    /// Channel index for `khz`, clamped to `[0, chan_max]`. Frequencies below
    /// the band edge select channel 0, anything off-grid rounds down.
    pub fn channel_for(&self, khz: u32, chan_max: u16) -> u16 {
        let offset = khz.saturating_sub(self.min_khz());
        let channel = offset / self.spacing.khz();
        channel.min(chan_max as u32) as u16
    }

    pub fn frequency_for(&self, channel: u16) -> u32 {
        self.spacing.khz() * channel as u32 + self.min_khz()
    }
}

impl Default for BandPlan {
    fn default() -> Self {
        Self::WORLD_WIDE_100K
    }
}

/// How long to wait for the chip to clear TUNE or SEEK.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollLimit {
    /// Poll until the bit clears, however long that takes.
    Unbounded,
    /// Give up with a timeout after this many poll intervals.
    MaxPolls(u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub address: u8,
    pub mute_method: MuteMethod,
    pub band_plan: BandPlan,
    pub de_emphasis: DeEmphasis,
    pub poll_limit: PollLimit,
    pub settle_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: RDA5807M_I2C_ADDRESS,
            mute_method: MuteMethod::DacMute,
            band_plan: BandPlan::WORLD_WIDE_100K,
            de_emphasis: DeEmphasis::Us50,
            poll_limit: PollLimit::Unbounded,
            settle_us: SETTLE_DELAY_US,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_mute_method(mut self, mute_method: MuteMethod) -> Self {
        self.mute_method = mute_method;
        self
    }

    pub fn with_band_plan(mut self, band_plan: BandPlan) -> Self {
        self.band_plan = band_plan;
        self
    }

    pub fn with_de_emphasis(mut self, de_emphasis: DeEmphasis) -> Self {
        self.de_emphasis = de_emphasis;
        self
    }

    pub fn with_poll_limit(mut self, poll_limit: PollLimit) -> Self {
        self.poll_limit = poll_limit;
        self
    }

    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_band_min() {
        let table_test: [(Band, bool, u32); 5] = [
            (Band::Us, true, 87_000),
            (Band::Japan, false, 76_000),
            (Band::WorldWide, false, 76_000),
            (Band::EastEurope, true, 65_000),
            (Band::EastEurope, false, 50_000),
        ];

        table_test.into_iter().for_each(|(band, mode_65m, min)| {
            assert_eq!(band.min_khz(mode_65m), min);
        });
    }

    #[test]
    fn test_spacing_from_bits() {
        let table_test: [(u16, u32); 4] = [(0, 100), (1, 200), (2, 50), (3, 25)];

        table_test.into_iter().for_each(|(bits, khz)| {
            assert_eq!(ChannelSpacing::from_bits(bits).khz(), khz);
        });
    }

    #[test]
    fn test_mute_encoding() {
        assert_eq!(MuteMethod::SoftMute.encode(true), 1);
        assert_eq!(MuteMethod::DacMute.encode(true), 0);
        assert_eq!(MuteMethod::HighZ.encode(false), 1);

        for method in [MuteMethod::SoftMute, MuteMethod::DacMute, MuteMethod::HighZ] {
            assert!(method.is_muted(method.encode(true)));
            assert!(!method.is_muted(method.encode(false)));
        }
    }

    #[test]
    fn test_channel_for() {
        let plan = BandPlan::WORLD_WIDE_100K;

        assert_eq!(plan.channel_for(101_500, 1023), 255);
        assert_eq!(plan.channel_for(60_000, 1023), 0);
        assert_eq!(plan.channel_for(76_099, 1023), 0);
        assert_eq!(plan.channel_for(500_000, 1023), 1023);
        assert_eq!(plan.frequency_for(255), 101_500);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::default()
            .with_mute_method(MuteMethod::HighZ)
            .with_poll_limit(PollLimit::MaxPolls(100));

        assert_eq!(config.address, 0x11);
        assert_eq!(config.mute_method, MuteMethod::HighZ);
        assert_eq!(config.poll_limit, PollLimit::MaxPolls(100));
        assert_eq!(config.band_plan, BandPlan::WORLD_WIDE_100K);
    }
}
