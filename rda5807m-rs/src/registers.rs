/// Register map of the RDA5807M in random access mode.
///
/// All sixteen words can be read, only `0x00..=0x07` accept writes.
#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    ChipId = 0x00, // Chip identification, 0x5804 on genuine parts.
    Reserved01 = 0x01,
    Control = 0x02, // Audio output, seek control, clock mode, power up.
    Channel = 0x03, // Channel select, tune, band and spacing.
    Config = 0x04, // De-emphasis, soft mute, AFC.
    Volume = 0x05, // Seek threshold and DAC gain.
    OpenMode = 0x06,
    Blend = 0x07, // Soft blend threshold and enable, 65M/50M mode.
    Reserved08 = 0x08,
    Reserved09 = 0x09,
    Status = 0x0A, // Read channel, tune/seek complete flags.
    Signal = 0x0B, // RSSI and station indicators.
    RdsA = 0x0C,
    RdsB = 0x0D,
    RdsC = 0x0E,
    RdsD = 0x0F,
}

impl Register {
    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// A masked, shifted bit range inside one register word.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub register: Register,
    pub mask: u16,
    pub shift: u8,
}

impl Field {
    pub const fn new(register: Register, mask: u16, shift: u8) -> Self {
        Field {
            register,
            mask,
            shift,
        }
    }

    /// A field whose shift is the position of the lowest bit in `mask`.
    pub const fn bits(register: Register, mask: u16) -> Self {
        Self::new(register, mask, mask.trailing_zeros() as u8)
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max(self) -> u16 {
        self.mask >> self.shift
    }

    /// Number of bits in the field.
    #[inline]
    pub const fn width(self) -> u32 {
        self.max().count_ones()
    }

    #[inline]
    pub const fn extract(self, word: u16) -> u16 {
        (word & self.mask) >> self.shift
    }

    /// Replace the field inside `word`, leaving every bit outside `mask`
    /// untouched. Bits of `value` wider than the field are dropped.
    #[inline]
    pub const fn inject(self, word: u16, value: u16) -> u16 {
        (word & !self.mask) | ((value << self.shift) & self.mask)
    }
}

// REG 00H
pub const CHIP_ID: Field = Field::new(Register::ChipId, 0xFFFF, 0);

// REG 02H
pub const DHIZ: Field = Field::bits(Register::Control, 0b1000_0000_0000_0000); // 0 = high impedance
pub const DMUTE: Field = Field::bits(Register::Control, 0b0100_0000_0000_0000); // 0 = mute
pub const MONO: Field = Field::bits(Register::Control, 0b0010_0000_0000_0000);
pub const BASS: Field = Field::bits(Register::Control, 0b0001_0000_0000_0000);
pub const RCLK_NON_CALIBRATE: Field = Field::bits(Register::Control, 0b0000_1000_0000_0000);
pub const RCLK_DIRECT_INPUT: Field = Field::bits(Register::Control, 0b0000_0100_0000_0000);
pub const SEEK_UP: Field = Field::bits(Register::Control, 0b0000_0010_0000_0000);
pub const SEEK: Field = Field::bits(Register::Control, 0b0000_0001_0000_0000); // self-clearing
pub const SEEK_MODE: Field = Field::bits(Register::Control, 0b0000_0000_1000_0000); // 1 = stop at band limit
pub const CLK_MODE: Field = Field::bits(Register::Control, 0b0000_0000_0111_0000);
pub const RDS_EN: Field = Field::bits(Register::Control, 0b0000_0000_0000_1000);
pub const NEW_METHOD: Field = Field::bits(Register::Control, 0b0000_0000_0000_0100);
pub const SOFT_RESET: Field = Field::bits(Register::Control, 0b0000_0000_0000_0010);
pub const ENABLE: Field = Field::bits(Register::Control, 0b0000_0000_0000_0001);

// REG 03H
pub const CHAN: Field = Field::bits(Register::Channel, 0b1111_1111_1100_0000);
pub const TUNE: Field = Field::bits(Register::Channel, 0b0000_0000_0001_0000); // self-clearing
pub const BAND: Field = Field::bits(Register::Channel, 0b0000_0000_0000_1100);
pub const SPACE: Field = Field::bits(Register::Channel, 0b0000_0000_0000_0011);

// REG 04H
pub const DE: Field = Field::bits(Register::Config, 0b0000_1000_0000_0000); // 1 = 50us
pub const SOFTMUTE_EN: Field = Field::bits(Register::Config, 0b0000_0010_0000_0000);
pub const AFCD: Field = Field::bits(Register::Config, 0b0000_0001_0000_0000); // 1 = AFC disabled

// REG 05H
pub const SEEK_TH: Field = Field::bits(Register::Volume, 0b0000_1111_0000_0000);
pub const VOLUME: Field = Field::bits(Register::Volume, 0b0000_0000_0000_1111);

// REG 07H
pub const TH_SOFTBLEND: Field = Field::bits(Register::Blend, 0b0111_1100_0000_0000); // 2 dB steps
pub const MODE_65M_50M: Field = Field::bits(Register::Blend, 0b0000_0010_0000_0000);
pub const SOFTBLEND_EN: Field = Field::bits(Register::Blend, 0b0000_0000_0000_0010);

// REG 0AH
pub const READCHAN: Field = Field::bits(Register::Status, 0b0000_0011_1111_1111);

// REG 0BH
pub const RSSI: Field = Field::bits(Register::Signal, 0b1111_1110_0000_0000); // logarithmic
