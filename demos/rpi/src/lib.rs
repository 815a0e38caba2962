//! Shared plumbing for the `radio_on`, `radio_off` and `radio_tune` tools.

use std::process::ExitCode;

use anyhow::Context;
use linux_embedded_hal::{Delay, I2cdev};
use rda5807m_rs::Rda5807m;

pub const I2C_BUS_PATH: &str = "/dev/i2c-1";

/// Exit status for a missing frequency or a radio that is not powered.
pub const EXIT_USAGE: u8 = 254;

pub type Radio = Rda5807m<I2cdev, Delay>;

pub fn init_logging() {
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("logger: {}", e);
    }
}

pub fn open_radio() -> anyhow::Result<Radio> {
    let i2c = I2cdev::new(I2C_BUS_PATH).with_context(|| format!("open {}", I2C_BUS_PATH))?;
    Ok(Rda5807m::new(i2c, Delay))
}

/// Only the literal `"0"` asks for messages; any other value, or none,
/// keeps the tool quiet.
pub fn is_quiet(arg: Option<&str>) -> bool {
    arg != Some("0")
}

/// Convert a frequency given in MHz to kHz.
pub fn parse_frequency_khz(mhz: &str) -> anyhow::Result<u32> {
    let mhz: f64 = mhz
        .trim()
        .parse()
        .with_context(|| format!("invalid frequency '{}'", mhz))?;
    if !mhz.is_finite() || mhz < 0.0 {
        anyhow::bail!("invalid frequency '{}'", mhz);
    }
    Ok((mhz * 1000.0).round() as u32)
}

pub fn frequency_line(khz: u32) -> String {
    format!("  frequency : {:4.1}[MHz]", khz as f64 / 1000.0)
}

/// Common tail of every tool: report the error and map it to an exit code.
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error : {:#}", e);
            ExitCode::FAILURE
        }
    }
}

pub fn missing_frequency() -> ExitCode {
    println!("Error : Frequency is not specified.");
    ExitCode::from(EXIT_USAGE)
}
