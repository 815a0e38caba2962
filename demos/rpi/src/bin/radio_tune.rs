use std::process::ExitCode;

use rda5807m_rpi::{
    finish, frequency_line, init_logging, is_quiet, missing_frequency, open_radio,
    parse_frequency_khz, EXIT_USAGE,
};

// radio_tune <MHz> [quiet]
fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let Some(frequency) = args.get(1) else {
        return missing_frequency();
    };
    let quiet = is_quiet(args.get(2).map(String::as_str));

    match run(frequency, quiet) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("Error : Radio is not turned on.");
            ExitCode::from(EXIT_USAGE)
        }
        Err(e) => finish(Err(e)),
    }
}

/// Returns `false` when the radio is powered down and nothing was done.
fn run(frequency: &str, quiet: bool) -> anyhow::Result<bool> {
    let khz = parse_frequency_khz(frequency)?;
    let mut radio = open_radio()?;

    if !radio.is_powered_up()? {
        return Ok(false);
    }

    radio.set_frequency(khz, !quiet)?;

    if !quiet {
        println!("Radio frequency tuned.");
        println!("{}", frequency_line(radio.frequency()?));
    }
    Ok(true)
}
