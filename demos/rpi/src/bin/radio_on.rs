use std::process::ExitCode;

use rda5807m_rpi::{
    finish, frequency_line, init_logging, is_quiet, missing_frequency, open_radio,
    parse_frequency_khz,
};

// radio_on <MHz> [quiet]
fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let Some(frequency) = args.get(1) else {
        return missing_frequency();
    };
    let quiet = is_quiet(args.get(2).map(String::as_str));

    finish(run(frequency, quiet))
}

fn run(frequency: &str, quiet: bool) -> anyhow::Result<()> {
    let khz = parse_frequency_khz(frequency)?;
    let mut radio = open_radio()?;

    radio.begin()?;
    // quiet callers do not wait for the tune to finish
    radio.set_frequency(khz, !quiet)?;

    if !quiet {
        println!("Radio turned on.");
        println!("{}", frequency_line(radio.frequency()?));
    }
    Ok(())
}
