use std::process::ExitCode;

use rda5807m_rpi::{finish, init_logging, is_quiet, open_radio};

// radio_off [quiet]
fn main() -> ExitCode {
    init_logging();

    let quiet = is_quiet(std::env::args().nth(1).as_deref());

    finish(run(quiet))
}

fn run(quiet: bool) -> anyhow::Result<()> {
    let mut radio = open_radio()?;

    if !radio.is_powered_up()? {
        if !quiet {
            println!("Radio is already turned off.");
        }
        return Ok(());
    }

    radio.end()?;
    if !quiet {
        println!("Radio turned off.");
    }
    Ok(())
}
