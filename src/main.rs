use clap::Parser;
use color_eyre::Result;
use pve_zabbix_reporter::{
    exit_code,
    init_errors,
    init_logging,
    run,
    Args,
    Config,
};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    init_errors()?;
    let config = Config::new(Args::parse())?;
    init_logging(config.verbose)?;
    exit_code(run(&config))
}
