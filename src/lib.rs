#[macro_use]
extern crate tracing;

mod app;
mod error;
mod logging;

pub use app::{
    report,
    run,
};
pub use error::{
    exit_code,
    ReportError,
};
pub use logging::init_logging;
pub use pve_reporter_config::{
    Args,
    Config,
};

pub fn init_errors() -> color_eyre::Result<()> {
    color_eyre::install()
}
