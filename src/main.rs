use std::process;

use frame_report::{anchor, report_stack, set_entry_point};
use log::{error, LevelFilter};

// Arguments are ignored.
#[inline(never)]
fn main() {
    pretty_env_logger::formatted_builder()
        .filter_module("frame_report", LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .init();

    set_entry_point(anchor!(main));
    if let Err(err) = report_stack() {
        error!("{}", err);
        process::exit(1);
    }
}
