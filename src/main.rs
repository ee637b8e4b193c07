mod args;
mod lbv;

use clap::Parser;
use log::{debug, error, info};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("args: {:?}", args);

    if let Err(e) = lbv::run(&args) {
        error!("{}", e);
        eprintln!("lbview: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            debug!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
