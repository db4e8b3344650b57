use std::process;

use clap::Parser;
use convert_font::{Args, JobConfig};
use env_logger::Env;

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let config = JobConfig::try_from(args).unwrap_or_else(|err| err.into_clap_error().exit());
    log::debug!("{config:?}");

    if let Err(err) = convert_font::run(&config) {
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}
