use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use snafu::ErrorCompat;

mod args;
mod tally;

use crate::args::Args;
use crate::tally::config_reader::resolve_config;
use crate::tally::{run_election, RunOptions, TallyResult};

fn run(args: &Args) -> TallyResult<()> {
    let config = resolve_config(args)?;
    let opts = RunOptions {
        out: args.out.clone(),
        normalized_out: args.normalized_out.clone(),
        reference: args.reference.clone(),
    };
    let result = run_election(&config, &opts)?;
    info!("winners: {:?}", result.winners());
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
        std::process::exit(1);
    }
}
