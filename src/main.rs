mod cli;
mod commands;
mod config;
mod error;
mod notify;
mod parser;
mod spreadsheet;

use cli::Args;
use commands::{handle_commands, Outcome};
use config::StartupContext;
use log::{debug, error, info};

fn main() {
    let args = Args::parse_normalized();
    init_logger(args.verbose);

    let ctx = StartupContext::detect();
    match handle_commands(&args, &ctx) {
        Ok(Outcome::Written { cells, path }) => {
            debug!("done: {} cells, {}", cells, path.display());
        }
        Ok(Outcome::Cancelled) => info!("cancelled by user"),
        Ok(Outcome::TemplateCreated(path)) => {
            info!("configuration template written to {}", path.display());
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
