use clap::CommandFactory;
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::process;

use hreq_core::{runner, Error};

mod args;
mod reqwest_client;

use args::Cli;
use reqwest_client::ReqwestClient;

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // Dependencies stay at warn; only our own crates get chatty.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("hreq", level)
        .filter_module("hreq_core", level)
        .format_timestamp(None)
        .init();
}

fn fail(err: &Error) -> ! {
    if let Error::Usage = err {
        eprintln!("{} {}", "error:".red().bold(), err);
        eprintln!("{}", Cli::command().render_help());
    } else {
        eprintln!("{}", err.to_string().red());
    }
    process::exit(err.exit_code());
}

fn main() {
    let cli = Cli::parse_normalized();

    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    let config = cli.to_config();

    // Body and method problems surface before any connection is made.
    let request = runner::prepare(&config).unwrap_or_else(|e| fail(&e));
    let client = ReqwestClient::new(&config.transport).unwrap_or_else(|e| fail(&e));
    let response = runner::send(&client, &request).unwrap_or_else(|e| fail(&e));

    if let Err(e) = runner::report(&mut io::stdout().lock(), &response) {
        eprintln!("{}", format!("write output: {}", e).red());
        process::exit(1);
    }
}
