//! `mini-tracker [port]`: a minimal, single-threaded BitTorrent HTTP
//! tracker. Grounded on `src/bin/http_tracker_client.rs`'s thin binary
//! shape (a few lines of setup calling straight into library code), with
//! the async runtime and config-file layer stripped out — this tracker
//! takes its one setting from argv, not a `Configuration` struct.

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};

use mini_tracker::clock::SystemClock;
use mini_tracker::http::server;
use mini_tracker::tracker::Registry;
use mini_tracker::{cli, logging};

const DEFAULT_PORT: u16 = 80;

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!(error = ?err, "fatal error");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let port = match args.len() {
        1 => DEFAULT_PORT,
        2 => match cli::parse_port_token(&args[1]) {
            Some(port) => port,
            None => return Ok(usage(&args[0])),
        },
        _ => return Ok(usage(&args[0])),
    };

    let listener = server::bind(port).context("failed to start listening")?;
    info!(port, "mini-tracker started");

    let _ = ctrlc::set_handler(move || {
        info!("exiting...");
        std::process::exit(0);
    });

    let mut registry = Registry::default();
    let clock = SystemClock;
    server::run(&listener, &mut registry, &clock)
}

fn usage(program: &str) -> ExitCode {
    eprintln!("Usage: {program} [bindport]");
    ExitCode::from(255) // matches the original's exit(-1)
}
