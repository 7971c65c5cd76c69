use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use du::{
    cli::{translate_slash_switches, Args},
    config::Config,
    file_system::path::PathStyle,
    output::errors::print_error,
    usage::DiskUsage,
};

const LOG_ENV: &str = "DU_LOG";

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse_from(translate_slash_switches(
        std::env::args_os(),
        PathStyle::NATIVE,
    ));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::try_from(args)?;
    tracing::debug!(?config, "starting");

    let stdout = io::stdout();
    let mut usage = DiskUsage::new(&config, stdout.lock(), io::stderr());
    usage.run().context("stopped measuring")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}
