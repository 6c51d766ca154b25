use anyhow::Result;
use clap::Parser;
use sap_landscape::cli::RootArgs;
use sap_landscape::{commands, config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let config = config::load_config(args.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(args.command, &config, &mut out)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
