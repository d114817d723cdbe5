mod cli;
mod commands;
mod input;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let default_filter = match args.verbose {
        0 => "wrpl=warn,wrpl_core=warn",
        1 => "wrpl=info,wrpl_core=info",
        _ => "wrpl=debug,wrpl_core=debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Parse {
            path,
            catalog,
            parity,
            format,
            output,
        } => commands::parse::run(
            commands::load_layout(args.layout.as_deref())?,
            &path,
            catalog.as_deref(),
            parity,
            format,
            output.as_deref(),
        ),
        Command::Batch {
            dir,
            catalog,
            parity,
            output,
        } => commands::batch::run(
            commands::load_layout(args.layout.as_deref())?,
            &dir,
            catalog.as_deref(),
            parity,
            output.as_deref(),
        ),
        Command::Nation { vehicle, catalog } => commands::nation::run(&vehicle, &catalog),
        Command::Layout { output } => commands::layout::run(output.as_deref()),
    }
}
