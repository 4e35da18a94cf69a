// src/bin/cli.rs
use sisal_archive::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
