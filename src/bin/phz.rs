use anyhow::{Context, Result};
use clap::Parser;

use phz::cli::args::CliArgs;
use phz::cli::driver;

fn main() -> Result<()> {
    // Initialize tracing if PHZ_LOG or RUST_LOG is set (zero cost otherwise).
    phz::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let output = driver::run(&args, &cwd)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
