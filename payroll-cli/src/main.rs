use clap::Parser;
use tracing::debug;

use payroll_cli::{app, cli::Cli, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let output = app::execute(&cli)?;
    print!("{output}");

    Ok(())
}
