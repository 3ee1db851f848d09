use clap::Parser;
use curvemark::cli::{render_dry_run, run, Cli};
use curvemark::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    let report = run(&cli)?;

    if cli.dry_run {
        println!("{}", render_dry_run(&report)?);
    } else {
        for path in &report.written {
            println!("{}", path.display());
        }
    }

    Ok(())
}
