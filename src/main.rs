//! shelfseed entrypoint

use clap::Parser;
use shelfseed::{Result, SetupConfig, logging, setup};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shelfseed",
    version,
    about = "Generate the front-end QR label, seed the book catalog and write the server guide"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to shelfseed.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output the run summary as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SetupConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let summary = setup::run(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary.to_json())?);
    } else {
        for line in summary.human_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
