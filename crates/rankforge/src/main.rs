#![forbid(unsafe_code)]

mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use rankforge_core::config::GeneratorConfig;
use rankforge_engine::generate::Generator;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "rankforge",
    version,
    about = "Interactive generator for ranked Origins character datapacks."
)]
struct Cli {
    /// Root of the generated tree (overrides the config file).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file layered over .rankforge/config.json.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    tracing::debug!(?config, "resolved config");

    let generator = Generator::new(&config)?;
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), &generator);
    session.run()
}

/// `RUST_LOG` wins; otherwise the verbosity flag picks the level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
