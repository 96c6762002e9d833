//! pinchtwist - replay hand-tracking scripts through the gesture engine.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use pinchtwist::config::AppConfig;
use pinchtwist::replay::Replay;

#[derive(Parser, Debug)]
#[command(name = "pinchtwist", about = "Pinch-and-twist gesture engine")]
struct Cli {
    /// Replay script to run ("-" for stdin)
    #[arg(long)]
    replay: Option<String>,

    /// Config file (s-expression plist)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("pinchtwist {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Logs go to stderr; stdout carries events.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinchtwist=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => AppConfig::default(),
    };

    if cli.print_config {
        println!("{}", config.config_sexp());
        return Ok(());
    }

    let Some(script) = cli.replay else {
        eprintln!("Nothing to do. Use --replay <FILE|-> or --print-config");
        std::process::exit(2);
    };

    info!("pinchtwist v{} replaying {}", env!("CARGO_PKG_VERSION"), script);
    let mut replay = Replay::new(&config).context("failed to build gesture engine")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if script == "-" {
        replay.run(io::stdin().lock(), &mut out)?;
    } else {
        let file = File::open(&script).with_context(|| format!("failed to open {}", script))?;
        replay.run(BufReader::new(file), &mut out)?;
    }
    Ok(())
}
