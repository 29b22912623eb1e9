//! Launch-time license gate.
//!
//! Validates the installed license and, if there is none or it does not
//! belong to this machine, asks for a code on the terminal. Exits non-zero
//! when the user quits without activating.
//!
//! Usage:
//!   pdv-gate
//!   pdv-gate --show-fingerprint

use anyhow::{Context, Result};
use clap::Parser;
use pdv_keygen::run_gate;
use pdv_license::{compute_fingerprint, LicenseConfig, LicenseManager};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pdv-gate")]
#[command(about = "Check or activate the point-of-sale license")]
struct Args {
    /// License file (defaults to this build's location)
    #[arg(short, long)]
    license: Option<PathBuf>,

    /// Only accept codes listed in this issued-hash file
    #[arg(long)]
    issued_list: Option<PathBuf>,

    /// Print this machine's hardware fingerprint and exit
    #[arg(long)]
    show_fingerprint: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    if args.show_fingerprint {
        println!("{}", compute_fingerprint());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = match args.license {
        Some(path) => LicenseConfig::at(path),
        None => LicenseConfig::from_environment().context("resolving license location")?,
    };
    if let Some(list) = &args.issued_list {
        config = config
            .with_issued_list(list)
            .context("loading issued code list")?;
    }
    info!(path = %config.license_path.display(), "Checking license");

    let manager = LicenseManager::new(config).context("opening license store")?;
    let outcome = run_gate(&manager, io::stdin().lock(), io::stdout().lock())?;

    Ok(if outcome.may_start() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
