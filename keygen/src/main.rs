//! License code generator. Vendor-only: do not ship to customers.
//!
//! Usage:
//!   pdv-keygen --client "Tienda ABC" --save
//!
//! Codes are machine-independent; each one locks to the first machine it is
//! activated on.

use anyhow::Result;
use clap::Parser;
use pdv_keygen::{issue_batch, record_issued, render_issued};
use pdv_license::{SecretKey, AUDIT_LOG_FILE_NAME};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pdv-keygen")]
#[command(about = "Issue point-of-sale license codes")]
struct Args {
    /// Client name recorded with the code
    #[arg(short, long, default_value = "")]
    client: String,

    /// Append a record of each code to the audit log
    #[arg(short, long)]
    save: bool,

    /// Audit log path
    #[arg(short, long, default_value = AUDIT_LOG_FILE_NAME)]
    output: PathBuf,

    /// Also append full integrity hashes to this issued list
    #[arg(long, requires = "save")]
    issued_list: Option<PathBuf>,

    /// Number of codes to issue
    #[arg(short = 'n', long, default_value = "1")]
    count: u32,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let secret = SecretKey::embedded();
    for issued in issue_batch(&args.client, args.count, &secret) {
        print!("{}", render_issued(&issued));
        debug!(hash_prefix = &issued.integrity_hash[..8], "Code issued");

        if args.save {
            record_issued(&issued, &args.output, args.issued_list.as_deref())?;
            println!("Record saved to: {}\n", args.output.display());
        }
    }

    Ok(())
}
