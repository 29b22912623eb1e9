//! Vendor tooling and the terminal startup gate.
//!
//! `pdv-keygen` issues license codes on the vendor's machine.
//! `pdv-gate` performs the launch-time license check on a customer machine
//! and prompts for a code when the check fails.

use anyhow::{Context, Result};
use pdv_license::{
    ActivationError, FingerprintSource, IssuedLicense, LicenseManager, SecretKey,
};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

/// Issues `count` codes for `client`.
pub fn issue_batch(client: &str, count: u32, secret: &SecretKey) -> Vec<IssuedLicense> {
    (0..count).map(|_| IssuedLicense::issue(client, secret)).collect()
}

/// Renders an issued code for the terminal.
pub fn render_issued(issued: &IssuedLicense) -> String {
    let rule = "=".repeat(50);
    let stars = "*".repeat(50);
    format!(
        "\n{rule}\nLICENSE ISSUED\n{rule}\n\nClient: {client}\nDate:   {date}\n\n{stars}\nLICENSE CODE:\n\n   {code}\n\n{stars}\n\nSend this code to the client to activate.\nThe code locks to the first machine it is activated on.\n",
        client = issued.client,
        date = issued.generated_at_display(),
        code = issued.code,
    )
}

/// Appends `issued` to the audit log and, if given, the issued-hash list.
pub fn record_issued(issued: &IssuedLicense, audit_log: &Path, issued_list: Option<&Path>) -> Result<()> {
    issued
        .append_audit_record(audit_log)
        .with_context(|| format!("writing audit log {}", audit_log.display()))?;
    if let Some(list) = issued_list {
        issued
            .append_to_issued_list(list)
            .with_context(|| format!("writing issued list {}", list.display()))?;
    }
    info!(path = %audit_log.display(), "Issued code recorded");
    Ok(())
}

/// How the startup gate ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// A valid license was already in place.
    AlreadyValid,
    /// The user activated a code.
    Activated,
    /// The user gave up without activating.
    Declined,
}

impl GateOutcome {
    /// Returns true if the application may start.
    pub fn may_start(&self) -> bool {
        !matches!(self, Self::Declined)
    }
}

const PROMPT: &str = "Enter license code (XXXX-XXXX-XXXX-XXXX), or leave empty to quit: ";

/// Validates the license and, if that fails, prompts on `input` until a code
/// activates or the user submits an empty line.
///
/// Codes that are malformed or not issued re-prompt. A failure to save the
/// activation ends the gate with an error.
pub fn run_gate<F, R, W>(manager: &LicenseManager<F>, mut input: R, mut output: W) -> Result<GateOutcome>
where
    F: FingerprintSource,
    R: BufRead,
    W: Write,
{
    let report = pdv_license::startup::check(manager);
    if report.valid {
        return Ok(GateOutcome::AlreadyValid);
    }
    writeln!(output, "{}", report.message)?;

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            writeln!(output, "License not activated. Exiting.")?;
            return Ok(GateOutcome::Declined);
        }

        match manager.activate(&line) {
            Ok(_) => {
                writeln!(output, "{}", pdv_license::startup::MSG_ACTIVATED)?;
                return Ok(GateOutcome::Activated);
            }
            Err(e @ (ActivationError::BadFormat(_) | ActivationError::UnknownCode)) => {
                writeln!(output, "{e}")?;
            }
            Err(e) => return Err(e).context("activation failed"),
        }
    }
}
