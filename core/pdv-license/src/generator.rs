//! Vendor-side code issuing.
//!
//! Runs out of band on the vendor's machine. Issued codes are not tied to
//! any customer hardware; the integrity hash is what a strict installation
//! checks them against.

use crate::code::{generate_code, LicenseCode};
use crate::secret::SecretKey;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Client label used when none is given.
pub const UNNAMED_CLIENT: &str = "Unnamed";

/// Default audit log file name.
pub const AUDIT_LOG_FILE_NAME: &str = "licenses_generated.txt";

/// Hex characters of the hash kept in the audit log.
const AUDIT_HASH_PREFIX: usize = 32;

/// A freshly issued code with its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedLicense {
    /// Code to hand to the client.
    pub code: LicenseCode,
    /// `hex(SHA256(code ":" secret))`.
    pub integrity_hash: String,
    /// Who the code was issued to.
    pub client: String,
    /// When the code was issued.
    pub generated_at: DateTime<Local>,
}

impl IssuedLicense {
    /// Issues a new code for `client`.
    #[must_use]
    pub fn issue(client: &str, secret: &SecretKey) -> Self {
        let (code, integrity_hash) = generate_code(secret);
        let client = client.trim();
        Self {
            code,
            integrity_hash,
            client: if client.is_empty() {
                UNNAMED_CLIENT.to_string()
            } else {
                client.to_string()
            },
            generated_at: Local::now(),
        }
    }

    /// Formats the issue timestamp as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Renders the audit log block for this code.
    ///
    /// Only a prefix of the hash is written so the log alone cannot be used
    /// to populate an issued-hash list.
    #[must_use]
    pub fn audit_block(&self) -> String {
        let prefix_len = AUDIT_HASH_PREFIX.min(self.integrity_hash.len());
        format!(
            "\n{sep}\nClient: {client}\nCode: {code}\nDate: {date}\nHash: {hash}...\n",
            sep = "=".repeat(50),
            client = self.client,
            code = self.code,
            date = self.generated_at_display(),
            hash = &self.integrity_hash[..prefix_len],
        )
    }

    /// Appends the audit block to the log at `path`, creating it if needed.
    pub fn append_audit_record(&self, path: &Path) -> io::Result<()> {
        append_line(path, &self.audit_block())
    }

    /// Appends the full integrity hash to an issued-hash list at `path`.
    pub fn append_to_issued_list(&self, path: &Path) -> io::Result<()> {
        append_line(path, &format!("{}\n", self.integrity_hash))
    }
}

fn append_line(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}
