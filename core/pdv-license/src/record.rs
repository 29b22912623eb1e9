//! The persisted license record.

use crate::code::LicenseCode;
use crate::device::HardwareFingerprint;
use serde::{Deserialize, Serialize};

/// Schema tag written into every record.
pub const RECORD_VERSION: &str = "1.0";

/// What an activation leaves on disk: a code bound to one machine.
///
/// Records are only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// The activated code.
    pub license_code: LicenseCode,
    /// Fingerprint of the machine the code was activated on.
    pub hardware_id: HardwareFingerprint,
    /// Always true for records written by activation.
    pub activated: bool,
    /// Schema tag, see [`RECORD_VERSION`].
    pub version: String,
}

impl LicenseRecord {
    /// Creates an activated record for `code` on `hardware_id`.
    #[must_use]
    pub fn new(license_code: LicenseCode, hardware_id: HardwareFingerprint) -> Self {
        Self {
            license_code,
            hardware_id,
            activated: true,
            version: RECORD_VERSION.to_string(),
        }
    }
}
