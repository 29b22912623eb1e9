//! The two calls the host application makes at launch.
//!
//! The host only needs a yes/no and a message to show. On a negative
//! validation it opens its activation prompt and feeds the entered code to
//! [`activate_license`]; it never touches the license file itself.

use crate::activation::{LicenseManager, LicenseState};
use crate::config::LicenseConfig;
use crate::device::FingerprintSource;
use serde::{Deserialize, Serialize};

/// Message for a valid stored license.
pub const MSG_VALID: &str = "License valid";

/// Message for a successful activation.
pub const MSG_ACTIVATED: &str = "License activated successfully";

/// Outcome of a startup call, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupReport {
    /// True if the application may proceed.
    pub valid: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Machine-checkable state after the call.
    pub state: LicenseState,
}

impl StartupReport {
    fn failure(message: impl Into<String>, state: LicenseState) -> Self {
        Self {
            valid: false,
            message: message.into(),
            state,
        }
    }
}

/// Validates the stored license with `manager`.
pub fn check<F: FingerprintSource>(manager: &LicenseManager<F>) -> StartupReport {
    let result = manager.validate();
    let state = LicenseState::from(&result);
    match result {
        Ok(_) => StartupReport {
            valid: true,
            message: MSG_VALID.to_string(),
            state,
        },
        Err(e) => StartupReport::failure(e.to_string(), state),
    }
}

/// Activates `code` with `manager`.
pub fn activate<F: FingerprintSource>(manager: &LicenseManager<F>, code: &str) -> StartupReport {
    match manager.activate(code) {
        Ok(_) => StartupReport {
            valid: true,
            message: MSG_ACTIVATED.to_string(),
            state: LicenseState::ValidLicense,
        },
        Err(e) => StartupReport::failure(e.to_string(), manager.state()),
    }
}

/// Validates the license at this build's default location.
pub fn validate_license() -> StartupReport {
    match LicenseConfig::from_environment().and_then(LicenseManager::new) {
        Ok(manager) => check(&manager),
        Err(e) => StartupReport::failure(
            e.to_string(),
            LicenseState::InvalidLicense(crate::activation::InvalidReason::Unreadable),
        ),
    }
}

/// Activates `code` at this build's default location.
pub fn activate_license(code: &str) -> StartupReport {
    match LicenseConfig::from_environment().and_then(LicenseManager::new) {
        Ok(manager) => activate(&manager, code),
        Err(e) => StartupReport::failure(
            e.to_string(),
            LicenseState::InvalidLicense(crate::activation::InvalidReason::Unreadable),
        ),
    }
}
