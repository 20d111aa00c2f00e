//! Configuration-time error taxonomy
//!
//! Every variant is fatal for the configuration unit being built; nothing
//! here is retried or recovered at runtime.

use omnik_sens_types::DriverFamily;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Catalogue and driver setter slots disagree about a field key
    #[error("catalogue mismatch for {family} field '{key}': {reason}")]
    CatalogueMismatch {
        family: DriverFamily,
        key: String,
        reason: String,
    },

    /// An override attribute is not valid for the field or has a malformed value
    #[error("invalid override for field '{key}', attribute '{attribute}': {reason}")]
    InvalidOverride {
        key: String,
        attribute: String,
        reason: String,
    },

    /// The observation registry rejected a constructed sensor
    #[error("registration conflict for field '{key}': {reason}")]
    RegistrationConflict { key: String, reason: String },
}

impl ConfigError {
    pub(crate) fn mismatch(
        family: DriverFamily,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::CatalogueMismatch {
            family,
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_override(
        key: impl Into<String>,
        attribute: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidOverride {
            key: key.into(),
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Field key the error refers to
    pub fn key(&self) -> &str {
        match self {
            ConfigError::CatalogueMismatch { key, .. }
            | ConfigError::InvalidOverride { key, .. }
            | ConfigError::RegistrationConflict { key, .. } => key,
        }
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
