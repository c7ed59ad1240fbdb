//! Identities that own a settings record: a username + PIN account or an
//! anonymous device id.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

/// Usernames double as file name components, so keep them to a safe set.
pub const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$";

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("valid regex"));

const ACCOUNT_PREFIX: &str = "user_";
const DEVICE_PREFIX: &str = "device_";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Account { username: String },
    Device { id: Uuid },
}

impl Identity {
    /// Build an account identity from user input. Surrounding whitespace is
    /// ignored; the rest must match [`USERNAME_PATTERN`].
    pub fn account(username: &str) -> Result<Self, CoreError> {
        let username = username.trim();
        validate_username(username)?;
        Ok(Self::Account {
            username: username.to_string(),
        })
    }

    pub fn device(id: Uuid) -> Self {
        Self::Device { id }
    }

    /// Fresh random device identity.
    pub fn new_device() -> Self {
        Self::Device { id: Uuid::new_v4() }
    }

    /// Stable key naming this identity's document and token subject.
    pub fn storage_key(&self) -> String {
        match self {
            Self::Account { username } => format!("{ACCOUNT_PREFIX}{username}"),
            Self::Device { id } => format!("{DEVICE_PREFIX}{id}"),
        }
    }

    /// Inverse of [`Identity::storage_key`].
    pub fn from_storage_key(key: &str) -> Result<Self, CoreError> {
        if let Some(username) = key.strip_prefix(ACCOUNT_PREFIX) {
            validate_username(username)?;
            return Ok(Self::Account {
                username: username.to_string(),
            });
        }
        if let Some(id) = key.strip_prefix(DEVICE_PREFIX) {
            let id = Uuid::parse_str(id)
                .map_err(|e| CoreError::Validation(format!("Invalid device id: {e}")))?;
            return Ok(Self::Device { id });
        }
        Err(CoreError::Validation(format!(
            "Unrecognised identity key: {key}"
        )))
    }

    pub fn is_account(&self) -> bool {
        matches!(self, Self::Account { .. })
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an already-trimmed username.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation(
            "Username must not be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username exceeds maximum length of {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_', '-' and '.'".to_string(),
        ));
    }
    Ok(())
}

/// A PIN is exactly [`PIN_LENGTH`] ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), CoreError> {
    if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "PIN must be exactly {PIN_LENGTH} digits"
        )));
    }
    Ok(())
}
