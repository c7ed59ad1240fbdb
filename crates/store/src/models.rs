//! On-disk document shapes.

use crewpay_core::identity::Identity;
use crewpay_core::settings::SalarySettings;
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// One identity's persisted profile.
///
/// `pin_hash` is only present for accounts. `settings` falls back to the
/// defaults field by field when keys are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Storage key of the owning identity.
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<String>,
    #[serde(default)]
    pub settings: SalarySettings,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl ProfileDocument {
    pub fn new(identity: &Identity, pin_hash: Option<String>, settings: SalarySettings) -> Self {
        Self {
            identity: identity.storage_key(),
            pin_hash,
            settings,
            updated_at: chrono::Utc::now(),
        }
    }
}
