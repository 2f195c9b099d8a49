//! Request and projection types for account operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::GlobalRole;
use crate::store::Account;

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Public account projection. Carries no credential material.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub account_id: Uuid,
    pub email: String,
    pub role: GlobalRole,
    pub banned: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            role: account.role,
            banned: account.banned,
        }
    }
}

/// An account projected relative to the viewer, with moderation flags.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub account: AccountSummary,
    pub is_own_profile: bool,
    pub viewer_role: GlobalRole,
    pub target_is_super_admin: bool,
    /// Whether the viewer may manage this account at all. An admin viewing
    /// a fellow admin may not.
    pub can_manage: bool,
    /// Whether the viewer may toggle this account's ban. Cleared when the
    /// target leads a clan; only meaningful together with `can_manage`.
    pub can_ban: bool,
}
