//! Entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::{ClanRank, GlobalRole};

/// Account model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Normalized lowercase email, unique across the store.
    pub email: String,
    /// Opaque credential handle produced by the credentials module.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: GlobalRole,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Clan model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clan {
    pub id: Uuid,
    pub name: String,
    /// Short clan tag, unique together with the name.
    pub tag: String,
    pub description: Option<String>,
    /// Inactive clans are closed to joining and leaving.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Membership model binding one account to one clan.
///
/// Identified by the (clan, account) pair; the store keys memberships by
/// that pair, so a second membership for the same pair cannot exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub clan_id: Uuid,
    pub account_id: Uuid,
    pub rank: ClanRank,
    pub joined_at: DateTime<Utc>,
}
