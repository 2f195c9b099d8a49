//! Request and projection types for clan operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Clan, Store};

/// Request to create a clan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClanRequest {
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub description: Option<String>,
    /// New clans start active unless explicitly created inactive.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Clan listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct ClanSummary {
    pub clan_id: Uuid,
    pub name: String,
    pub tag: String,
    pub description: Option<String>,
    pub active: bool,
    pub member_count: usize,
}

impl ClanSummary {
    pub(super) fn project(store: &Store, clan: &Clan) -> Self {
        Self {
            clan_id: clan.id,
            name: clan.name.clone(),
            tag: clan.tag.clone(),
            description: clan.description.clone(),
            active: clan.active,
            member_count: store.member_count(clan.id),
        }
    }
}
