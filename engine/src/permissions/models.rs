//! Projection types for clan permission views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::roles::{ClanRank, GlobalRole};

/// A clan member plus the management actions the viewer may take on them.
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub account_id: Uuid,
    pub email: String,
    pub role: GlobalRole,
    pub rank: ClanRank,
    pub joined_at: DateTime<Utc>,
    /// Whether the viewer may change this member's rank.
    pub can_change_rank: bool,
    /// Whether the viewer may remove this member from the clan.
    pub can_remove: bool,
}

/// A clan projected relative to a viewer.
///
/// Members are ordered by rank authority (leader first), ties broken by
/// email ascending.
#[derive(Debug, Clone, Serialize)]
pub struct ClanView {
    pub clan_id: Uuid,
    pub name: String,
    pub tag: String,
    pub description: Option<String>,
    pub active: bool,
    pub members: Vec<MemberView>,

    pub viewer_id: Option<Uuid>,
    pub viewer_is_member: bool,
    pub viewer_is_leader: bool,
    pub viewer_is_co_leader: bool,
    pub viewer_is_platform_admin: bool,
    /// Whether the viewer may join or leave. Requires a signed-in viewer and
    /// an active clan.
    pub can_join_or_leave: bool,
    /// Email of the clan leader, if the clan currently has one.
    pub leader_email: Option<String>,
}
