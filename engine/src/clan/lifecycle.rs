//! Clan lifecycle operations.
//!
//! Every operation resolves session, clan, and membership through the
//! validation gateway in that order, evaluates all guards, and only then
//! mutates the store. A rejected call leaves no partial writes behind.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::permissions::{evaluate_clan_view, ClanView};
use crate::roles::ClanRank;
use crate::store::{Account, Clan, Membership, Store};
use crate::validation::{self, ValidationError};

use super::types::{ClanSummary, CreateClanRequest};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClanError {
    /// A clan with the same name and tag already exists.
    #[error("a clan with this name and tag already exists")]
    AlreadyExists,

    #[error("already a member of this clan")]
    MemberAlreadyInClan,

    /// The clan is inactive and closed to joining.
    #[error("this clan is not accepting members")]
    Inactive,

    /// The clan leader cannot be removed; leadership must be transferred
    /// first.
    #[error("the clan leader cannot be removed")]
    LeaderRemoval,

    #[error("insufficient rank or role for this action")]
    WrongRole,

    #[error("only the clan leader may do this")]
    NotLeader,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClanError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "CLAN_ALREADY_EXISTS",
            Self::MemberAlreadyInClan => "MEMBER_ALREADY_IN_CLAN",
            Self::Inactive => "CLAN_INACTIVE",
            Self::LeaderRemoval => "CLAN_LEADER_REMOVAL",
            Self::WrongRole => "WRONG_ROLE",
            Self::NotLeader => "NOT_CLAN_LEADER",
            Self::Validation(e) => e.code(),
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// List clans visible to the viewer, sorted by name.
///
/// With `mine_only` a session is required and only the viewer's clans are
/// returned; otherwise all clans, optionally restricted to active ones.
#[instrument(skip(store, session))]
pub fn list_clans(
    store: &Store,
    active_only: bool,
    mine_only: bool,
    session: Option<&str>,
) -> Result<Vec<ClanSummary>, ClanError> {
    let mut clans: Vec<&Clan> = if mine_only {
        let viewer = validation::require_session_account(store, session)?;
        store
            .account_memberships(viewer.id)
            .iter()
            .filter_map(|m| store.clan(m.clan_id))
            .collect()
    } else if active_only {
        store.clans().filter(|c| c.active).collect()
    } else {
        store.clans().collect()
    };

    clans.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(clans
        .into_iter()
        .map(|c| ClanSummary::project(store, c))
        .collect())
}

/// Create a clan. The creator becomes its `ClanLeader`.
#[instrument(skip(store, session, request), fields(name = %request.name, tag = %request.tag))]
pub fn create_clan(
    store: &mut Store,
    request: CreateClanRequest,
    session: Option<&str>,
) -> Result<Clan, ClanError> {
    let creator = validation::require_session_account(store, session)?;
    let creator_id = creator.id;

    if store.clan_exists(&request.name, &request.tag) {
        return Err(ClanError::AlreadyExists);
    }

    let now = Utc::now();
    let clan = Clan {
        id: Uuid::now_v7(),
        name: request.name,
        tag: request.tag,
        description: request.description,
        active: request.active,
        created_at: now,
    };
    let membership = Membership {
        clan_id: clan.id,
        account_id: creator_id,
        rank: ClanRank::ClanLeader,
        joined_at: now,
    };

    store.insert_clan(clan.clone());
    let inserted = store.insert_membership(membership);
    debug_assert!(inserted, "fresh clan id cannot collide");
    Ok(clan)
}

/// Project a clan relative to the viewer.
///
/// Anonymous or unresolvable viewers get a view with every viewer-dependent
/// flag cleared rather than an error.
#[instrument(skip(store, session))]
pub fn clan_detail(
    store: &Store,
    clan_id: Uuid,
    session: Option<&str>,
) -> Result<ClanView, ClanError> {
    let clan = validation::require_clan(store, clan_id)?;

    let viewer = validation::parse_session(session)
        .ok()
        .and_then(|id| store.account(id));

    let memberships = store.clan_members(clan_id);
    let roster: Vec<(&Membership, &Account)> = memberships
        .into_iter()
        .filter_map(|m| store.account(m.account_id).map(|a| (m, a)))
        .collect();

    Ok(evaluate_clan_view(clan, &roster, viewer))
}

/// Overwrite the clan description. Leader only.
#[instrument(skip(store, session, description))]
pub fn update_description(
    store: &mut Store,
    clan_id: Uuid,
    description: String,
    session: Option<&str>,
) -> Result<(), ClanError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;

    let membership = validation::require_viewer_membership(store, clan_id, viewer_id)?;
    if membership.rank != ClanRank::ClanLeader {
        return Err(ClanError::WrongRole);
    }

    let clan = store
        .clan_mut(clan_id)
        .ok_or(ValidationError::ClanNotFound)?;
    clan.description = Some(description);
    Ok(())
}

/// Flip the clan's active flag. Platform admins only. Returns the new state.
#[instrument(skip(store, session))]
pub fn toggle_active(
    store: &mut Store,
    clan_id: Uuid,
    session: Option<&str>,
) -> Result<bool, ClanError> {
    let viewer = validation::require_session_account(store, session)?;
    if !viewer.role.is_platform_admin() {
        return Err(ClanError::WrongRole);
    }

    let clan = store
        .clan_mut(clan_id)
        .ok_or(ValidationError::ClanNotFound)?;
    clan.active = !clan.active;
    Ok(clan.active)
}

/// Join a clan as a `Recruit`.
#[instrument(skip(store, session))]
pub fn join(
    store: &mut Store,
    clan_id: Uuid,
    session: Option<&str>,
) -> Result<Membership, ClanError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;
    let clan = validation::require_clan(store, clan_id)?;

    if store.membership(clan_id, viewer_id).is_some() {
        return Err(ClanError::MemberAlreadyInClan);
    }
    if !clan.active {
        return Err(ClanError::Inactive);
    }

    let membership = Membership {
        clan_id,
        account_id: viewer_id,
        rank: ClanRank::Recruit,
        joined_at: Utc::now(),
    };
    store.insert_membership(membership.clone());
    Ok(membership)
}

/// Remove a member, or leave when no target is given.
///
/// Non-self removal requires a platform admin role or a leadership rank in
/// the clan. The clan leader can never be removed this way, regardless of
/// caller authority.
#[instrument(skip(store, session))]
pub fn remove_member(
    store: &mut Store,
    clan_id: Uuid,
    session: Option<&str>,
    target_id: Option<Uuid>,
) -> Result<(), ClanError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;
    let viewer_is_admin = viewer.role.is_platform_admin();

    validation::require_clan(store, clan_id)?;

    let target_id = target_id.unwrap_or(viewer_id);
    let target = validation::require_membership(store, clan_id, target_id)?;
    let target_rank = target.rank;

    if target_id != viewer_id {
        let viewer_has_rank = store
            .membership(clan_id, viewer_id)
            .is_some_and(|m| m.rank.is_leadership());
        if !viewer_is_admin && !viewer_has_rank {
            return Err(ClanError::WrongRole);
        }
    }

    if target_rank == ClanRank::ClanLeader {
        return Err(ClanError::LeaderRemoval);
    }

    store.remove_membership(clan_id, target_id);
    Ok(())
}

/// Delete a clan and all of its memberships. Leader only.
#[instrument(skip(store, session))]
pub fn delete_clan(
    store: &mut Store,
    clan_id: Uuid,
    session: Option<&str>,
) -> Result<(), ClanError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;

    validation::require_clan(store, clan_id)?;
    let membership = validation::require_viewer_membership(store, clan_id, viewer_id)?;
    if membership.rank != ClanRank::ClanLeader {
        return Err(ClanError::NotLeader);
    }

    store.remove_clan(clan_id);
    Ok(())
}
