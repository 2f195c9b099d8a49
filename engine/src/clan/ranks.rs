//! Membership rank transitions, including leadership transfer.

use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::roles::{ClanRank, UnknownRank};
use crate::store::Store;
use crate::validation::{self, ValidationError};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankChangeError {
    /// The acting member is neither leader nor co-leader.
    #[error("insufficient rank to change member ranks")]
    WrongRole,

    #[error("unrecognized clan rank: {0:?}")]
    InvalidRank(String),

    #[error("cannot change your own rank")]
    OwnRank,

    /// A co-leader may not touch another co-leader.
    #[error("cannot change the rank of a same-tier member")]
    PeerTier,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RankChangeError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::WrongRole => "WRONG_ROLE",
            Self::InvalidRank(_) => "INVALID_RANK",
            Self::OwnRank => "OWN_RANK",
            Self::PeerTier => "PEER_TIER",
            Self::Validation(e) => e.code(),
        }
    }
}

// ============================================================================
// Operation
// ============================================================================

/// Change a member's rank.
///
/// Assigning `ClanLeader` transfers leadership: the acting member is demoted
/// to `CoLeader` in the same operation, so the clan keeps exactly one
/// leader. Both writes happen only after every guard has passed.
#[instrument(skip(store, session))]
pub fn change_member_rank(
    store: &mut Store,
    clan_id: Uuid,
    session: Option<&str>,
    target_id: Uuid,
    new_rank: &str,
) -> Result<ClanRank, RankChangeError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;

    validation::require_clan(store, clan_id)?;

    let actor = validation::require_viewer_membership(store, clan_id, viewer_id)?;
    let actor_rank = actor.rank;
    if !actor_rank.is_leadership() {
        return Err(RankChangeError::WrongRole);
    }

    let target = validation::require_membership(store, clan_id, target_id)?;
    let target_rank = target.rank;

    let new_rank: ClanRank = new_rank
        .parse()
        .map_err(|UnknownRank(value)| RankChangeError::InvalidRank(value))?;

    if target_id == viewer_id {
        return Err(RankChangeError::OwnRank);
    }
    if actor_rank == ClanRank::CoLeader && target_rank == ClanRank::CoLeader {
        return Err(RankChangeError::PeerTier);
    }

    if new_rank == ClanRank::ClanLeader {
        if let Some(actor) = store.membership_mut(clan_id, viewer_id) {
            actor.rank = ClanRank::CoLeader;
        }
    }
    if let Some(target) = store.membership_mut(clan_id, target_id) {
        target.rank = new_rank;
    }
    Ok(new_rank)
}
