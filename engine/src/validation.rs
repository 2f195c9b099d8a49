//! Session and entity resolution.
//!
//! Every operation resolves its actors through these helpers before touching
//! state, in session -> account -> clan -> membership order, aborting on the
//! first miss. A missing or unparsable session identifier is rejected before
//! any entity lookup happens.

use thiserror::Error;
use uuid::Uuid;

use crate::store::{Account, Clan, Membership, Store};

/// Resolution failures shared by all operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No session identifier was supplied, or it was not a valid UUID.
    #[error("no valid session")]
    MissingSession,

    /// The session identifier does not resolve to an account.
    #[error("session account not found")]
    SessionAccountNotFound,

    #[error("account not found")]
    AccountNotFound,

    #[error("clan not found")]
    ClanNotFound,

    /// The acting account holds no membership in the clan.
    #[error("you are not a member of this clan")]
    ViewerMembershipNotFound,

    /// The targeted account holds no membership in the clan.
    #[error("member not found")]
    MembershipNotFound,
}

impl ValidationError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingSession => "NO_SESSION",
            Self::SessionAccountNotFound => "SESSION_ACCOUNT_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ClanNotFound => "CLAN_NOT_FOUND",
            Self::ViewerMembershipNotFound => "NOT_CLAN_MEMBER",
            Self::MembershipNotFound => "MEMBER_NOT_FOUND",
        }
    }
}

/// Parse a raw session identifier without touching the store.
pub fn parse_session(session: Option<&str>) -> Result<Uuid, ValidationError> {
    session
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(ValidationError::MissingSession)
}

/// Parse the session and resolve the acting account.
pub fn require_session_account<'a>(
    store: &'a Store,
    session: Option<&str>,
) -> Result<&'a Account, ValidationError> {
    let id = parse_session(session)?;
    store
        .account(id)
        .ok_or(ValidationError::SessionAccountNotFound)
}

pub fn require_account(store: &Store, id: Uuid) -> Result<&Account, ValidationError> {
    store.account(id).ok_or(ValidationError::AccountNotFound)
}

pub fn require_clan(store: &Store, id: Uuid) -> Result<&Clan, ValidationError> {
    store.clan(id).ok_or(ValidationError::ClanNotFound)
}

/// Resolve the acting account's own membership in a clan.
pub fn require_viewer_membership(
    store: &Store,
    clan_id: Uuid,
    account_id: Uuid,
) -> Result<&Membership, ValidationError> {
    store
        .membership(clan_id, account_id)
        .ok_or(ValidationError::ViewerMembershipNotFound)
}

/// Resolve a targeted account's membership in a clan.
pub fn require_membership(
    store: &Store,
    clan_id: Uuid,
    account_id: Uuid,
) -> Result<&Membership, ValidationError> {
    store
        .membership(clan_id, account_id)
        .ok_or(ValidationError::MembershipNotFound)
}
