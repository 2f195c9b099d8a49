//! Account lifecycle operations.
//!
//! Registration, login, viewer-relative detail projection, global role
//! changes, and ban toggling. Emails are normalized to trimmed lowercase at
//! write time so lookups stay case-insensitive.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::credentials::{self, CredentialError};
use crate::roles::{GlobalRole, UnknownRole};
use crate::store::{Account, Store};
use crate::validation::{self, ValidationError};

use super::types::{AccountSummary, AccountView, Credentials, RegisterRequest};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("no account with this email")]
    EmailNotFound,

    #[error("invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AccountError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            Self::EmailNotFound => "EMAIL_NOT_FOUND",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::Credential(_) => "CREDENTIAL_ERROR",
            Self::Validation(e) => e.code(),
        }
    }
}

/// Failures of [`change_role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleChangeError {
    #[error("cannot change your own role")]
    OwnRole,

    /// The super admin role is unassignable.
    #[error("the super admin role cannot be assigned")]
    ToSuperAdmin,

    /// A super admin's role is immutable.
    #[error("a super admin's role cannot be changed")]
    TargetSuperAdmin,

    #[error("unrecognized account role: {0:?}")]
    InvalidRole(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RoleChangeError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OwnRole => "OWN_ROLE",
            Self::ToSuperAdmin => "ROLE_TO_SUPER_ADMIN",
            Self::TargetSuperAdmin => "TARGET_SUPER_ADMIN",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::Validation(e) => e.code(),
        }
    }
}

/// Failures of [`toggle_ban`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleBanError {
    /// The target leads a clan; leadership must be relinquished first.
    #[error("cannot ban a clan leader")]
    TargetIsClanLeader,

    #[error("cannot ban your own account")]
    OwnAccount,

    #[error("a super admin cannot be banned")]
    TargetSuperAdmin,

    /// Only a super admin may ban an admin.
    #[error("insufficient role to ban an admin")]
    AdminTarget,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ToggleBanError {
    /// Stable failure kind for the embedding layer.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TargetIsClanLeader => "TARGET_IS_CLAN_LEADER",
            Self::OwnAccount => "OWN_ACCOUNT",
            Self::TargetSuperAdmin => "TARGET_SUPER_ADMIN",
            Self::AdminTarget => "ADMIN_TARGET",
            Self::Validation(e) => e.code(),
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Register a new account with the `User` role.
#[instrument(skip(store, request))]
pub fn register(
    store: &mut Store,
    request: RegisterRequest,
) -> Result<AccountSummary, AccountError> {
    let email = request.email.trim().to_lowercase();
    if store.account_by_email(&email).is_some() {
        return Err(AccountError::AlreadyExists);
    }

    let password_hash = credentials::hash_password(&request.password)?;
    let account = Account {
        id: Uuid::now_v7(),
        email,
        password_hash,
        role: GlobalRole::User,
        banned: false,
        created_at: Utc::now(),
    };
    let summary = AccountSummary::from(&account);
    store.insert_account(account);
    Ok(summary)
}

/// Verify credentials and return the matching account.
#[instrument(skip(store, request))]
pub fn login(store: &Store, request: Credentials) -> Result<AccountSummary, AccountError> {
    let email = request.email.trim().to_lowercase();
    let account = store
        .account_by_email(&email)
        .ok_or(AccountError::EmailNotFound)?;

    if !credentials::verify_password(&request.password, &account.password_hash)? {
        return Err(AccountError::InvalidPassword);
    }
    Ok(AccountSummary::from(account))
}

/// All accounts, sorted by email.
pub fn list_accounts(store: &Store) -> Vec<AccountSummary> {
    let mut accounts: Vec<&Account> = store.accounts().collect();
    accounts.sort_by(|a, b| a.email.cmp(&b.email));
    accounts.iter().map(|a| AccountSummary::from(*a)).collect()
}

/// Project an account relative to the viewer, with moderation flags.
#[instrument(skip(store, session))]
pub fn account_detail(
    store: &Store,
    target_id: Uuid,
    session: Option<&str>,
) -> Result<AccountView, AccountError> {
    let viewer = validation::require_session_account(store, session)?;
    let target = validation::require_account(store, target_id)?;

    let mut can_manage = false;
    let mut can_ban = true;
    // An admin has no authority over a fellow admin.
    if !(viewer.role == GlobalRole::Admin && target.role == GlobalRole::Admin) {
        can_manage = true;
        if store.leads_any_clan(target.id) {
            can_ban = false;
        }
    }

    Ok(AccountView {
        account: AccountSummary::from(target),
        is_own_profile: target.id == viewer.id,
        viewer_role: viewer.role,
        target_is_super_admin: target.role == GlobalRole::SuperAdmin,
        can_manage,
        can_ban,
    })
}

/// Change the target's global role.
#[instrument(skip(store, session))]
pub fn change_role(
    store: &mut Store,
    target_id: Uuid,
    session: Option<&str>,
    new_role: &str,
) -> Result<(), RoleChangeError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;

    let target = validation::require_account(store, target_id)?;
    let target_role = target.role;

    if target_id == viewer_id {
        return Err(RoleChangeError::OwnRole);
    }

    let new_role: GlobalRole = new_role
        .parse()
        .map_err(|UnknownRole(value)| RoleChangeError::InvalidRole(value))?;

    if new_role == GlobalRole::SuperAdmin {
        return Err(RoleChangeError::ToSuperAdmin);
    }
    if target_role == GlobalRole::SuperAdmin {
        return Err(RoleChangeError::TargetSuperAdmin);
    }

    if let Some(target) = store.account_mut(target_id) {
        target.role = new_role;
    }
    Ok(())
}

/// Toggle the target's ban flag. Returns the new flag.
///
/// Banning removes every membership the target holds. A super admin banning
/// an admin also demotes the target to `User`. Nothing ever changes the
/// acting account.
#[instrument(skip(store, session))]
pub fn toggle_ban(
    store: &mut Store,
    target_id: Uuid,
    session: Option<&str>,
) -> Result<bool, ToggleBanError> {
    let viewer = validation::require_session_account(store, session)?;
    let viewer_id = viewer.id;
    let viewer_role = viewer.role;

    let target = validation::require_account(store, target_id)?;
    let target_role = target.role;
    let target_banned = target.banned;

    if store.leads_any_clan(target_id) {
        return Err(ToggleBanError::TargetIsClanLeader);
    }
    if target_id == viewer_id {
        return Err(ToggleBanError::OwnAccount);
    }
    if target_role == GlobalRole::SuperAdmin {
        return Err(ToggleBanError::TargetSuperAdmin);
    }
    if viewer_role != GlobalRole::SuperAdmin && target_role == GlobalRole::Admin {
        return Err(ToggleBanError::AdminTarget);
    }

    let banned = !target_banned;
    if let Some(target) = store.account_mut(target_id) {
        target.banned = banned;
        if banned && viewer_role == GlobalRole::SuperAdmin && target.role == GlobalRole::Admin {
            target.role = GlobalRole::User;
        }
    }
    if banned {
        let removed = store.remove_account_memberships(target_id);
        tracing::debug!(%target_id, removed, "banned account removed from its clans");
    }
    Ok(banned)
}
