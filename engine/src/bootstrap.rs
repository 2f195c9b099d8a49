//! First-run seeding.

use chrono::Utc;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::credentials::{self, CredentialError};
use crate::roles::GlobalRole;
use crate::store::{Account, Store};

/// Ensure the configured bootstrap `SuperAdmin` account exists. Idempotent.
pub fn seed(store: &mut Store, config: &EngineConfig) -> Result<(), CredentialError> {
    let email = config.bootstrap_admin_email.trim().to_lowercase();
    if store.account_by_email(&email).is_some() {
        return Ok(());
    }

    let password_hash = credentials::hash_password(&config.bootstrap_admin_password)?;
    store.insert_account(Account {
        id: Uuid::now_v7(),
        email,
        password_hash,
        role: GlobalRole::SuperAdmin,
        banned: false,
        created_at: Utc::now(),
    });
    tracing::info!("seeded bootstrap super admin account");
    Ok(())
}
