//! In-memory entity store.
//!
//! Entities live in id-keyed arenas with explicit secondary indices instead
//! of navigation references between entities: accounts are indexed by email,
//! memberships by clan and by account. Memberships are keyed by the
//! (clan, account) pair, which makes the one-membership-per-pair invariant
//! structural rather than checked.
//!
//! Operations take the store by `&mut`, so units of work are serialized by
//! ownership. Lifecycle operations perform all guard reads before their
//! first write; a rejected operation leaves the store untouched.

mod models;
#[cfg(test)]
mod tests;

pub use models::{Account, Clan, Membership};

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::roles::ClanRank;

/// Arena of accounts, clans, and memberships.
#[derive(Debug, Default)]
pub struct Store {
    accounts: HashMap<Uuid, Account>,
    clans: HashMap<Uuid, Clan>,
    memberships: HashMap<(Uuid, Uuid), Membership>,

    // Secondary indices.
    accounts_by_email: HashMap<String, Uuid>,
    members_by_clan: HashMap<Uuid, HashSet<Uuid>>,
    clans_by_account: HashMap<Uuid, HashSet<Uuid>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Insert an account. Returns `false` when the email is already taken.
    pub fn insert_account(&mut self, account: Account) -> bool {
        if self.accounts_by_email.contains_key(&account.email) {
            return false;
        }
        self.accounts_by_email.insert(account.email.clone(), account.id);
        self.accounts.insert(account.id, account);
        true
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Mutable account access. The engine never rewrites `email` through
    /// this, which keeps the email index consistent.
    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    /// Lookup by normalized lowercase email.
    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts_by_email
            .get(email)
            .and_then(|id| self.accounts.get(id))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    // ========================================================================
    // Clans
    // ========================================================================

    pub fn insert_clan(&mut self, clan: Clan) {
        self.clans.insert(clan.id, clan);
    }

    pub fn clan(&self, id: Uuid) -> Option<&Clan> {
        self.clans.get(&id)
    }

    pub fn clan_mut(&mut self, id: Uuid) -> Option<&mut Clan> {
        self.clans.get_mut(&id)
    }

    pub fn clans(&self) -> impl Iterator<Item = &Clan> {
        self.clans.values()
    }

    /// Whether a clan with this name and tag exists (case-insensitive).
    pub fn clan_exists(&self, name: &str, tag: &str) -> bool {
        self.clans.values().any(|c| {
            c.name.eq_ignore_ascii_case(name) && c.tag.eq_ignore_ascii_case(tag)
        })
    }

    /// Remove a clan and all of its memberships.
    pub fn remove_clan(&mut self, id: Uuid) -> Option<Clan> {
        let clan = self.clans.remove(&id)?;
        if let Some(member_ids) = self.members_by_clan.remove(&id) {
            for account_id in member_ids {
                self.memberships.remove(&(id, account_id));
                if let Some(set) = self.clans_by_account.get_mut(&account_id) {
                    set.remove(&id);
                    if set.is_empty() {
                        self.clans_by_account.remove(&account_id);
                    }
                }
            }
        }
        Some(clan)
    }

    // ========================================================================
    // Memberships
    // ========================================================================

    /// Insert a membership. Returns `false` when the (clan, account) pair
    /// already holds one.
    pub fn insert_membership(&mut self, membership: Membership) -> bool {
        let key = (membership.clan_id, membership.account_id);
        if self.memberships.contains_key(&key) {
            return false;
        }
        self.members_by_clan.entry(key.0).or_default().insert(key.1);
        self.clans_by_account.entry(key.1).or_default().insert(key.0);
        self.memberships.insert(key, membership);
        true
    }

    pub fn membership(&self, clan_id: Uuid, account_id: Uuid) -> Option<&Membership> {
        self.memberships.get(&(clan_id, account_id))
    }

    pub fn membership_mut(&mut self, clan_id: Uuid, account_id: Uuid) -> Option<&mut Membership> {
        self.memberships.get_mut(&(clan_id, account_id))
    }

    pub fn remove_membership(&mut self, clan_id: Uuid, account_id: Uuid) -> Option<Membership> {
        let removed = self.memberships.remove(&(clan_id, account_id))?;
        if let Some(set) = self.members_by_clan.get_mut(&clan_id) {
            set.remove(&account_id);
            if set.is_empty() {
                self.members_by_clan.remove(&clan_id);
            }
        }
        if let Some(set) = self.clans_by_account.get_mut(&account_id) {
            set.remove(&clan_id);
            if set.is_empty() {
                self.clans_by_account.remove(&account_id);
            }
        }
        Some(removed)
    }

    /// All memberships of a clan, in no particular order.
    pub fn clan_members(&self, clan_id: Uuid) -> Vec<&Membership> {
        self.members_by_clan
            .get(&clan_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|account_id| self.memberships.get(&(clan_id, *account_id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn member_count(&self, clan_id: Uuid) -> usize {
        self.members_by_clan.get(&clan_id).map_or(0, HashSet::len)
    }

    /// All memberships held by an account, in no particular order.
    pub fn account_memberships(&self, account_id: Uuid) -> Vec<&Membership> {
        self.clans_by_account
            .get(&account_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|clan_id| self.memberships.get(&(*clan_id, account_id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove every membership held by an account. Returns how many were
    /// removed.
    pub fn remove_account_memberships(&mut self, account_id: Uuid) -> usize {
        let clan_ids: Vec<Uuid> = self
            .clans_by_account
            .get(&account_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();
        for clan_id in &clan_ids {
            self.remove_membership(*clan_id, account_id);
        }
        clan_ids.len()
    }

    /// Whether the account holds the `ClanLeader` rank in any clan.
    pub fn leads_any_clan(&self, account_id: Uuid) -> bool {
        self.account_memberships(account_id)
            .iter()
            .any(|m| m.rank == ClanRank::ClanLeader)
    }
}
