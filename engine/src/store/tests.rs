//! Store invariant tests.

use chrono::Utc;
use uuid::Uuid;

use crate::roles::{ClanRank, GlobalRole};

use super::{Account, Clan, Membership, Store};

fn account(email: &str) -> Account {
    Account {
        id: Uuid::now_v7(),
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        role: GlobalRole::User,
        banned: false,
        created_at: Utc::now(),
    }
}

fn clan(name: &str, tag: &str) -> Clan {
    Clan {
        id: Uuid::now_v7(),
        name: name.to_string(),
        tag: tag.to_string(),
        description: None,
        active: true,
        created_at: Utc::now(),
    }
}

fn membership(clan_id: Uuid, account_id: Uuid, rank: ClanRank) -> Membership {
    Membership {
        clan_id,
        account_id,
        rank,
        joined_at: Utc::now(),
    }
}

#[test]
fn email_index_lookup() {
    let mut store = Store::new();
    let a = account("finn@example.com");
    let id = a.id;
    assert!(store.insert_account(a));

    assert_eq!(store.account_by_email("finn@example.com").map(|a| a.id), Some(id));
    assert!(store.account_by_email("other@example.com").is_none());

    // Second account on the same email is refused.
    assert!(!store.insert_account(account("finn@example.com")));
}

#[test]
fn membership_pair_is_unique() {
    let mut store = Store::new();
    let a = account("one@example.com");
    let c = clan("Alpha", "ALPHA");
    let (account_id, clan_id) = (a.id, c.id);
    store.insert_account(a);
    store.insert_clan(c);

    assert!(store.insert_membership(membership(clan_id, account_id, ClanRank::Recruit)));
    assert!(!store.insert_membership(membership(clan_id, account_id, ClanRank::Elder)));

    // The refused insert must not have overwritten the rank.
    assert_eq!(
        store.membership(clan_id, account_id).map(|m| m.rank),
        Some(ClanRank::Recruit)
    );
    assert_eq!(store.member_count(clan_id), 1);
}

#[test]
fn clan_exists_ignores_case() {
    let mut store = Store::new();
    store.insert_clan(clan("Alpha Clan", "ALPHA"));

    assert!(store.clan_exists("Alpha Clan", "ALPHA"));
    assert!(store.clan_exists("alpha clan", "alpha"));
    assert!(!store.clan_exists("Alpha Clan", "BETA"));
}

#[test]
fn remove_clan_cascades_memberships() {
    let mut store = Store::new();
    let a = account("a@example.com");
    let b = account("b@example.com");
    let c = clan("Alpha", "ALPHA");
    let (a_id, b_id, clan_id) = (a.id, b.id, c.id);
    store.insert_account(a);
    store.insert_account(b);
    store.insert_clan(c);
    store.insert_membership(membership(clan_id, a_id, ClanRank::ClanLeader));
    store.insert_membership(membership(clan_id, b_id, ClanRank::Recruit));

    assert!(store.remove_clan(clan_id).is_some());

    assert!(store.clan(clan_id).is_none());
    assert!(store.membership(clan_id, a_id).is_none());
    assert!(store.membership(clan_id, b_id).is_none());
    assert!(store.account_memberships(a_id).is_empty());
    assert_eq!(store.member_count(clan_id), 0);
}

#[test]
fn remove_account_memberships_clears_both_indices() {
    let mut store = Store::new();
    let a = account("a@example.com");
    let c1 = clan("Alpha", "ALPHA");
    let c2 = clan("Beta", "BETA");
    let (a_id, c1_id, c2_id) = (a.id, c1.id, c2.id);
    store.insert_account(a);
    store.insert_clan(c1);
    store.insert_clan(c2);
    store.insert_membership(membership(c1_id, a_id, ClanRank::Member));
    store.insert_membership(membership(c2_id, a_id, ClanRank::Elder));

    assert_eq!(store.remove_account_memberships(a_id), 2);

    assert!(store.account_memberships(a_id).is_empty());
    assert!(store.clan_members(c1_id).is_empty());
    assert!(store.clan_members(c2_id).is_empty());
    // Clans themselves survive.
    assert!(store.clan(c1_id).is_some());
    assert!(store.clan(c2_id).is_some());
}

#[test]
fn serialized_account_never_carries_the_password_hash() {
    let a = account("finn@example.com");
    let json = serde_json::to_value(&a).expect("serialize");

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["email"], "finn@example.com");
    assert_eq!(json["role"], "user");
}

#[test]
fn leads_any_clan_tracks_leader_rank_only() {
    let mut store = Store::new();
    let a = account("lead@example.com");
    let c1 = clan("Alpha", "ALPHA");
    let c2 = clan("Beta", "BETA");
    let (a_id, c1_id, c2_id) = (a.id, c1.id, c2.id);
    store.insert_account(a);
    store.insert_clan(c1);
    store.insert_clan(c2);

    store.insert_membership(membership(c1_id, a_id, ClanRank::CoLeader));
    assert!(!store.leads_any_clan(a_id));

    store.insert_membership(membership(c2_id, a_id, ClanRank::ClanLeader));
    assert!(store.leads_any_clan(a_id));

    store.remove_membership(c2_id, a_id);
    assert!(!store.leads_any_clan(a_id));
}
