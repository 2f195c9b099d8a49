//! Permission resolution logic.
//!
//! Computes the per-member management permissions and clan-level flags for a
//! viewer looking at a clan roster.

use crate::roles::ClanRank;
use crate::store::{Account, Clan, Membership};

use super::models::{ClanView, MemberView};

/// Whether a viewer holding `viewer_rank` may change the rank of a member
/// holding `target_rank`.
///
/// The leader may manage everyone; a co-leader may manage ranks strictly
/// below co-leader. Callers must additionally exclude the viewer targeting
/// themselves, which [`evaluate_clan_view`] does.
pub const fn can_change_member_rank(viewer_rank: ClanRank, target_rank: ClanRank) -> bool {
    match viewer_rank {
        ClanRank::ClanLeader => true,
        ClanRank::CoLeader => {
            !matches!(target_rank, ClanRank::ClanLeader | ClanRank::CoLeader)
        }
        _ => false,
    }
}

/// Whether a viewer holding `viewer_rank` may remove a member holding
/// `target_rank`. The clan leader can never be removed.
pub const fn can_remove_member(viewer_rank: ClanRank, target_rank: ClanRank) -> bool {
    if matches!(target_rank, ClanRank::ClanLeader) {
        return false;
    }
    match viewer_rank {
        ClanRank::ClanLeader => true,
        ClanRank::CoLeader => !matches!(target_rank, ClanRank::CoLeader),
        _ => false,
    }
}

/// Project a clan and its roster relative to an optional viewer.
///
/// `roster` pairs each membership with its account. Anonymous viewers (or
/// viewers without an account) get a view with every viewer-dependent flag
/// cleared. Pure: no store access, no mutation.
pub fn evaluate_clan_view(
    clan: &Clan,
    roster: &[(&Membership, &Account)],
    viewer: Option<&Account>,
) -> ClanView {
    let viewer_id = viewer.map(|a| a.id);
    let viewer_membership: Option<&Membership> = viewer_id.and_then(|id| {
        roster
            .iter()
            .find(|(m, _)| m.account_id == id)
            .map(|(m, _)| *m)
    });
    let viewer_rank = viewer_membership.map(|m| m.rank);

    let leader = roster.iter().find(|(m, _)| m.rank == ClanRank::ClanLeader);

    let mut members: Vec<MemberView> = roster
        .iter()
        .map(|(m, a)| {
            let is_self = viewer_id == Some(m.account_id);
            let (can_change_rank, can_remove) = match viewer_rank {
                Some(rank) if !is_self => (
                    can_change_member_rank(rank, m.rank),
                    can_remove_member(rank, m.rank),
                ),
                _ => (false, false),
            };
            MemberView {
                account_id: m.account_id,
                email: a.email.clone(),
                role: a.role,
                rank: m.rank,
                joined_at: m.joined_at,
                can_change_rank,
                can_remove,
            }
        })
        .collect();

    members.sort_by(|a, b| {
        a.rank
            .authority()
            .cmp(&b.rank.authority())
            .then_with(|| a.email.cmp(&b.email))
    });

    ClanView {
        clan_id: clan.id,
        name: clan.name.clone(),
        tag: clan.tag.clone(),
        description: clan.description.clone(),
        active: clan.active,
        members,
        viewer_id,
        viewer_is_member: viewer_membership.is_some(),
        viewer_is_leader: viewer_rank == Some(ClanRank::ClanLeader),
        viewer_is_co_leader: viewer_rank == Some(ClanRank::CoLeader),
        viewer_is_platform_admin: viewer.is_some_and(|a| a.role.is_platform_admin()),
        can_join_or_leave: viewer.is_some() && clan.active,
        leader_email: leader.map(|(_, a)| a.email.clone()),
    }
}
