//! Role hierarchy for clan ranks and platform-wide account roles.
//!
//! Both hierarchies are closed total orders. Authority is expressed as an
//! index where a lower number means a higher rank, the convention used for
//! every ordering and comparison in the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for a clan rank value outside the defined rank set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized clan rank: {0:?}")]
pub struct UnknownRank(pub String);

/// Error for an account role value outside the defined role set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized account role: {0:?}")]
pub struct UnknownRole(pub String);

/// A member's rank within a clan, in descending authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClanRank {
    /// Sole owner of the clan with full management rights.
    ClanLeader,
    /// Officer rank, second in authority to the leader.
    CoLeader,
    Elder,
    Member,
    Recruit,
}

impl ClanRank {
    /// All ranks, highest authority first.
    pub const ALL: [Self; 5] = [
        Self::ClanLeader,
        Self::CoLeader,
        Self::Elder,
        Self::Member,
        Self::Recruit,
    ];

    /// Authority index (lower number = higher rank).
    pub const fn authority(self) -> u8 {
        match self {
            Self::ClanLeader => 0,
            Self::CoLeader => 1,
            Self::Elder => 2,
            Self::Member => 3,
            Self::Recruit => 4,
        }
    }

    /// Leader or co-leader, the two ranks carrying management authority.
    pub const fn is_leadership(self) -> bool {
        matches!(self, Self::ClanLeader | Self::CoLeader)
    }

    /// Strictly higher authority than `other`.
    pub const fn outranks(self, other: Self) -> bool {
        self.authority() < other.authority()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClanLeader => "clan_leader",
            Self::CoLeader => "co_leader",
            Self::Elder => "elder",
            Self::Member => "member",
            Self::Recruit => "recruit",
        }
    }
}

impl fmt::Display for ClanRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClanRank {
    type Err = UnknownRank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clan_leader" | "clanleader" => Ok(Self::ClanLeader),
            "co_leader" | "coleader" => Ok(Self::CoLeader),
            "elder" => Ok(Self::Elder),
            "member" => Ok(Self::Member),
            "recruit" => Ok(Self::Recruit),
            _ => Err(UnknownRank(s.to_string())),
        }
    }
}

/// An account's platform-wide role, in descending authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
    /// Highest authority; unassignable and immutable through the engine.
    SuperAdmin,
    Admin,
    User,
}

impl GlobalRole {
    /// Authority index (lower number = higher rank).
    pub const fn authority(self) -> u8 {
        match self {
            Self::SuperAdmin => 0,
            Self::Admin => 1,
            Self::User => 2,
        }
    }

    /// Admin or super admin.
    pub const fn is_platform_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_authority_is_total_and_descending() {
        for pair in ClanRank::ALL.windows(2) {
            assert!(pair[0].outranks(pair[1]), "{} should outrank {}", pair[0], pair[1]);
            assert!(!pair[1].outranks(pair[0]));
        }
        assert!(!ClanRank::Elder.outranks(ClanRank::Elder));
    }

    #[test]
    fn leadership_ranks() {
        assert!(ClanRank::ClanLeader.is_leadership());
        assert!(ClanRank::CoLeader.is_leadership());
        assert!(!ClanRank::Elder.is_leadership());
        assert!(!ClanRank::Member.is_leadership());
        assert!(!ClanRank::Recruit.is_leadership());
    }

    #[test]
    fn rank_parse_round_trip() {
        for rank in ClanRank::ALL {
            assert_eq!(rank.as_str().parse::<ClanRank>(), Ok(rank));
        }
        assert_eq!("ClanLeader".parse::<ClanRank>(), Ok(ClanRank::ClanLeader));
        assert_eq!(
            "warlord".parse::<ClanRank>(),
            Err(UnknownRank("warlord".to_string()))
        );
    }

    #[test]
    fn role_parse_and_admin_check() {
        assert_eq!("SuperAdmin".parse::<GlobalRole>(), Ok(GlobalRole::SuperAdmin));
        assert_eq!("user".parse::<GlobalRole>(), Ok(GlobalRole::User));
        assert!("moderator".parse::<GlobalRole>().is_err());

        assert!(GlobalRole::SuperAdmin.is_platform_admin());
        assert!(GlobalRole::Admin.is_platform_admin());
        assert!(!GlobalRole::User.is_platform_admin());
    }
}
