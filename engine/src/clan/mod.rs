//! Clan lifecycle and rank management.

mod lifecycle;
mod ranks;
mod types;

pub use lifecycle::{
    clan_detail, create_clan, delete_clan, join, list_clans, remove_member, toggle_active,
    update_description, ClanError,
};
pub use ranks::{change_member_rank, RankChangeError};
pub use types::{ClanSummary, CreateClanRequest};
